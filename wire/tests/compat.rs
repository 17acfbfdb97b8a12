//! Fixed tokens produced by the browser front end.

use wire::{decode_token, encode_token, Centiseconds, LanguageFlag, Limits, ResultItem};

const CURRENT_TOKEN: &str = "B4hwgYICayBYRIPnAOYAD__A";
const LEGACY_TOKEN: &str = "BgPoCowDIA";

fn current_items() -> Vec<ResultItem> {
    vec![
        ResultItem::correct(12, 1, Centiseconds::new(154)),
        ResultItem::incorrect(800, 5, Some(33), 2, Centiseconds::new(999)),
        ResultItem::incorrect(3, 9, None, 0, Centiseconds::new(16_383)),
    ]
}

#[test]
fn current_token_decodes() {
    let decoded = decode_token(CURRENT_TOKEN, &Limits::default()).unwrap();
    assert_eq!(decoded.header.version, 7);
    assert_eq!(decoded.header.language, LanguageFlag::Secondary);
    assert_eq!(decoded.header.total.raw(), 4321);
    assert_eq!(decoded.items, current_items());
    assert!(!decoded.truncated);
}

#[test]
fn current_token_encodes_identically() {
    let token = encode_token(
        LanguageFlag::Secondary,
        Centiseconds::new(4321),
        &current_items(),
    )
    .unwrap();
    assert_eq!(token, CURRENT_TOKEN);
}

#[test]
fn legacy_token_decodes() {
    let decoded = decode_token(LEGACY_TOKEN, &Limits::default()).unwrap();
    assert_eq!(decoded.header.version, 6);
    assert_eq!(decoded.header.language, LanguageFlag::Primary);
    assert_eq!(decoded.header.total.raw(), 1000);
    assert_eq!(
        decoded.items,
        vec![ResultItem::correct(42, 3, Centiseconds::new(100))]
    );
}

#[test]
fn padded_token_decodes() {
    let padded = format!("{LEGACY_TOKEN}==");
    let decoded = decode_token(&padded, &Limits::default()).unwrap();
    assert_eq!(decoded.items.len(), 1);
}
