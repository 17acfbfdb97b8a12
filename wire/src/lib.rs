//! Versioned share-token layout for quizshare results.
//!
//! This crate handles the binary token format: a bit-packed header followed by
//! variable-length result items, framed as URL-safe base64. It does not know
//! about the character dataset, only the structure of a token.
//!
//! # Layout
//!
//! ```text
//! header:  version(8) [language(1), version >= 7] total_cs(16)
//! item:    entry(10) type(4) wrong(1) [selected+1(10) field(3), wrong only] elapsed_cs(14)
//! ```
//!
//! # Design Principles
//!
//! - **Stable wire format** - Versions 6 and 7 both decode; encoding always emits 7.
//! - **Lenient bodies** - A damaged body yields the complete items before the damage.
//! - **Bounded decoding** - Token length and item count are capped by [`Limits`].
//! - **No domain knowledge** - Entries and questions are plain integers here.

mod error;
mod framing;
mod header;
mod item;
mod limits;
mod token;
mod types;

pub use error::{DecodeError, EncodeError, WireResult};
pub use framing::{bytes_to_text, text_to_bits, text_to_bytes};
pub use header::{
    header_bits, ShareHeader, HEADER_BITS, LANGUAGE_BITS, LEGACY_VERSION,
    MAX_TOTAL_CENTISECONDS, TOTAL_TIME_BITS, VERSION, VERSION_BITS,
};
pub use item::{
    ItemOutcome, ResultItem, CORRECT_ITEM_BITS, ELAPSED_BITS, ENTRY_INDEX_BITS, FIELD_CODE_BITS,
    INCORRECT_ITEM_BITS, MAX_ENTRY_INDEX, MAX_FIELD_CODE, MAX_ITEM_CENTISECONDS, MAX_TYPE_CODE,
    SELECTED_INDEX_BITS, TYPE_CODE_BITS, WRONG_FLAG_BITS,
};
pub use limits::Limits;
pub use token::{
    decode_bits, decode_bytes, decode_token, encode_bytes, encode_token, encoded_bits,
    reencode_with_language, DecodedToken,
};
pub use types::{Centiseconds, LanguageFlag};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = VERSION;
        let _ = LEGACY_VERSION;
        let _ = HEADER_BITS;
        let _ = Limits::default();
        let _ = ShareHeader::new(LanguageFlag::Primary, Centiseconds::new(0));
        let _ = ResultItem::correct(0, 1, Centiseconds::new(0));

        let _: WireResult<()> = Ok(());
    }

    #[test]
    fn item_widths_add_up() {
        assert_eq!(
            CORRECT_ITEM_BITS,
            (ENTRY_INDEX_BITS + TYPE_CODE_BITS + WRONG_FLAG_BITS + ELAPSED_BITS) as usize
        );
        assert_eq!(
            INCORRECT_ITEM_BITS,
            CORRECT_ITEM_BITS + (SELECTED_INDEX_BITS + FIELD_CODE_BITS) as usize
        );
    }

    #[test]
    fn header_widths_add_up() {
        assert_eq!(
            HEADER_BITS,
            (VERSION_BITS + LANGUAGE_BITS) as usize + TOTAL_TIME_BITS as usize
        );
        assert_eq!(header_bits(LEGACY_VERSION), HEADER_BITS - 1);
    }

    #[test]
    fn time_limits_follow_field_widths() {
        assert_eq!(MAX_ITEM_CENTISECONDS, 16_383);
        assert_eq!(MAX_TOTAL_CENTISECONDS, 65_535);
    }

    #[test]
    fn full_quiz_token_is_short() {
        let items: Vec<ResultItem> = (0..10)
            .map(|i| ResultItem::incorrect(i, 1, Some(i), 1, Centiseconds::new(100)))
            .collect();
        let token = encode_token(LanguageFlag::Primary, Centiseconds::new(1000), &items).unwrap();
        // 25 + 10 * 42 = 445 bits -> 56 bytes -> 75 characters
        assert_eq!(token.len(), 75);
    }
}
