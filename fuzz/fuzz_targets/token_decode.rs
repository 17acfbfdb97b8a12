#![no_main]

use libfuzzer_sys::fuzz_target;
use wire::{decode_bytes, decode_token, encode_bytes, Limits};

fuzz_target!(|data: &[u8]| {
    let limits = Limits::for_testing();

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = decode_token(text, &limits);
    }

    // Anything that decodes must survive a re-encode and decode again.
    if let Ok(decoded) = decode_bytes(data, &limits) {
        let Ok(bytes) = encode_bytes(
            decoded.header.language,
            decoded.header.total,
            &decoded.items,
        ) else {
            return;
        };
        let again = decode_bytes(&bytes, &limits).expect("re-encoded token decodes");
        assert_eq!(again.items, decoded.items);
        assert_eq!(again.header.total, decoded.header.total);
    }
});
