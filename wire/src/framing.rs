//! URL-safe text framing for token bytes.
//!
//! Tokens use the URL-safe base64 alphabet without padding. Decoding accepts
//! padding, the standard `+`/`/` alphabet, and a dangling final character so
//! that any prefix of a valid token still yields bytes. [`text_to_bits`] keeps
//! the 6 bits of that dangling character; [`text_to_bytes`] drops them.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::error::{DecodeError, WireResult};

const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Encodes raw token bytes as URL-safe base64 without padding.
#[must_use]
pub fn bytes_to_text(bytes: &[u8]) -> String {
    ENGINE.encode(bytes)
}

/// Decodes token text back into raw bytes.
///
/// A dangling final character cannot complete a byte and is dropped.
pub fn text_to_bytes(text: &str) -> WireResult<Vec<u8>> {
    let mut normalized = normalize(text);
    if normalized.len() % 4 == 1 {
        normalized.pop();
    }
    decode_normalized(&normalized, 0)
}

/// Decodes token text into bytes plus the number of bits the text carries.
///
/// A dangling final character adds one byte holding its 6 bits followed by
/// 2 zero bits; the returned bit count stops before those zeros.
pub fn text_to_bits(text: &str) -> WireResult<(Vec<u8>, usize)> {
    let mut normalized = normalize(text);
    let dangling = if normalized.len() % 4 == 1 {
        normalized.pop()
    } else {
        None
    };
    let mut bytes = decode_normalized(&normalized, 0)?;
    let mut bit_len = bytes.len() * 8;
    if let Some(last) = dangling {
        // A lone symbol followed by 'A' (zero) decodes to its 6 bits, left aligned.
        let tail = decode_normalized(&format!("{last}A"), normalized.len())?;
        bytes.extend_from_slice(&tail);
        bit_len += 6;
    }
    Ok((bytes, bit_len))
}

fn normalize(text: &str) -> String {
    text.trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

/// Decodes unpadded URL-safe text; `offset` shifts reported error positions.
fn decode_normalized(text: &str, offset: usize) -> WireResult<Vec<u8>> {
    ENGINE.decode(text.as_bytes()).map_err(|err| {
        let position = match err {
            base64::DecodeError::InvalidByte(position, _)
            | base64::DecodeError::InvalidLastSymbol(position, _) => position,
            _ => text.len(),
        };
        DecodeError::InvalidBase64 {
            position: offset + position,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_without_padding() {
        assert_eq!(bytes_to_text(&[0xFB]), "-w");
        assert_eq!(bytes_to_text(&[0xFF, 0xFF]), "__8");
        assert_eq!(bytes_to_text(&[]), "");
    }

    #[test]
    fn decodes_url_safe_text() {
        assert_eq!(text_to_bytes("-w").unwrap(), vec![0xFB]);
        assert_eq!(text_to_bytes("__8").unwrap(), vec![0xFF, 0xFF]);
    }

    #[test]
    fn accepts_padding_and_standard_alphabet() {
        assert_eq!(text_to_bytes("+w==").unwrap(), vec![0xFB]);
        assert_eq!(text_to_bytes("//8=").unwrap(), vec![0xFF, 0xFF]);
    }

    #[test]
    fn dangling_character_is_dropped() {
        assert_eq!(text_to_bytes("__8A_").unwrap(), vec![0xFF, 0xFF, 0x00]);
        assert_eq!(text_to_bytes("A").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn dangling_character_keeps_six_bits() {
        // '_' is 63: 0b111111 followed by 2 padding zeros.
        assert_eq!(
            text_to_bits("__8A_").unwrap(),
            (vec![0xFF, 0xFF, 0x00, 0xFC], 30)
        );
        assert_eq!(text_to_bits("B").unwrap(), (vec![0x04], 6));
        assert_eq!(text_to_bits("").unwrap(), (Vec::new(), 0));
        assert_eq!(text_to_bits("__8").unwrap(), (vec![0xFF, 0xFF], 16));
    }

    #[test]
    fn dangling_foreign_character_is_rejected() {
        let err = text_to_bits("AAAA*").unwrap_err();
        assert_eq!(err, DecodeError::InvalidBase64 { position: 4 });
    }

    #[test]
    fn rejects_foreign_characters() {
        let err = text_to_bytes("ab*d").unwrap_err();
        assert_eq!(err, DecodeError::InvalidBase64 { position: 2 });
    }

    #[test]
    fn roundtrip_all_byte_values() {
        let bytes: Vec<u8> = (0..=255).collect();
        let text = bytes_to_text(&bytes);
        assert!(!text.contains('='));
        assert!(!text.contains('+'));
        assert!(!text.contains('/'));
        assert_eq!(text_to_bytes(&text).unwrap(), bytes);
    }
}
