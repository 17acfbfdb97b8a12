//! Share token encoding and decoding.

use bitstream::{bytes_for_bits, BitReader, BitWriter};

use crate::error::{DecodeError, EncodeError, WireResult};
use crate::framing::{bytes_to_text, text_to_bits};
use crate::header::{read_header, write_header, ShareHeader, HEADER_BITS};
use crate::item::{read_item, write_item, ResultItem, CORRECT_ITEM_BITS};
use crate::limits::Limits;
use crate::types::{Centiseconds, LanguageFlag};

/// A decoded share token.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedToken {
    /// Header fields.
    pub header: ShareHeader,
    /// Items in session order.
    pub items: Vec<ResultItem>,
    /// `true` if bits beyond byte padding were left unparsed, or the item
    /// limit cut decoding short.
    pub truncated: bool,
}

impl DecodedToken {
    /// Number of incorrect items.
    #[must_use]
    pub fn wrong_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_wrong()).count()
    }
}

/// Total payload size in bits for a current-version token.
#[must_use]
pub fn encoded_bits(items: &[ResultItem]) -> usize {
    HEADER_BITS + items.iter().map(ResultItem::encoded_bits).sum::<usize>()
}

/// Encodes a header and items into raw token bytes (current version).
///
/// Out-of-range fields are clamped to their widths.
pub fn encode_bytes(
    language: LanguageFlag,
    total: Centiseconds,
    items: &[ResultItem],
) -> Result<Vec<u8>, EncodeError> {
    let total_bits = encoded_bits(items);
    let mut buf = vec![0u8; bytes_for_bits(total_bits)];
    let mut writer = BitWriter::new(&mut buf);
    write_header(&mut writer, language, total)?;
    for item in items {
        write_item(&mut writer, item)?;
    }
    let used = writer.finish();
    buf.truncate(used);
    Ok(buf)
}

/// Encodes a header and items into a URL-safe token.
pub fn encode_token(
    language: LanguageFlag,
    total: Centiseconds,
    items: &[ResultItem],
) -> Result<String, EncodeError> {
    let bytes = encode_bytes(language, total, items)?;
    Ok(bytes_to_text(&bytes))
}

/// Re-emits a decoded token with a different language bit.
///
/// Everything else is copied through; legacy tokens come out as the current version.
pub fn reencode_with_language(
    decoded: &DecodedToken,
    language: LanguageFlag,
) -> Result<String, EncodeError> {
    encode_token(language, decoded.header.total, &decoded.items)
}

/// Decodes raw token bytes.
///
/// Fails only on a bad header. A short or damaged body yields the complete
/// items that precede the damage.
pub fn decode_bytes(bytes: &[u8], limits: &Limits) -> WireResult<DecodedToken> {
    decode_bits(bytes, bytes.len() * 8, limits)
}

/// Decodes the first `bit_len` bits of `bytes`.
///
/// Bits past `bit_len` are never read, so padding cannot complete a header
/// field or an item.
pub fn decode_bits(bytes: &[u8], bit_len: usize, limits: &Limits) -> WireResult<DecodedToken> {
    let mut reader = BitReader::with_bit_len(bytes, bit_len);
    let header = read_header(&mut reader)?;

    let mut items = Vec::new();
    let truncated = loop {
        if !reader.has_bits(CORRECT_ITEM_BITS) {
            // Anything other than zero padding inside the last byte is a cut record.
            break reader.bits_remaining() >= 8 || !reader.remaining_is_zero();
        }
        if items.len() >= limits.max_items {
            break true;
        }
        match read_item(&mut reader) {
            Some(item) => items.push(item),
            None => break true,
        }
    };

    Ok(DecodedToken {
        header,
        items,
        truncated,
    })
}

/// Decodes a URL-safe token.
pub fn decode_token(token: &str, limits: &Limits) -> WireResult<DecodedToken> {
    if token.len() > limits.max_token_chars {
        return Err(DecodeError::TokenTooLong {
            limit: limits.max_token_chars,
            actual: token.len(),
        });
    }
    let (bytes, bit_len) = text_to_bits(token)?;
    decode_bits(&bytes, bit_len, limits)
}
