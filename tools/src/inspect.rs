//! Bit-level layout of a share token.

use std::fmt::Write as _;

use serde::Serialize;
use wire::{
    header_bits, text_to_bits, DecodedToken, Limits, ELAPSED_BITS, ENTRY_INDEX_BITS,
    FIELD_CODE_BITS, LANGUAGE_BITS, SELECTED_INDEX_BITS, TOTAL_TIME_BITS, TYPE_CODE_BITS,
    VERSION_BITS, WRONG_FLAG_BITS,
};

/// One field as it sits in the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpan {
    pub name: &'static str,
    pub offset: usize,
    pub bits: u8,
    /// Raw stored value (selection is stored as index + 1).
    pub raw: u64,
}

/// One item and its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSpan {
    pub index: usize,
    pub offset: usize,
    pub bits: usize,
    pub fields: Vec<FieldSpan>,
}

/// Layout of a whole token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub token_chars: usize,
    pub byte_len: usize,
    pub header: Vec<FieldSpan>,
    pub items: Vec<ItemSpan>,
    /// Bits the text carries after the last complete item.
    pub trailing_bits: usize,
    pub truncated: bool,
    pub decoded: DecodedToken,
}

struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl Cursor<'_> {
    fn span(&mut self, name: &'static str, bits: u8) -> FieldSpan {
        let span = FieldSpan {
            name,
            offset: self.offset,
            bits,
            raw: bitstream::read_bits_at(self.bytes, self.offset, bits),
        };
        self.offset += usize::from(bits);
        span
    }
}

/// Decodes `token` and maps every field to its bit offset.
pub fn inspect_token(token: &str, limits: &Limits) -> anyhow::Result<InspectReport> {
    let decoded = wire::decode_token(token, limits)?;
    let (bytes, bit_len) = text_to_bits(token)?;
    let mut cursor = Cursor {
        bytes: &bytes,
        offset: 0,
    };

    let mut header = vec![cursor.span("version", VERSION_BITS)];
    if !decoded.header.is_legacy() {
        header.push(cursor.span("language", LANGUAGE_BITS));
    }
    header.push(cursor.span("total_cs", TOTAL_TIME_BITS));
    debug_assert_eq!(cursor.offset, header_bits(decoded.header.version));

    let mut items = Vec::with_capacity(decoded.items.len());
    for (index, item) in decoded.items.iter().enumerate() {
        let offset = cursor.offset;
        let mut fields = vec![
            cursor.span("entry", ENTRY_INDEX_BITS),
            cursor.span("type", TYPE_CODE_BITS),
            cursor.span("wrong", WRONG_FLAG_BITS),
        ];
        if item.is_wrong() {
            fields.push(cursor.span("selected+1", SELECTED_INDEX_BITS));
            fields.push(cursor.span("field", FIELD_CODE_BITS));
        }
        fields.push(cursor.span("elapsed_cs", ELAPSED_BITS));
        items.push(ItemSpan {
            index,
            offset,
            bits: cursor.offset - offset,
            fields,
        });
    }

    Ok(InspectReport {
        token_chars: token.len(),
        byte_len: bytes.len(),
        header,
        items,
        trailing_bits: bit_len.saturating_sub(cursor.offset),
        truncated: decoded.truncated,
        decoded,
    })
}

/// Renders a report as an aligned table.
#[must_use]
pub fn format_inspect(report: &InspectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "token: {} chars, {} bytes, {} items{}",
        report.token_chars,
        report.byte_len,
        report.items.len(),
        if report.truncated { " (truncated)" } else { "" }
    );
    out.push_str("header:\n");
    for field in &report.header {
        write_field(&mut out, "  ", field);
    }
    for item in &report.items {
        let _ = writeln!(
            out,
            "item {} @ bit {} ({} bits):",
            item.index, item.offset, item.bits
        );
        for field in &item.fields {
            write_field(&mut out, "  ", field);
        }
    }
    let _ = writeln!(out, "trailing: {} bits", report.trailing_bits);
    out
}

fn write_field(out: &mut String, indent: &str, field: &FieldSpan) {
    let _ = writeln!(
        out,
        "{indent}{:<11} @{:>4} [{:>2}] = {}",
        field.name, field.offset, field.bits, field.raw
    );
}
