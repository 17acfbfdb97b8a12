//! Per-question result item layout.
//!
//! ```text
//! correct:   entry(10) type(4) wrong=0                     elapsed(14)  = 29 bits
//! incorrect: entry(10) type(4) wrong=1 selected+1(10) field(3) elapsed(14) = 42 bits
//! ```
//!
//! Correct items carry no selection provenance: the chosen answer equals the
//! correct answer, so the fields would be redundant.

use bitstream::{BitReader, BitWriter};

use crate::error::EncodeError;
use crate::types::Centiseconds;

/// Width of the source entry index field.
pub const ENTRY_INDEX_BITS: u8 = 10;
/// Width of the question type field.
pub const TYPE_CODE_BITS: u8 = 4;
/// Width of the wrong flag.
pub const WRONG_FLAG_BITS: u8 = 1;
/// Width of the selected entry index field (stored as index + 1).
pub const SELECTED_INDEX_BITS: u8 = 10;
/// Width of the selected field code.
pub const FIELD_CODE_BITS: u8 = 3;
/// Width of the per-question elapsed time field.
pub const ELAPSED_BITS: u8 = 14;

/// Largest encodable entry index.
pub const MAX_ENTRY_INDEX: u16 = (1 << ENTRY_INDEX_BITS) - 1;
/// Largest encodable question type code.
pub const MAX_TYPE_CODE: u8 = (1 << TYPE_CODE_BITS) - 1;
/// Largest encodable field code.
pub const MAX_FIELD_CODE: u8 = (1 << FIELD_CODE_BITS) - 1;
/// Largest representable per-question time (163.83 s).
pub const MAX_ITEM_CENTISECONDS: u32 = (1 << ELAPSED_BITS) - 1;

const PREFIX_BITS: usize =
    ENTRY_INDEX_BITS as usize + TYPE_CODE_BITS as usize + WRONG_FLAG_BITS as usize;
const SELECTION_BITS: usize = SELECTED_INDEX_BITS as usize + FIELD_CODE_BITS as usize;

/// Size of an item answered correctly.
pub const CORRECT_ITEM_BITS: usize = PREFIX_BITS + ELAPSED_BITS as usize;
/// Size of an item answered incorrectly.
pub const INCORRECT_ITEM_BITS: usize = CORRECT_ITEM_BITS + SELECTION_BITS;

/// Whether a question was answered correctly, and if not, what was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemOutcome {
    /// The chosen answer equals the correct answer.
    Correct,
    /// The chosen answer differs from the correct answer.
    Incorrect {
        /// Entry the chosen text came from, if it could be resolved.
        selected_index: Option<u16>,
        /// Field the chosen text came from (0 when unknown).
        field_code: u8,
    },
}

/// One encoded question result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultItem {
    /// Dataset position of the question's subject.
    pub entry_index: u16,
    /// Question type code.
    pub type_code: u8,
    /// Correctness and selection provenance.
    pub outcome: ItemOutcome,
    /// Time spent on the question.
    pub elapsed: Centiseconds,
}

impl ResultItem {
    /// Creates an item for a correct answer.
    #[must_use]
    pub const fn correct(entry_index: u16, type_code: u8, elapsed: Centiseconds) -> Self {
        Self {
            entry_index,
            type_code,
            outcome: ItemOutcome::Correct,
            elapsed,
        }
    }

    /// Creates an item for an incorrect answer.
    #[must_use]
    pub const fn incorrect(
        entry_index: u16,
        type_code: u8,
        selected_index: Option<u16>,
        field_code: u8,
        elapsed: Centiseconds,
    ) -> Self {
        Self {
            entry_index,
            type_code,
            outcome: ItemOutcome::Incorrect {
                selected_index,
                field_code,
            },
            elapsed,
        }
    }

    /// Returns `true` if the item was answered incorrectly.
    #[must_use]
    pub const fn is_wrong(&self) -> bool {
        matches!(self.outcome, ItemOutcome::Incorrect { .. })
    }

    /// Returns the selected entry index (`None` for correct or unresolved).
    #[must_use]
    pub const fn selected_index(&self) -> Option<u16> {
        match self.outcome {
            ItemOutcome::Correct => None,
            ItemOutcome::Incorrect { selected_index, .. } => selected_index,
        }
    }

    /// Returns the selected field code (0 for correct items).
    #[must_use]
    pub const fn field_code(&self) -> u8 {
        match self.outcome {
            ItemOutcome::Correct => 0,
            ItemOutcome::Incorrect { field_code, .. } => field_code,
        }
    }

    /// Number of bits this item occupies on the wire.
    #[must_use]
    pub const fn encoded_bits(&self) -> usize {
        if self.is_wrong() {
            INCORRECT_ITEM_BITS
        } else {
            CORRECT_ITEM_BITS
        }
    }
}

/// Writes one item, clamping every field to its width.
pub(crate) fn write_item(writer: &mut BitWriter<'_>, item: &ResultItem) -> Result<(), EncodeError> {
    let entry_index = item.entry_index.min(MAX_ENTRY_INDEX);
    let type_code = item.type_code.min(MAX_TYPE_CODE);
    writer.write_bits(u64::from(entry_index), ENTRY_INDEX_BITS)?;
    writer.write_bits(u64::from(type_code), TYPE_CODE_BITS)?;
    writer.write_bit(item.is_wrong())?;

    if let ItemOutcome::Incorrect {
        selected_index,
        field_code,
    } = item.outcome
    {
        // Unknown selection encodes as 0.
        let selected_plus_one = selected_index
            .map_or(0, |index| u32::from(index) + 1)
            .min(u32::from(MAX_ENTRY_INDEX));
        writer.write_bits(u64::from(selected_plus_one), SELECTED_INDEX_BITS)?;
        writer.write_bits(u64::from(field_code.min(MAX_FIELD_CODE)), FIELD_CODE_BITS)?;
    }

    let elapsed = item.elapsed.saturate(MAX_ITEM_CENTISECONDS);
    writer.write_bits(u64::from(elapsed.raw()), ELAPSED_BITS)?;
    Ok(())
}

/// Reads one item, or `None` if the remaining bits cannot hold a whole item.
///
/// The reader position is unspecified after `None`.
pub(crate) fn read_item(reader: &mut BitReader<'_>) -> Option<ResultItem> {
    if !reader.has_bits(CORRECT_ITEM_BITS) {
        return None;
    }
    let entry_index = reader.read_bits(ENTRY_INDEX_BITS).ok()? as u16;
    let type_code = reader.read_bits(TYPE_CODE_BITS).ok()? as u8;
    let wrong = reader.read_bit().ok()?;

    let outcome = if wrong {
        if !reader.has_bits(SELECTION_BITS + ELAPSED_BITS as usize) {
            return None;
        }
        let selected_plus_one = reader.read_bits(SELECTED_INDEX_BITS).ok()? as u16;
        let field_code = reader.read_bits(FIELD_CODE_BITS).ok()? as u8;
        ItemOutcome::Incorrect {
            selected_index: selected_plus_one.checked_sub(1),
            field_code,
        }
    } else {
        ItemOutcome::Correct
    };

    let elapsed = reader.read_bits(ELAPSED_BITS).ok()? as u32;
    Some(ResultItem {
        entry_index,
        type_code,
        outcome,
        elapsed: Centiseconds::new(elapsed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitstream::bytes_for_bits;

    fn write_one(item: &ResultItem) -> Vec<u8> {
        let mut buf = vec![0u8; bytes_for_bits(item.encoded_bits())];
        let mut writer = BitWriter::new(&mut buf);
        write_item(&mut writer, item).unwrap();
        assert_eq!(writer.bits_written(), item.encoded_bits());
        buf
    }

    #[test]
    fn item_sizes() {
        assert_eq!(CORRECT_ITEM_BITS, 29);
        assert_eq!(INCORRECT_ITEM_BITS, 42);
        assert_eq!(MAX_ITEM_CENTISECONDS, 16_383);
        assert_eq!(MAX_ENTRY_INDEX, 1023);
    }

    #[test]
    fn correct_item_roundtrip() {
        let item = ResultItem::correct(321, 3, Centiseconds::new(16_383));
        let bytes = write_one(&item);
        let mut reader = BitReader::new(&bytes);
        assert_eq!(read_item(&mut reader), Some(item));
        assert_eq!(item.selected_index(), None);
        assert_eq!(item.field_code(), 0);
    }

    #[test]
    fn incorrect_item_roundtrip() {
        let item = ResultItem::incorrect(5, 2, Some(0), 3, Centiseconds::new(250));
        let bytes = write_one(&item);
        let mut reader = BitReader::new(&bytes);
        let decoded = read_item(&mut reader).unwrap();
        assert_eq!(decoded, item);
        assert_eq!(decoded.selected_index(), Some(0));
    }

    #[test]
    fn unknown_selection_encodes_as_zero() {
        let item = ResultItem::incorrect(1, 1, None, 0, Centiseconds::new(1));
        let bytes = write_one(&item);
        // selected+1 occupies bits 15..25
        assert_eq!(bitstream::read_bits_at(&bytes, 15, SELECTED_INDEX_BITS), 0);
        let mut reader = BitReader::new(&bytes);
        assert_eq!(read_item(&mut reader).unwrap().selected_index(), None);
    }

    #[test]
    fn fields_are_clamped() {
        let item = ResultItem::incorrect(5000, 200, Some(4000), 9, Centiseconds::new(20_000));
        let bytes = write_one(&item);
        let mut reader = BitReader::new(&bytes);
        let decoded = read_item(&mut reader).unwrap();
        assert_eq!(decoded.entry_index, MAX_ENTRY_INDEX);
        assert_eq!(decoded.type_code, MAX_TYPE_CODE);
        assert_eq!(decoded.selected_index(), Some(MAX_ENTRY_INDEX - 1));
        assert_eq!(decoded.field_code(), MAX_FIELD_CODE);
        assert_eq!(decoded.elapsed.raw(), MAX_ITEM_CENTISECONDS);
    }

    #[test]
    fn short_input_yields_none() {
        let item = ResultItem::incorrect(5, 2, Some(7), 3, Centiseconds::new(250));
        let bytes = write_one(&item);
        // 4 bytes = 32 bits: enough for the 29-bit minimum, not for 42.
        let mut reader = BitReader::new(&bytes[..4]);
        assert_eq!(read_item(&mut reader), None);

        let mut reader = BitReader::new(&bytes[..3]);
        assert_eq!(read_item(&mut reader), None);
    }
}
