//! Bit stream errors.

use std::fmt;

/// Result type for bitstream operations.
pub type BitResult<T> = Result<T, BitError>;

/// A failed read or write. Positions are bit offsets from the start of the
/// buffer, taken before the failing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitError {
    /// A read ran past the last byte.
    EndOfBuffer {
        position: usize,
        requested: usize,
        available: usize,
    },

    /// A write did not fit the pre-sized buffer.
    BufferOverflow {
        position: usize,
        attempted: usize,
        capacity: usize,
    },

    /// A width above 64 bits.
    InvalidBitCount { bits: u8 },
}

impl BitError {
    /// Largest width a single read or write accepts.
    pub const MAX_BITS: u8 = 64;

    /// Bit offset the failing operation started at, if it has one.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::EndOfBuffer { position, .. } | Self::BufferOverflow { position, .. } => {
                Some(*position)
            }
            Self::InvalidBitCount { .. } => None,
        }
    }
}

impl fmt::Display for BitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndOfBuffer {
                position,
                requested,
                available,
            } => write!(
                f,
                "read of {requested} bits at bit {position} runs past the end ({available} bits left)"
            ),
            Self::BufferOverflow {
                position,
                attempted,
                capacity,
            } => write!(
                f,
                "write of {attempted} bits at bit {position} does not fit ({capacity} bits left)"
            ),
            Self::InvalidBitCount { bits } => {
                write!(f, "bit width {bits} exceeds {}", Self::MAX_BITS)
            }
        }
    }
}

impl std::error::Error for BitError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_of_buffer_names_position() {
        let err = BitError::EndOfBuffer {
            position: 25,
            requested: 14,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "read of 14 bits at bit 25 runs past the end (3 bits left)"
        );
        assert_eq!(err.position(), Some(25));
    }

    #[test]
    fn overflow_names_position() {
        let err = BitError::BufferOverflow {
            position: 54,
            attempted: 42,
            capacity: 29,
        };
        assert_eq!(
            err.to_string(),
            "write of 42 bits at bit 54 does not fit (29 bits left)"
        );
        assert_eq!(err.position(), Some(54));
    }

    #[test]
    fn invalid_width_has_no_position() {
        let err = BitError::InvalidBitCount { bits: 65 };
        assert_eq!(err.to_string(), "bit width 65 exceeds 64");
        assert_eq!(err.position(), None);
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<BitError>();
    }
}
