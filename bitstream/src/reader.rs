//! Bit-level reader with bounded operations.

use crate::error::{BitError, BitResult};
use crate::raw;

/// A bit-level reader for decoding packed binary data.
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_len: usize,
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new `BitReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_len: data.len().saturating_mul(8),
            bit_pos: 0,
        }
    }

    /// Creates a reader over the first `bit_len` bits of `data`.
    ///
    /// Bits past `bit_len` in the last byte are padding and are never read.
    /// A `bit_len` beyond the slice is cut to the slice.
    #[must_use]
    pub const fn with_bit_len(data: &'a [u8], bit_len: usize) -> Self {
        let max = data.len().saturating_mul(8);
        Self {
            data,
            bit_len: if bit_len < max { bit_len } else { max },
            bit_pos: 0,
        }
    }

    /// Number of readable bits in total.
    #[must_use]
    pub const fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Returns the number of bits remaining to read.
    #[must_use]
    pub const fn bits_remaining(&self) -> usize {
        self.bit_len.saturating_sub(self.bit_pos)
    }

    /// Returns `true` if there are no more bits to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits_remaining() == 0
    }

    /// Returns the current bit position.
    #[must_use]
    pub const fn bit_position(&self) -> usize {
        self.bit_pos
    }

    /// Returns `true` if at least `bits` more bits can be read.
    #[must_use]
    pub const fn has_bits(&self, bits: usize) -> bool {
        self.bits_remaining() >= bits
    }

    /// Reads a single bit as a boolean.
    pub fn read_bit(&mut self) -> BitResult<bool> {
        Ok(self.read_bits(1)? == 1)
    }

    /// Reads up to 64 bits as an unsigned integer, most significant bit first.
    pub fn read_bits(&mut self, bits: u8) -> BitResult<u64> {
        if bits > BitError::MAX_BITS {
            return Err(BitError::InvalidBitCount { bits });
        }
        if bits == 0 {
            return Ok(0);
        }
        let available = self.bits_remaining();
        if bits as usize > available {
            return Err(BitError::EndOfBuffer {
                position: self.bit_pos,
                requested: bits as usize,
                available,
            });
        }
        let value = raw::read_bits_at(self.data, self.bit_pos, bits);
        self.bit_pos += bits as usize;
        Ok(value)
    }

    /// Returns `true` if every remaining bit is zero.
    ///
    /// Used to tell byte padding apart from leftover payload.
    #[must_use]
    pub fn remaining_is_zero(&self) -> bool {
        let mut pos = self.bit_pos;
        let end = self.bit_len;
        while pos < end {
            let width = (end - pos).min(64);
            if raw::read_bits_at(self.data, pos, width as u8) != 0 {
                return false;
            }
            pos += width;
        }
        true
    }
}
