//! Bit-level writer over a caller-sized buffer.

use crate::error::{BitError, BitResult};
use crate::raw;

/// Writes MSB-first bit fields into a pre-sized byte buffer.
///
/// The buffer is never grown. Callers size it with
/// [`bytes_for_bits`](crate::bytes_for_bits) from the total bit count they
/// intend to write. Values are masked to the declared width: range checking
/// belongs to the layer that knows what a field means.
#[derive(Debug)]
pub struct BitWriter<'a> {
    buf: &'a mut [u8],
    bit_pos: usize,
}

impl<'a> BitWriter<'a> {
    /// Creates a writer starting at bit 0 of `buf`.
    ///
    /// Bytes are overwritten bit by bit, so `buf` does not need to be zeroed.
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, bit_pos: 0 }
    }

    /// Returns the number of bits written so far.
    #[must_use]
    pub const fn bits_written(&self) -> usize {
        self.bit_pos
    }

    /// Returns the number of bits that can still be written.
    #[must_use]
    pub fn bits_remaining(&self) -> usize {
        self.buf.len().saturating_mul(8).saturating_sub(self.bit_pos)
    }

    /// Writes a single bit.
    pub fn write_bit(&mut self, value: bool) -> BitResult<()> {
        self.ensure_capacity(1)?;
        self.bit_pos = raw::write_bits_at(self.buf, self.bit_pos, u64::from(value), 1);
        Ok(())
    }

    /// Writes the low `bits` bits of `value`, most significant first.
    ///
    /// # Errors
    ///
    /// Returns [`BitError::InvalidBitCount`] if `bits > 64`.
    /// Returns [`BitError::BufferOverflow`] if the buffer cannot hold `bits` more bits.
    pub fn write_bits(&mut self, value: u64, bits: u8) -> BitResult<()> {
        if bits > BitError::MAX_BITS {
            return Err(BitError::InvalidBitCount { bits });
        }
        if bits == 0 {
            return Ok(());
        }
        self.ensure_capacity(bits as usize)?;
        self.bit_pos = raw::write_bits_at(self.buf, self.bit_pos, value, bits);
        Ok(())
    }

    /// Finishes writing and returns the number of bytes touched.
    ///
    /// A trailing partial byte keeps zero padding in its low bits.
    #[must_use]
    pub fn finish(self) -> usize {
        crate::bytes_for_bits(self.bit_pos)
    }

    fn ensure_capacity(&self, bits: usize) -> BitResult<()> {
        let capacity = self.bits_remaining();
        if bits > capacity {
            return Err(BitError::BufferOverflow {
                position: self.bit_pos,
                attempted: bits,
                capacity,
            });
        }
        Ok(())
    }
}
