//! Position-threaded bit access on plain byte slices.
//!
//! These are the unchecked building blocks under [`BitWriter`](crate::BitWriter)
//! and [`BitReader`](crate::BitReader). They never fail: bits past the end of
//! the slice are dropped on write and read back as zero.

/// Packs the low `width` bits of `value` into `buf` starting at `bit_pos`,
/// most significant bit first. Returns the bit position after the field.
///
/// Existing bits in the target range are overwritten.
pub fn write_bits_at(buf: &mut [u8], bit_pos: usize, value: u64, width: u8) -> usize {
    let width = width.min(64);
    let mut pos = bit_pos;
    for i in (0..width).rev() {
        let bit = (value >> i) & 1 == 1;
        if let Some(byte) = buf.get_mut(pos / 8) {
            let mask = 1u8 << (7 - (pos % 8));
            if bit {
                *byte |= mask;
            } else {
                *byte &= !mask;
            }
        }
        pos += 1;
    }
    pos
}

/// Reads `width` bits starting at `bit_pos`, most significant bit first.
///
/// Exact inverse of [`write_bits_at`].
#[must_use]
pub fn read_bits_at(buf: &[u8], bit_pos: usize, width: u8) -> u64 {
    let width = width.min(64);
    let mut value = 0u64;
    for i in 0..width as usize {
        let pos = bit_pos + i;
        let byte = buf.get(pos / 8).copied().unwrap_or(0);
        let bit = (byte >> (7 - (pos % 8))) & 1;
        value = (value << 1) | u64::from(bit);
    }
    value
}

/// Number of bytes needed to hold `bits` bits.
#[must_use]
pub const fn bytes_for_bits(bits: usize) -> usize {
    bits.div_ceil(8)
}
