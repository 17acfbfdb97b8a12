//! MSB-first bit packing primitives for quizshare result tokens.
//!
//! This crate provides [`BitWriter`] and [`BitReader`] for bit-level encoding
//! and decoding of arbitrary-width unsigned fields, plus the position-threaded
//! [`write_bits_at`] / [`read_bits_at`] functions they are built on.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Pre-sized buffers** - Writers never reallocate; size the buffer with [`bytes_for_bits`].
//! - **No domain knowledge** - This crate knows nothing about quizzes or results.
//! - **Width masking** - Values are masked to their declared width; range policy lives above.
//!
//! # Example
//!
//! ```
//! use bitstream::{bytes_for_bits, BitReader, BitWriter};
//!
//! let mut buf = vec![0u8; bytes_for_bits(1 + 7)];
//! let mut writer = BitWriter::new(&mut buf);
//! writer.write_bit(true).unwrap();
//! writer.write_bits(42, 7).unwrap();
//! let used = writer.finish();
//!
//! let mut reader = BitReader::new(&buf[..used]);
//! assert!(reader.read_bit().unwrap());
//! assert_eq!(reader.read_bits(7).unwrap(), 42);
//! ```

mod error;
mod raw;
mod reader;
mod writer;

pub use error::{BitError, BitResult};
pub use raw::{bytes_for_bits, read_bits_at, write_bits_at};
pub use reader::BitReader;
pub use writer::BitWriter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_roundtrip() {
        let mut buf = [0u8; 0];
        let writer = BitWriter::new(&mut buf);
        assert_eq!(writer.finish(), 0);

        let reader = BitReader::new(&buf);
        assert!(reader.is_empty());
    }

    #[test]
    fn multiple_bools_roundtrip() {
        let mut buf = [0u8; 1];
        let mut writer = BitWriter::new(&mut buf);
        for bit in [true, false, true, true, false] {
            writer.write_bit(bit).unwrap();
        }
        let used = writer.finish();

        let mut reader = BitReader::new(&buf[..used]);
        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
    }

    #[test]
    fn bits_roundtrip_various_sizes() {
        let test_cases = [
            (0b1010u64, 4),
            (0x3FFu64, 10),
            (0x3FFFu64, 14),
            (0xFFFFu64, 16),
            (0x1234_5678u64, 32),
            (u64::MAX, 64),
        ];

        for (value, bits) in test_cases {
            let mut buf = vec![0u8; bytes_for_bits(bits as usize)];
            let mut writer = BitWriter::new(&mut buf);
            writer.write_bits(value, bits).unwrap();
            let used = writer.finish();

            let mut reader = BitReader::new(&buf[..used]);
            let read_value = reader.read_bits(bits).unwrap();
            assert_eq!(
                read_value, value,
                "roundtrip failed for {bits}-bit value {value}"
            );
        }
    }

    #[test]
    fn record_shaped_roundtrip() {
        // version(8) lang(1) total(16) then one 42-bit record
        let total_bits = 8 + 1 + 16 + 10 + 4 + 1 + 10 + 3 + 14;
        let mut buf = vec![0u8; bytes_for_bits(total_bits)];
        let mut writer = BitWriter::new(&mut buf);
        writer.write_bits(7, 8).unwrap();
        writer.write_bit(true).unwrap();
        writer.write_bits(1000, 16).unwrap();
        writer.write_bits(512, 10).unwrap();
        writer.write_bits(3, 4).unwrap();
        writer.write_bit(true).unwrap();
        writer.write_bits(13, 10).unwrap();
        writer.write_bits(2, 3).unwrap();
        writer.write_bits(16383, 14).unwrap();
        assert_eq!(writer.bits_remaining(), buf_len_bits(total_bits) - total_bits);
        let used = writer.finish();
        assert_eq!(used, 9);

        let mut reader = BitReader::new(&buf);
        assert_eq!(reader.read_bits(8).unwrap(), 7);
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_bits(16).unwrap(), 1000);
        assert_eq!(reader.read_bits(10).unwrap(), 512);
        assert_eq!(reader.read_bits(4).unwrap(), 3);
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_bits(10).unwrap(), 13);
        assert_eq!(reader.read_bits(3).unwrap(), 2);
        assert_eq!(reader.read_bits(14).unwrap(), 16383);
        assert!(reader.remaining_is_zero());
    }

    fn buf_len_bits(bits: usize) -> usize {
        bytes_for_bits(bits) * 8
    }
}
