#![no_main]

use bitstream::BitReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = BitReader::new(data);
    let mut idx = 0usize;

    // Input bytes choose the widths of a bounded run of reads.
    while idx < data.len() && idx < 1024 {
        let op = data[idx];
        idx += 1;

        match op % 4 {
            0 => {
                let _ = reader.read_bit();
            }
            1 => {
                let _ = reader.read_bits(op % 70);
            }
            2 => {
                let _ = reader.remaining_is_zero();
            }
            _ => {
                let width = [4u8, 10, 14, 16][usize::from(op >> 6)];
                let _ = reader.read_bits(width);
            }
        }
        assert!(reader.bit_position() <= data.len() * 8);
    }
});
