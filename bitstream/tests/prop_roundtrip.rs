use bitstream::{bytes_for_bits, BitReader, BitWriter};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Bit(bool),
    Bits { bits: u8, value: u64 },
}

fn mask_value(bits: u8, value: u64) -> u64 {
    if bits >= 64 {
        value
    } else {
        let mask = (1u64 << bits) - 1;
        value & mask
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(Op::Bit),
        (1u8..=64, any::<u64>()).prop_map(|(bits, value)| Op::Bits { bits, value }),
    ]
}

fn op_width(op: &Op) -> usize {
    match op {
        Op::Bit(_) => 1,
        Op::Bits { bits, .. } => *bits as usize,
    }
}

proptest! {
    #[test]
    fn prop_roundtrip_ops(ops in prop::collection::vec(op_strategy(), 1..64)) {
        let total_bits: usize = ops.iter().map(op_width).sum();
        let mut buf = vec![0u8; bytes_for_bits(total_bits)];
        let mut writer = BitWriter::new(&mut buf);

        for op in &ops {
            match op {
                Op::Bit(b) => writer.write_bit(*b).unwrap(),
                Op::Bits { bits, value } => writer.write_bits(*value, *bits).unwrap(),
            }
        }
        prop_assert_eq!(writer.bits_written(), total_bits);
        let used = writer.finish();
        prop_assert_eq!(used, buf.len());

        let mut reader = BitReader::new(&buf);
        for op in &ops {
            match op {
                Op::Bit(b) => {
                    prop_assert_eq!(reader.read_bit().unwrap(), *b);
                }
                Op::Bits { bits, value } => {
                    // Writers mask to the declared width.
                    prop_assert_eq!(reader.read_bits(*bits).unwrap(), mask_value(*bits, *value));
                }
            }
        }
        prop_assert!(reader.bits_remaining() < 8);
        prop_assert!(reader.remaining_is_zero());
    }
}
