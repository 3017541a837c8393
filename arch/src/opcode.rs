use bimap::BiMap;
use once_cell::sync::Lazy;
use strum::{EnumCount, IntoEnumIterator};

use crate::{mnemonic::Mnemonic, mode::Mode};

/// Opcode bytes of one mnemonic, one slot per addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeRow([Option<u8>; Mode::COUNT]);

impl OpcodeRow {
    pub const EMPTY: OpcodeRow = OpcodeRow([None; Mode::COUNT]);

    pub const fn with(mut self, mode: Mode, byte: u8) -> Self {
        self.0[mode as usize] = Some(byte);
        self
    }

    pub fn get(&self, mode: Mode) -> Option<u8> {
        self.0[mode.index()]
    }

    /// Supported modes with their opcode bytes, in `Mode` order.
    pub fn iter(&self) -> impl Iterator<Item = (Mode, u8)> + '_ {
        Mode::iter().filter_map(|mode| self.get(mode).map(|byte| (mode, byte)))
    }
}

// Every documented opcode byte maps to exactly one (mnemonic, mode) pair.
static TABLE: Lazy<BiMap<u8, (Mnemonic, Mode)>> = Lazy::new(|| {
    let mut table = BiMap::new();
    for mnemonic in Mnemonic::iter() {
        for (mode, byte) in mnemonic.opcodes().iter() {
            let prev = table.insert_no_overwrite(byte, (mnemonic, mode));
            assert!(prev.is_ok(), "opcode 0x{byte:02X} assigned twice");
        }
    }
    table
});

/// Opcode byte for `mnemonic` in `mode`, if the pair exists.
pub fn encode(mnemonic: Mnemonic, mode: Mode) -> Option<u8> {
    TABLE.get_by_right(&(mnemonic, mode)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_size() {
        // 151 documented NMOS opcodes
        assert_eq!(TABLE.len(), 151);
    }

    #[test]
    fn known_bytes() {
        assert_eq!(encode(Mnemonic::LDA, Mode::Immediate), Some(0xA9));
        assert_eq!(encode(Mnemonic::JMP, Mode::Indirect), Some(0x6C));
        assert_eq!(encode(Mnemonic::BNE, Mode::Relative), Some(0xD0));
        assert_eq!(encode(Mnemonic::ASL, Mode::Implied), Some(0x0A));
        assert_eq!(encode(Mnemonic::STX, Mode::ZeroPageX), None);
        assert_eq!(encode(Mnemonic::JMP, Mode::Immediate), None);
        assert_eq!(TABLE.get_by_left(&0xFF), None);
    }

    #[test]
    fn encode_agrees_with_rows() {
        for mnemonic in Mnemonic::iter() {
            for mode in Mode::iter() {
                assert_eq!(encode(mnemonic, mode), mnemonic.opcodes().get(mode));
            }
        }
    }

    #[test]
    fn row_builder() {
        let row = OpcodeRow::EMPTY
            .with(Mode::Immediate, 0x01)
            .with(Mode::Absolute, 0x02);
        assert_eq!(row.get(Mode::Immediate), Some(0x01));
        assert_eq!(row.get(Mode::ZeroPage), None);
        assert_eq!(
            row.iter().collect::<Vec<_>>(),
            vec![(Mode::Immediate, 0x01), (Mode::Absolute, 0x02)]
        );
    }
}
