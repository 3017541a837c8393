use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumCount, EnumIter, EnumString};

/// Addressing mode of an instruction operand.
///
/// The string form is the short name used in listings (`LDA imm`, `STA zp_x`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    EnumString,
    EnumCount,
    EnumIter,
    Display,
)]
#[repr(u8)]
pub enum Mode {
    /// No operand. Also covers the accumulator form (`ASL A`).
    #[strum(serialize = "implied")]
    Implied,
    /// `#value`
    #[strum(serialize = "imm")]
    Immediate,
    /// `zp`
    #[strum(serialize = "zp")]
    ZeroPage,
    /// `zp,X`
    #[strum(serialize = "zp_x")]
    ZeroPageX,
    /// `zp,Y`
    #[strum(serialize = "zp_y")]
    ZeroPageY,
    /// `abs`
    #[strum(serialize = "abs")]
    Absolute,
    /// `abs,X`
    #[strum(serialize = "abs_x")]
    AbsoluteX,
    /// `abs,Y`
    #[strum(serialize = "abs_y")]
    AbsoluteY,
    /// `(abs)`, only used by `JMP`
    #[strum(serialize = "ind")]
    Indirect,
    /// `(zp,X)`
    #[strum(serialize = "ind_x")]
    IndirectX,
    /// `(zp),Y`
    #[strum(serialize = "ind_y")]
    IndirectY,
    /// Signed displacement of a branch
    #[strum(serialize = "off")]
    Relative,
}

impl Mode {
    /// Number of operand bytes following the opcode.
    pub fn operand_len(&self) -> u32 {
        use Mode::*;
        match self {
            Implied => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY => 1,
            IndirectX | IndirectY | Relative => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 2,
        }
    }

    pub fn index(self) -> usize {
        u8::from(self) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn index_matches_iteration_order() {
        for (idx, mode) in Mode::iter().enumerate() {
            assert_eq!(mode.index(), idx);
            assert_eq!(Mode::try_from(idx as u8).ok(), Some(mode));
        }
        assert_eq!(Mode::COUNT, 12);
    }

    #[test]
    fn short_names() {
        assert_eq!(Mode::Immediate.to_string(), "imm");
        assert_eq!(Mode::IndirectY.to_string(), "ind_y");
        assert_eq!("zp_x".parse::<Mode>().ok(), Some(Mode::ZeroPageX));
        assert!("zpx".parse::<Mode>().is_err());
    }

    #[test]
    fn operand_lengths() {
        assert_eq!(Mode::Implied.operand_len(), 0);
        assert_eq!(Mode::Relative.operand_len(), 1);
        assert_eq!(Mode::IndirectX.operand_len(), 1);
        assert_eq!(Mode::Indirect.operand_len(), 2);
        assert_eq!(Mode::AbsoluteY.operand_len(), 2);
    }
}
