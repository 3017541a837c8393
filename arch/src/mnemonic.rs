use strum::{Display, EnumCount, EnumIter, EnumString};

use crate::{mode::Mode, opcode::OpcodeRow};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumCount, EnumIter, Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Mnemonic {
    // Math
    ADC,
    AND,
    ASL,
    EOR,
    LSR,
    ORA,
    ROL,
    ROR,
    SBC,
    // Memory
    DEC,
    INC,
    LDA,
    LDX,
    LDY,
    STA,
    STX,
    STY,
    // Comparison
    BIT,
    CMP,
    CPX,
    CPY,
    // Branch
    BCC,
    BCS,
    BEQ,
    BMI,
    BNE,
    BPL,
    BVC,
    BVS,
    // Control flow
    JMP,
    JSR,
    RTI,
    RTS,
    // Register
    DEX,
    DEY,
    INX,
    INY,
    TAX,
    TAY,
    TXA,
    TYA,
    // Stack
    PHA,
    PHP,
    PLA,
    PLP,
    TSX,
    TXS,
    // Flag
    CLC,
    CLD,
    CLI,
    CLV,
    SEC,
    SED,
    SEI,
    // Misc
    BRK,
    NOP,
}

impl Mnemonic {
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Self>().ok()
    }

    /// Branches take a single target whose operand byte is a signed displacement.
    pub fn is_branch(&self) -> bool {
        use Mnemonic::*;
        matches!(self, BCC | BCS | BEQ | BMI | BNE | BPL | BVC | BVS)
    }

    pub fn opcodes(&self) -> OpcodeRow {
        use Mnemonic::*;

        // row!(Immediate = 0x69, ZeroPage = 0x65)
        macro_rules! row {
            ($($mode:ident = $byte:expr),* $(,)?) => {
                OpcodeRow::EMPTY$(.with(Mode::$mode, $byte))*
            };
        }

        match self {
            ADC => row!(
                Immediate = 0x69,
                ZeroPage = 0x65,
                ZeroPageX = 0x75,
                Absolute = 0x6D,
                AbsoluteX = 0x7D,
                AbsoluteY = 0x79,
                IndirectX = 0x61,
                IndirectY = 0x71,
            ),
            AND => row!(
                Immediate = 0x29,
                ZeroPage = 0x25,
                ZeroPageX = 0x35,
                Absolute = 0x2D,
                AbsoluteX = 0x3D,
                AbsoluteY = 0x39,
                IndirectX = 0x21,
                IndirectY = 0x31,
            ),
            ASL => row!(
                Implied = 0x0A,
                ZeroPage = 0x06,
                ZeroPageX = 0x16,
                Absolute = 0x0E,
                AbsoluteX = 0x1E,
            ),
            EOR => row!(
                Immediate = 0x49,
                ZeroPage = 0x45,
                ZeroPageX = 0x55,
                Absolute = 0x4D,
                AbsoluteX = 0x5D,
                AbsoluteY = 0x59,
                IndirectX = 0x41,
                IndirectY = 0x51,
            ),
            LSR => row!(
                Implied = 0x4A,
                ZeroPage = 0x46,
                ZeroPageX = 0x56,
                Absolute = 0x4E,
                AbsoluteX = 0x5E,
            ),
            ORA => row!(
                Immediate = 0x09,
                ZeroPage = 0x05,
                ZeroPageX = 0x15,
                Absolute = 0x0D,
                AbsoluteX = 0x1D,
                AbsoluteY = 0x19,
                IndirectX = 0x01,
                IndirectY = 0x11,
            ),
            ROL => row!(
                Implied = 0x2A,
                ZeroPage = 0x26,
                ZeroPageX = 0x36,
                Absolute = 0x2E,
                AbsoluteX = 0x3E,
            ),
            ROR => row!(
                Implied = 0x6A,
                ZeroPage = 0x66,
                ZeroPageX = 0x76,
                Absolute = 0x6E,
                AbsoluteX = 0x7E,
            ),
            SBC => row!(
                Immediate = 0xE9,
                ZeroPage = 0xE5,
                ZeroPageX = 0xF5,
                Absolute = 0xED,
                AbsoluteX = 0xFD,
                AbsoluteY = 0xF9,
                IndirectX = 0xE1,
                IndirectY = 0xF1,
            ),

            DEC => row!(ZeroPage = 0xC6, ZeroPageX = 0xD6, Absolute = 0xCE, AbsoluteX = 0xDE),
            INC => row!(ZeroPage = 0xE6, ZeroPageX = 0xF6, Absolute = 0xEE, AbsoluteX = 0xFE),
            LDA => row!(
                Immediate = 0xA9,
                ZeroPage = 0xA5,
                ZeroPageX = 0xB5,
                Absolute = 0xAD,
                AbsoluteX = 0xBD,
                AbsoluteY = 0xB9,
                IndirectX = 0xA1,
                IndirectY = 0xB1,
            ),
            LDX => row!(
                Immediate = 0xA2,
                ZeroPage = 0xA6,
                ZeroPageY = 0xB6,
                Absolute = 0xAE,
                AbsoluteY = 0xBE,
            ),
            LDY => row!(
                Immediate = 0xA0,
                ZeroPage = 0xA4,
                ZeroPageX = 0xB4,
                Absolute = 0xAC,
                AbsoluteX = 0xBC,
            ),
            STA => row!(
                ZeroPage = 0x85,
                ZeroPageX = 0x95,
                Absolute = 0x8D,
                AbsoluteX = 0x9D,
                AbsoluteY = 0x99,
                IndirectX = 0x81,
                IndirectY = 0x91,
            ),
            STX => row!(ZeroPage = 0x86, ZeroPageY = 0x96, Absolute = 0x8E),
            STY => row!(ZeroPage = 0x84, ZeroPageX = 0x94, Absolute = 0x8C),

            BIT => row!(ZeroPage = 0x24, Absolute = 0x2C),
            CMP => row!(
                Immediate = 0xC9,
                ZeroPage = 0xC5,
                ZeroPageX = 0xD5,
                Absolute = 0xCD,
                AbsoluteX = 0xDD,
                AbsoluteY = 0xD9,
                IndirectX = 0xC1,
                IndirectY = 0xD1,
            ),
            CPX => row!(Immediate = 0xE0, ZeroPage = 0xE4, Absolute = 0xEC),
            CPY => row!(Immediate = 0xC0, ZeroPage = 0xC4, Absolute = 0xCC),

            BCC => row!(Relative = 0x90),
            BCS => row!(Relative = 0xB0),
            BEQ => row!(Relative = 0xF0),
            BMI => row!(Relative = 0x30),
            BNE => row!(Relative = 0xD0),
            BPL => row!(Relative = 0x10),
            BVC => row!(Relative = 0x50),
            BVS => row!(Relative = 0x70),

            JMP => row!(Absolute = 0x4C, Indirect = 0x6C),
            JSR => row!(Absolute = 0x20),
            RTI => row!(Implied = 0x40),
            RTS => row!(Implied = 0x60),

            DEX => row!(Implied = 0xCA),
            DEY => row!(Implied = 0x88),
            INX => row!(Implied = 0xE8),
            INY => row!(Implied = 0xC8),
            TAX => row!(Implied = 0xAA),
            TAY => row!(Implied = 0xA8),
            TXA => row!(Implied = 0x8A),
            TYA => row!(Implied = 0x98),

            PHA => row!(Implied = 0x48),
            PHP => row!(Implied = 0x08),
            PLA => row!(Implied = 0x68),
            PLP => row!(Implied = 0x28),
            TSX => row!(Implied = 0xBA),
            TXS => row!(Implied = 0x9A),

            CLC => row!(Implied = 0x18),
            CLD => row!(Implied = 0xD8),
            CLI => row!(Implied = 0x58),
            CLV => row!(Implied = 0xB8),
            SEC => row!(Implied = 0x38),
            SED => row!(Implied = 0xF8),
            SEI => row!(Implied = 0x78),

            BRK => row!(Implied = 0x00),
            NOP => row!(Implied = 0xEA),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::encode;
    use strum::IntoEnumIterator;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Mnemonic::parse("lda"), Some(Mnemonic::LDA));
        assert_eq!(Mnemonic::parse("Jmp"), Some(Mnemonic::JMP));
        assert_eq!(Mnemonic::parse("XYZ"), None);
        assert_eq!(Mnemonic::parse(".ORG"), None);
        assert_eq!(Mnemonic::COUNT, 56);
    }

    #[test]
    fn branches_only_have_relative_mode() {
        for mnemonic in Mnemonic::iter() {
            let row = mnemonic.opcodes();
            assert_eq!(mnemonic.is_branch(), row.get(Mode::Relative).is_some());
            if mnemonic.is_branch() {
                assert_eq!(row.iter().count(), 1);
            }
        }
    }

    #[test]
    fn every_mnemonic_has_an_opcode() {
        for mnemonic in Mnemonic::iter() {
            assert!(mnemonic.opcodes().iter().next().is_some(), "{mnemonic}");
        }
    }

    macro_rules! test_opcode {
        ($($name:ident: $mnemonic:ident $mode:ident => $byte:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(encode(Mnemonic::$mnemonic, Mode::$mode), $byte);
                }
            )*
        }
    }

    test_opcode! {
        lda_imm: LDA Immediate => Some(0xA9),
        lda_zp: LDA ZeroPage => Some(0xA5),
        lda_abs: LDA Absolute => Some(0xAD),
        lda_zp_y: LDA ZeroPageY => None,
        ldx_zp_y: LDX ZeroPageY => Some(0xB6),
        stx_zp_x: STX ZeroPageX => None,
        sta_imm: STA Immediate => None,
        jmp_ind: JMP Indirect => Some(0x6C),
        jsr_ind: JSR Indirect => None,
        rol_acc: ROL Implied => Some(0x2A),
        inc_acc: INC Implied => None,
        brk: BRK Implied => Some(0x00),
    }
}
