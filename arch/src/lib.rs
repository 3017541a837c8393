//! Instruction set tables of the NMOS 6502 (documented opcodes only).

pub mod mnemonic;
pub mod mode;
pub mod opcode;

pub use mnemonic::Mnemonic;
pub use mode::Mode;
pub use opcode::{encode, OpcodeRow};
