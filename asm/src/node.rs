use arch6502::{Mnemonic, Mode};

use crate::error::{ErrorKind, Result};
use crate::label::Labels;
use crate::operand::Operand;
use crate::source::Pos;
use crate::value::Value;

// ----------------------------------------------------------------------------
// Instruction

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub operand: Operand,
    /// Address of the opcode byte.
    pub pc: u32,
    pub pos: Pos,
    /// `.INCLUDE` sites leading to `pos`, innermost first.
    pub includes: Vec<Pos>,
}

impl Instruction {
    pub fn parse(mnemonic: Mnemonic, param: Option<&str>, pc: u32, pos: &Pos) -> Result<Self> {
        let operand = Operand::parse(param, mnemonic.is_branch(), pos)?;
        Ok(Instruction {
            mnemonic,
            operand,
            pc,
            pos: pos.clone(),
            includes: vec![],
        })
    }

    /// Opcode plus operand bytes. Fixed from the syntax alone, so pass 1
    /// can advance the program counter before any label is known.
    pub fn len(&self) -> u32 {
        1 + self.operand.len()
    }

    pub fn encode(&self, labels: &Labels) -> Result<Vec<u8>> {
        let mode = self.operand.mode;
        let opcode = arch6502::encode(self.mnemonic, mode).ok_or_else(|| {
            ErrorKind::InvalidAddressingMode(format!("{} does not support {}", self.mnemonic, mode))
                .at(&self.pos)
        })?;

        let mut bytes = vec![opcode];
        match (mode, &self.operand.value) {
            (Mode::Implied, _) | (_, None) => {}
            (Mode::Relative, Some(target)) => {
                let target = target.resolve(labels)?;
                let offset = target as i64 - self.pc as i64 - 2;
                if !(-128..=127).contains(&offset) {
                    return Err(ErrorKind::BranchRange(offset).at(&self.pos));
                }
                bytes.push(offset.rem_euclid(256) as u8);
            }
            (_, Some(value)) => bytes.extend(value.bytes(labels)?),
        }

        debug_assert_eq!(bytes.len() as u32, self.len(), "{}", self.pos);
        Ok(bytes)
    }
}

// ----------------------------------------------------------------------------
// Data

/// Raw values from `.DB`, `.DW`, `.PAD` and `.INCBIN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBlock {
    pub values: Vec<Value>,
    pub pos: Pos,
    pub includes: Vec<Pos>,
}

impl DataBlock {
    pub fn len(&self) -> u32 {
        self.values.iter().map(|v| v.width.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn encode(&self, labels: &Labels) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.len() as usize);
        for value in &self.values {
            bytes.extend(value.bytes(labels)?);
        }
        Ok(bytes)
    }
}

// ----------------------------------------------------------------------------
// Node

/// Anything that emits bytes into the image, recorded in pass 1 and encoded
/// in pass 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Inst(Instruction),
    Data(DataBlock),
}

impl Node {
    pub fn len(&self) -> u32 {
        match self {
            Node::Inst(inst) => inst.len(),
            Node::Data(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pos(&self) -> &Pos {
        match self {
            Node::Inst(inst) => &inst.pos,
            Node::Data(data) => &data.pos,
        }
    }

    pub fn includes(&self) -> &[Pos] {
        match self {
            Node::Inst(inst) => &inst.includes,
            Node::Data(data) => &data.includes,
        }
    }

    pub fn encode(&self, labels: &Labels) -> Result<Vec<u8>> {
        match self {
            Node::Inst(inst) => inst.encode(labels),
            Node::Data(data) => data.encode(labels),
        }
    }

    /// `LDA imm`, `BNE off`, or `values` for raw data.
    pub fn describe(&self) -> String {
        match self {
            Node::Inst(inst) => format!("{} {}", inst.mnemonic, inst.operand.mode),
            Node::Data(_) => "values".to_string(),
        }
    }
}
