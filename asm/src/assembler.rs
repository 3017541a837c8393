use arch6502::Mnemonic;

use crate::directive::Directive;
use crate::error::{ErrorKind, Result};
use crate::label::Labels;
use crate::listing::DebugRecord;
use crate::node::{Instruction, Node};
use crate::source::{Pos, Sources};
use crate::tokenizer::Line;

/// One past the last addressable byte.
pub const ADDRESS_END: u32 = 0x1_0000;

pub(crate) fn check_address(addr: u32, pos: &Pos) -> Result<()> {
    if addr > ADDRESS_END {
        return Err(ErrorKind::AddressRange(addr).at(pos));
    }
    Ok(())
}

/// Include sites of the innermost file on `stack`, innermost first.
pub(crate) fn include_sites(stack: &[Pos]) -> Vec<Pos> {
    stack.iter().rev().skip(1).cloned().collect()
}

// ----------------------------------------------------------------------------
// Pass 1

/// Pass 1 state: collects labels and emittable nodes while tracking the
/// program counter.
#[derive(Debug, Default)]
pub struct Assembler {
    pub(crate) sources: Sources,
    pub(crate) labels: Labels,
    pub(crate) nodes: Vec<Node>,
    pub(crate) pc: u32,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an in-memory source file, used instead of reading `name`
    /// from disk.
    pub fn add_source(&mut self, name: &str, text: &str) {
        self.sources.add_text(name, text);
    }

    /// Registers an in-memory binary file for `.INCBIN`.
    pub fn add_binary(&mut self, name: &str, bytes: Vec<u8>) {
        self.sources.add_binary(name, bytes);
    }

    /// Runs pass 1 over `path` and everything it includes.
    ///
    /// On success the label table is complete and frozen into a [`Program`].
    pub fn pass1(mut self, path: &str) -> Result<Program> {
        let mut stack = vec![];
        let lines = self.open(path, &Pos::new(path, 0), &stack)?;
        self.read_lines(path, &lines, &mut stack)?;
        Ok(Program {
            sources: self.sources,
            labels: self.labels,
            nodes: self.nodes,
        })
    }

    pub(crate) fn set_pc(&mut self, addr: u32, pos: &Pos) -> Result<()> {
        check_address(addr, pos)?;
        self.pc = addr;
        Ok(())
    }

    pub(crate) fn advance(&mut self, len: u32, pos: &Pos) -> Result<()> {
        let pc = self.pc.saturating_add(len);
        self.set_pc(pc, pos)
    }

    /// Loads the lines of `path`, refusing files already being assembled.
    pub(crate) fn open(&mut self, path: &str, site: &Pos, stack: &[Pos]) -> Result<Vec<String>> {
        if stack.iter().any(|frame| frame.file == path) {
            return Err(ErrorKind::RecursiveInclude(path.to_string()).at(site));
        }
        self.sources
            .load_text(path)
            .map(|lines| lines.to_vec())
            .map_err(|err| ErrorKind::FileNotFound(path.to_string(), err).at(site))
    }

    /// The line loop. `stack` holds the current position of every file being
    /// assembled, outermost first.
    pub(crate) fn read_lines(
        &mut self,
        path: &str,
        lines: &[String],
        stack: &mut Vec<Pos>,
    ) -> Result<()> {
        stack.push(Pos::new(path, 0));
        for (idx, raw) in lines.iter().enumerate() {
            let pos = Pos::new(path, idx + 1);
            if let Some(frame) = stack.last_mut() {
                frame.line = pos.line;
            }
            self.read_line(raw, &pos, stack)
                .map_err(|err| err.with_text(&pos, raw))?;
        }
        stack.pop();
        Ok(())
    }

    fn read_line(&mut self, raw: &str, pos: &Pos, stack: &mut Vec<Pos>) -> Result<()> {
        let line = Line::parse(raw, pos)?;

        if let Some(label) = line.label {
            self.labels.define(label, pos, self.pc)?;
        }

        let Some(op) = line.op else {
            return Ok(());
        };

        if let Some(mnemonic) = Mnemonic::parse(op) {
            let mut inst = Instruction::parse(mnemonic, line.param, self.pc, pos)?;
            inst.includes = include_sites(stack);
            self.advance(inst.len(), pos)?;
            self.nodes.push(Node::Inst(inst));
        } else if let Ok(directive) = op.parse::<Directive>() {
            self.directive(directive, line.param, pos, stack)?;
        } else {
            return Err(ErrorKind::UnknownMnemonic(op.to_string()).at(pos));
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Pass 2

/// Output of pass 1: every label is known and nothing can be added anymore.
#[derive(Debug)]
pub struct Program {
    sources: Sources,
    labels: Labels,
    nodes: Vec<Node>,
}

/// Assembled ROM bytes, plus one debug record per node when requested.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Image {
    pub rom: Vec<u8>,
    pub records: Vec<DebugRecord>,
}

impl Program {
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Resolves every node to bytes, in source order.
    pub fn pass2(&self, debug: bool) -> Result<Image> {
        let mut image = Image::default();
        for node in &self.nodes {
            let bytes = node.encode(&self.labels).map_err(|mut err| {
                err.text = self.sources.line(&err.pos).map(str::to_string);
                err.includes = node.includes().to_vec();
                err
            })?;
            if debug {
                let text = self.sources.line(node.pos()).unwrap_or("");
                let record = DebugRecord::new(image.rom.len(), node, text, &bytes);
                image.records.push(record);
            }
            image.rom.extend(bytes);
        }
        Ok(image)
    }
}
