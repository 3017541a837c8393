use color_print::cprintln;
use thiserror::Error;

use crate::source::Pos;

#[derive(Error, Debug)]
pub enum ErrorKind {
    #[error("Syntax error: {0}")]
    Parse(String),

    #[error("Bad value: `{0}`")]
    BadValue(String),

    #[error("Label already exists: `{0}`")]
    DuplicateLabel(String),

    #[error("Label not found: `{0}`")]
    UndefinedLabel(String),

    #[error("Invalid addressing mode: {0}")]
    InvalidAddressingMode(String),

    #[error("Branch destination out of range: offset {0} does not fit in -128..=127")]
    BranchRange(i64),

    #[error("Expression must be a constant: `{0}`")]
    NonConstant(String),

    #[error("Invalid instruction: `{0}`")]
    UnknownMnemonic(String),

    #[error("File not found: {0}")]
    FileNotFound(String, #[source] std::io::Error),

    #[error("Byte out of range: 0x{0:X}")]
    ByteRange(u32),

    #[error("Address out of range: 0x{0:X}")]
    AddressRange(u32),

    #[error("Recursive include: {0}")]
    RecursiveInclude(String),
}

impl ErrorKind {
    pub fn at(self, pos: &Pos) -> Error {
        Error {
            pos: pos.clone(),
            kind: self,
            text: None,
            includes: vec![],
        }
    }
}

/// A fatal assembly error and where it happened.
#[derive(Error, Debug)]
#[error("{pos}: {kind}")]
pub struct Error {
    pub pos: Pos,
    pub kind: ErrorKind,
    /// Source line at `pos`, when it could be read.
    pub text: Option<String>,
    /// Include sites leading to `pos`, innermost first.
    pub includes: Vec<Pos>,
}

impl Error {
    /// Attaches the raw source line if the error points at `pos`.
    pub fn with_text(mut self, pos: &Pos, text: &str) -> Self {
        if self.text.is_none() && self.pos == *pos {
            self.text = Some(text.to_string());
        }
        self
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self) {
        cprintln!("<red,bold>error</>: {}", self.kind);
        cprintln!("     <blue>--></> <underline>{}</>", self.pos);
        if let Some(text) = &self.text {
            cprintln!("      <blue>|</>");
            cprintln!(" <blue>{:>4} |</> {}", self.pos.line, text);
            cprintln!("      <blue>|</>");
        }
        for site in &self.includes {
            cprintln!("<green,bold>note</>: included from <underline>{}</>", site);
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
