//! Two-pass assembler for the MOS 6502.
//!
//! Pass 1 walks the source (expanding `.INCLUDE` in place), defines labels and
//! records every instruction and data block together with the program counter
//! it was placed at. Pass 2 resolves label references, which may point
//! forward, and encodes each node into the ROM image.
//!
//! ```
//! let mut asm = asm65::Assembler::new();
//! asm.add_source("main.asm", "
//!     .ORG $8000
//! loop:
//!     LDA #$10
//!     BNE loop
//! ");
//! let image = asm.pass1("main.asm").unwrap().pass2(false).unwrap();
//! assert_eq!(image.rom, [0xA9, 0x10, 0xD0, 0xFC]);
//! ```

mod assembler;
mod directive;
mod error;
mod label;
mod listing;
mod node;
mod operand;
mod source;
mod tokenizer;
mod value;

pub use assembler::{Assembler, Image, Program, ADDRESS_END};
pub use directive::Directive;
pub use error::{Error, ErrorKind, Result};
pub use label::Labels;
pub use listing::{debug_map, DebugRecord, MAX_SHOWN_BYTES};
pub use node::{DataBlock, Instruction, Node};
pub use operand::Operand;
pub use source::{Pos, Sources};
pub use tokenizer::Line;
pub use value::{Term, Trunc, Value, Width};

/// Assembles the file at `path`, reading it and its includes from disk.
pub fn assemble(path: &str, debug: bool) -> Result<Image> {
    Assembler::new().pass1(path)?.pass2(debug)
}
