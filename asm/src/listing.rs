use color_print::cformat;
use std::fmt;

use crate::node::Node;
use crate::source::Pos;

/// Bytes shown per record before the list is cut with `...`.
pub const MAX_SHOWN_BYTES: usize = 32;

/// Where a node's bytes landed in the image and which line produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugRecord {
    /// Offset into the ROM image, not the program counter.
    pub offset: usize,
    pub pos: Pos,
    /// Source line without its comment.
    pub text: String,
    pub desc: String,
    pub bytes: Vec<u8>,
}

impl DebugRecord {
    pub fn new(offset: usize, node: &Node, raw: &str, bytes: &[u8]) -> Self {
        let text = raw.split(';').next().unwrap_or("").trim().to_string();
        DebugRecord {
            offset,
            pos: node.pos().clone(),
            text,
            desc: node.describe(),
            bytes: bytes.to_vec(),
        }
    }

    fn hex(&self) -> String {
        let mut hex = self
            .bytes
            .iter()
            .take(MAX_SHOWN_BYTES)
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ");
        if self.bytes.len() > MAX_SHOWN_BYTES {
            hex.push_str(" ...");
        }
        hex
    }

    /// Colored variant of the debug map line for terminal dumps.
    pub fn cformat(&self) -> String {
        cformat!(
            "<y>{:04X}</> <blue>{:>16}</> | {:<32} <g>{:<12}</> {}",
            self.offset,
            self.pos.to_string(),
            self.text,
            self.desc,
            self.hex()
        )
    }
}

/// `0000:main.asm:3 "LDA #$10" (LDA imm) -> A9 10`
impl fmt::Display for DebugRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04X}:{}:{} \"{}\" ({}) -> {}",
            self.offset,
            self.pos.file,
            self.pos.line,
            self.text,
            self.desc,
            self.hex()
        )
    }
}

/// The debug map file: one line per record.
pub fn debug_map(records: &[DebugRecord]) -> String {
    records.iter().map(|r| format!("{r}\n")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::DataBlock;
    use crate::value::{Value, Width};

    fn data(len: usize) -> (Node, Vec<u8>) {
        let pos = Pos::new("main.asm", 4);
        let values = (0..len)
            .map(|i| Value::literal(i as u32, Width::Byte, &pos))
            .collect();
        let bytes = (0..len).map(|i| i as u8).collect();
        let block = DataBlock {
            values,
            pos,
            includes: vec![],
        };
        (Node::Data(block), bytes)
    }

    #[test]
    fn format_line() {
        let (node, bytes) = data(3);
        let record = DebugRecord::new(0x10, &node, "  .DB 0, 1, 2 ; table", &bytes);
        assert_eq!(
            record.to_string(),
            "0010:main.asm:4 \".DB 0, 1, 2\" (values) -> 00 01 02"
        );
    }

    #[test]
    fn long_blocks_are_cut() {
        let (node, bytes) = data(40);
        let record = DebugRecord::new(0, &node, ".INCBIN font.bin", &bytes);
        let line = record.to_string();
        assert!(line.ends_with("1E 1F ..."), "{line}");
        assert_eq!(record.bytes.len(), 40);

        let (node, bytes) = data(32);
        let record = DebugRecord::new(0, &node, ".INCBIN font.bin", &bytes);
        assert!(record.to_string().ends_with("1E 1F"));
    }

    #[test]
    fn empty_block() {
        let (node, bytes) = data(0);
        let record = DebugRecord::new(0x1234, &node, ".PAD $8000", &bytes);
        assert_eq!(record.to_string(), "1234:main.asm:4 \".PAD $8000\" (values) -> ");
        assert_eq!(debug_map(&[record.clone(), record]).lines().count(), 2);
    }
}
