use indexmap::IndexMap;
use std::fmt;

/// A line in a source file. `line` is 1-based; 0 means "the file itself".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pos {
    pub file: String,
    pub line: usize,
}

impl Pos {
    pub fn new(file: &str, line: usize) -> Self {
        Pos {
            file: file.to_string(),
            line,
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Source text and binary blobs by file name.
///
/// Files are read from disk on first use unless they were registered
/// beforehand, which is how tests feed sources in memory.
#[derive(Debug, Default, Clone)]
pub struct Sources {
    texts: IndexMap<String, Vec<String>>,
    binaries: IndexMap<String, Vec<u8>>,
}

impl Sources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_text(&mut self, name: &str, text: &str) {
        let lines = text.lines().map(str::to_string).collect();
        self.texts.insert(name.to_string(), lines);
    }

    pub fn add_binary(&mut self, name: &str, bytes: Vec<u8>) {
        self.binaries.insert(name.to_string(), bytes);
    }

    pub fn load_text(&mut self, name: &str) -> std::io::Result<&[String]> {
        if !self.texts.contains_key(name) {
            let text = std::fs::read_to_string(name)?;
            self.add_text(name, &text);
        }
        Ok(&self.texts[name])
    }

    pub fn load_binary(&mut self, name: &str) -> std::io::Result<&[u8]> {
        if !self.binaries.contains_key(name) {
            let bytes = std::fs::read(name)?;
            self.add_binary(name, bytes);
        }
        Ok(&self.binaries[name])
    }

    /// Raw text of the line at `pos`, if it was loaded.
    pub fn line(&self, pos: &Pos) -> Option<&str> {
        let idx = pos.line.checked_sub(1)?;
        self.texts
            .get(&pos.file)
            .and_then(|lines| lines.get(idx))
            .map(|s| s.as_str())
    }
}
