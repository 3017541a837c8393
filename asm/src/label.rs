use indexmap::IndexMap;

use crate::error::{ErrorKind, Result};
use crate::source::Pos;

/// Symbol table shared by code labels and `.DEF` constants.
///
/// Names are case-sensitive and defined at most once. Iteration follows
/// definition order.
#[derive(Debug, Default, Clone)]
pub struct Labels {
    labels: IndexMap<String, (Pos, u32)>,
}

impl Labels {
    pub fn new() -> Self {
        Labels {
            labels: IndexMap::new(),
        }
    }

    pub fn define(&mut self, name: &str, pos: &Pos, value: u32) -> Result<()> {
        if self.labels.contains_key(name) {
            return Err(ErrorKind::DuplicateLabel(name.to_string()).at(pos));
        }
        self.labels.insert(name.to_string(), (pos.clone(), value));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.labels.contains_key(name)
    }

    pub fn get_val(&self, name: &str) -> Option<u32> {
        self.labels.get(name).map(|(_, val)| *val)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Pos, u32)> {
        self.labels
            .iter()
            .map(|(name, (pos, val))| (name.as_str(), pos, *val))
    }

    /// Number of defined names.
    pub fn count(&self) -> usize {
        self.labels.len()
    }
}
