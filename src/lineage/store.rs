use super::entry::LineageEntry;
use crate::error::IndexError;

/// Append-only history of glyph states.
///
/// Insertion order is causal order. There is no removal: restoring an old
/// state appends a new entry rather than truncating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineageStore {
    entries: Vec<LineageEntry>,
}

impl LineageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return the new length.
    pub fn append(&mut self, entry: LineageEntry) -> usize {
        self.entries.push(entry);
        self.entries.len()
    }

    pub fn all(&self) -> &[LineageEntry] {
        &self.entries
    }

    pub fn at(&self, index: usize) -> Result<&LineageEntry, IndexError> {
        self.entries.get(index).ok_or(IndexError {
            index,
            len: self.entries.len(),
        })
    }

    pub fn last(&self) -> Option<&LineageEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
