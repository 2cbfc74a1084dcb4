use std::collections::HashSet;

/// Offsets of characters escaped by an unescaped backslash right before them.
///
/// Filled left to right as the scanner advances; entries are never removed.
#[derive(Debug, Default)]
pub struct EscapeSet {
    offsets: HashSet<usize>,
}

impl EscapeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the backslash at `offset - 1` escapes `offset`.
    pub fn mark(&mut self, offset: usize) {
        self.offsets.insert(offset);
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.offsets.contains(&offset)
    }
}
