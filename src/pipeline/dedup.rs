use std::collections::HashSet;

/// Insertion-ordered set of lines: `order` holds output order, `seen` answers
/// membership. First occurrence wins.
#[derive(Debug, Default)]
pub struct Deduplicator {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the exact line was already seen in this run.
    pub fn push(&mut self, line: String) -> bool {
        if self.seen.contains(&line) {
            return false;
        }
        self.seen.insert(line.clone());
        self.order.push(line);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.order
    }
}
