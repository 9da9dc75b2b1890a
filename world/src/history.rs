use std::collections::VecDeque;

/// Bounded stack of snapshots used for multi-level undo.
///
/// Entries are ordered oldest first. Once `max_depth` entries are stored,
/// each push evicts the oldest one. A depth of zero stores nothing.
#[derive(Clone, Debug)]
pub struct HistoryStack<T> {
    entries: VecDeque<T>,
    max_depth: usize,
}

impl<T> HistoryStack<T> {
    /// Creates an empty stack holding at most `max_depth` entries.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Appends `entry`, evicting the oldest entry when the stack is full.
    pub fn push(&mut self, entry: T) {
        if self.max_depth == 0 {
            return;
        }
        if self.entries.len() == self.max_depth {
            let _ = self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Removes and returns the most recent entry.
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop_back()
    }

    /// Most recent entry, without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.entries.back()
    }

    /// Discards every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether no entry is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries kept.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Iterates the stored entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}
