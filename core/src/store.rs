//! In-memory holder of the last applied list.

use crate::types::Item;

/// The current list, replaced wholesale on every applied fetch.
///
/// There is no add/remove/reorder API: every change comes from the server.
#[derive(Debug, Default)]
pub struct StateStore {
    items: Vec<Item>,
    applied_seq: Option<u64>,
    dirty: bool,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Overwrite the list unconditionally and mark it for rendering.
    pub fn replace_all(&mut self, items: Vec<Item>) {
        self.items = items;
        self.dirty = true;
    }

    /// Replace the list with the result of fetch `seq`, unless a fetch with an
    /// equal or higher sequence number has already been applied.
    ///
    /// Returns `false` for a stale result; the store is left untouched.
    pub fn apply(&mut self, seq: u64, items: Vec<Item>) -> bool {
        if self.applied_seq.is_some_and(|applied| seq <= applied) {
            return false;
        }
        self.applied_seq = Some(seq);
        self.replace_all(items);
        true
    }

    pub fn applied_seq(&self) -> Option<u64> {
        self.applied_seq
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and reset the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(texts: &[&str]) -> Vec<Item> {
        texts.iter().copied().map(Item::from).collect()
    }

    #[test]
    fn starts_empty_and_clean() {
        let store = StateStore::new();
        assert!(store.items().is_empty());
        assert!(!store.is_dirty());
        assert_eq!(store.applied_seq(), None);
    }

    #[test]
    fn replace_all_overwrites_and_marks_dirty() {
        let mut store = StateStore::new();
        store.replace_all(items(&["a", "b"]));
        store.replace_all(items(&["c"]));
        assert_eq!(store.items(), items(&["c"]).as_slice());
        assert!(store.take_dirty());
        assert!(!store.take_dirty());
    }

    #[test]
    fn apply_discards_stale_results() {
        let mut store = StateStore::new();
        assert!(store.apply(2, items(&["newer"])));
        store.take_dirty();

        assert!(!store.apply(1, items(&["older"])));
        assert!(!store.apply(2, items(&["same seq"])));
        assert_eq!(store.items(), items(&["newer"]).as_slice());
        assert!(!store.is_dirty());
        assert_eq!(store.applied_seq(), Some(2));
    }

    #[test]
    fn apply_accepts_gaps_in_sequence() {
        let mut store = StateStore::new();
        assert!(store.apply(1, items(&["a"])));
        assert!(store.apply(5, items(&["a", "b"])));
        assert_eq!(store.applied_seq(), Some(5));
    }
}
