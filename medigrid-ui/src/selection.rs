//! Multi-select tracking by row key.

use std::collections::HashSet;
use std::hash::Hash;

/// Ordered multi-selection with O(1) membership checks.
///
/// One structure holds both the insertion-ordered key list and the hash
/// index; `ids()` is a derived view of the same data, so the two can
/// never drift apart.
///
/// Page-scoped bulk operations (`select_many`/`deselect_many`) only touch
/// the keys passed in, so selections made on other pages persist.
#[derive(Debug, Clone, Default)]
pub struct Selection<K: Clone + Eq + Hash> {
    order: Vec<K>,
    index: HashSet<K>,
}

impl<K: Clone + Eq + Hash> Selection<K> {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            index: HashSet::new(),
        }
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    /// Toggle a single key. Returns `true` if the key is now selected.
    pub fn toggle(&mut self, key: K) -> bool {
        if self.index.remove(&key) {
            self.order.retain(|k| k != &key);
            false
        } else {
            self.index.insert(key.clone());
            self.order.push(key);
            true
        }
    }

    /// Select every key in the slice that is not already selected.
    pub fn select_many(&mut self, keys: &[K]) {
        for key in keys {
            if self.index.insert(key.clone()) {
                self.order.push(key.clone());
            }
        }
    }

    /// Deselect every key in the slice.
    pub fn deselect_many(&mut self, keys: &[K]) {
        let mut removed = false;
        for key in keys {
            removed |= self.index.remove(key);
        }
        if removed {
            self.order.retain(|k| self.index.contains(k));
        }
    }

    /// Check whether every key in the slice is selected. An empty slice
    /// is not considered fully selected.
    pub fn contains_all(&self, keys: &[K]) -> bool {
        !keys.is_empty() && keys.iter().all(|k| self.index.contains(k))
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.order.clear();
        self.index.clear();
    }

    /// Selected keys in the order they were selected.
    pub fn ids(&self) -> Vec<K> {
        self.order.clone()
    }

    /// Number of selected keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
