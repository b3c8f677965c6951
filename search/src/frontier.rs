//! Best-first frontier (open set) with a state index.
//!
//! An indexed binary min-heap: the heap is a `Vec` of entries ordered by
//! [`FrontierKey`], and a `HashMap` maps each open state to its current heap
//! position. Every swap updates both sides, so the index never goes stale.
//! This gives O(log n) insert, extract-min, replace and arbitrary removal,
//! and O(1) cost lookup by state. At most one entry per state is open.

use std::collections::HashMap;
use std::hash::Hash;

use crate::contract::Cost;
use crate::node::{FrontierKey, NodeId};

/// An open node: its state key, ordering key and arena handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry<K> {
    pub state: K,
    pub key: FrontierKey,
    pub node: NodeId,
}

/// Best-first frontier manager.
pub struct Frontier<K> {
    heap: Vec<FrontierEntry<K>>,
    index: HashMap<K, usize>,
    high_water: usize,
}

impl<K: Clone + Eq + Hash> Frontier<K> {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            index: HashMap::new(),
            high_water: 0,
        }
    }

    /// Insert a new open entry.
    ///
    /// Returns `false` (and leaves the frontier untouched) if the state is
    /// already open; use [`Frontier::replace`] for that case.
    pub fn insert(&mut self, entry: FrontierEntry<K>) -> bool {
        if self.index.contains_key(&entry.state) {
            return false;
        }
        let pos = self.heap.len();
        self.index.insert(entry.state.clone(), pos);
        self.heap.push(entry);
        self.sift_up(pos);
        self.high_water = self.high_water.max(self.heap.len());
        true
    }

    /// Remove and return the entry with the smallest key.
    pub fn extract_min(&mut self) -> Option<FrontierEntry<K>> {
        if self.heap.is_empty() {
            return None;
        }
        Some(self.remove_at(0))
    }

    /// Borrow the entry with the smallest key without removing it.
    #[must_use]
    pub fn peek_min(&self) -> Option<&FrontierEntry<K>> {
        self.heap.first()
    }

    /// `(g, f)` of the open entry for `state`, if any.
    #[must_use]
    pub fn peek_cost(&self, state: &K) -> Option<(Cost, Cost)> {
        self.get(state).map(|e| (e.key.g, e.key.f))
    }

    /// Borrow the open entry for `state`, if any.
    #[must_use]
    pub fn get(&self, state: &K) -> Option<&FrontierEntry<K>> {
        self.index.get(state).map(|&pos| &self.heap[pos])
    }

    /// Whether `state` is currently open.
    #[must_use]
    pub fn contains(&self, state: &K) -> bool {
        self.index.contains_key(state)
    }

    /// Atomically swap whatever entry represents `entry.state` for `entry`.
    ///
    /// Returns the displaced entry (`None` if the state was not open, in which
    /// case this is a plain insert).
    pub fn replace(&mut self, entry: FrontierEntry<K>) -> Option<FrontierEntry<K>> {
        let displaced = self.remove(&entry.state);
        let inserted = self.insert(entry);
        debug_assert!(inserted, "state is not open after removal");
        displaced
    }

    /// Remove the open entry for `state`, wherever it sits in the heap.
    pub fn remove(&mut self, state: &K) -> Option<FrontierEntry<K>> {
        let pos = *self.index.get(state)?;
        Some(self.remove_at(pos))
    }

    /// Current frontier size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the frontier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Check the heap property and that the index matches heap positions
    /// one-to-one.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if self.index.len() != self.heap.len() {
            return false;
        }
        self.heap.iter().enumerate().all(|(pos, entry)| {
            let indexed = self.index.get(&entry.state) == Some(&pos);
            let ordered = pos == 0 || self.heap[(pos - 1) / 2].key <= entry.key;
            indexed && ordered
        })
    }

    fn remove_at(&mut self, pos: usize) -> FrontierEntry<K> {
        let entry = self.heap.swap_remove(pos);
        self.index.remove(&entry.state);
        if pos < self.heap.len() {
            self.set_position(pos);
            let pos = self.sift_up(pos);
            self.sift_down(pos);
        }
        entry
    }

    fn set_position(&mut self, pos: usize) {
        if let Some(slot) = self.index.get_mut(&self.heap[pos].state) {
            *slot = pos;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.set_position(a);
        self.set_position(b);
    }

    fn sift_up(&mut self, mut pos: usize) -> usize {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.heap[pos].key >= self.heap[parent].key {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
        pos
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.heap[left].key < self.heap[smallest].key {
                smallest = left;
            }
            if right < len && self.heap[right].key < self.heap[smallest].key {
                smallest = right;
            }
            if smallest == pos {
                return;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }
}

impl<K: Clone + Eq + Hash> Default for Frontier<K> {
    fn default() -> Self {
        Self::new()
    }
}
