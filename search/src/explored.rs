//! Explored (closed) set.

use std::collections::HashSet;
use std::hash::Hash;

/// States that have been popped from the frontier and expanded.
///
/// Membership is permanent for one search invocation: there is no removal.
#[derive(Debug)]
pub struct ExploredSet<K> {
    states: HashSet<K>,
}

impl<K: Eq + Hash> ExploredSet<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: HashSet::new(),
        }
    }

    /// Whether `state` has already been expanded.
    #[must_use]
    pub fn contains(&self, state: &K) -> bool {
        self.states.contains(state)
    }

    /// Mark `state` as expanded. Returns `false` if it already was.
    pub fn insert(&mut self, state: K) -> bool {
        self.states.insert(state)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<K: Eq + Hash> Default for ExploredSet<K> {
    fn default() -> Self {
        Self::new()
    }
}
