//! Arena of discovered states.
//!
//! Every distinct state the search reaches is stored once in a flat `Vec`
//! and referenced by a `StateId` index. Per-state bookkeeping (costs,
//! predecessor, closed flag) lives in parallel tables keyed by the same
//! index, so the hot loop never hashes a state twice.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Index into the [`StateArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(pub u32);

impl StateId {
    /// The start state is always interned first.
    pub const START: StateId = StateId(0);

    /// Create a new state ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StateId({})", self.0)
    }
}

/// Interning store for search states.
///
/// IDs are handed out in discovery order, which is what makes iteration
/// over the arena (and therefore the cost-table snapshot) deterministic.
#[derive(Clone, Debug)]
pub struct StateArena<S> {
    states: Vec<S>,
    index: FxHashMap<S, StateId>,
}

impl<S: Clone + Eq + Hash> StateArena<S> {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Create an arena with room for `capacity` states.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            states: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Store a state, returning its ID and whether it was new.
    pub fn intern(&mut self, state: S) -> (StateId, bool) {
        if let Some(&id) = self.index.get(&state) {
            return (id, false);
        }
        let id = StateId::new(self.states.len() as u32);
        self.index.insert(state.clone(), id);
        self.states.push(state);
        (id, true)
    }

    /// Look up the ID of a previously interned state.
    #[inline]
    #[must_use]
    pub fn id_of(&self, state: &S) -> Option<StateId> {
        self.index.get(state).copied()
    }

    /// Get a state by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: StateId) -> &S {
        &self.states[id.index()]
    }

    /// Number of interned states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check if the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterate `(id, state)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (StateId, &S)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (StateId::new(i as u32), s))
    }
}

impl<S: Clone + Eq + Hash> Default for StateArena<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_assigns_discovery_order() {
        let mut arena = StateArena::new();
        assert_eq!(arena.intern("a"), (StateId::START, true));
        assert_eq!(arena.intern("b"), (StateId::new(1), true));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_intern_deduplicates() {
        let mut arena = StateArena::new();
        let (first, _) = arena.intern(7u32);
        let (again, is_new) = arena.intern(7u32);

        assert_eq!(first, again);
        assert!(!is_new);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_lookup() {
        let mut arena = StateArena::with_capacity(4);
        arena.intern(10u32);
        arena.intern(20u32);

        assert_eq!(arena.id_of(&20), Some(StateId::new(1)));
        assert_eq!(arena.id_of(&30), None);
        assert_eq!(*arena.get(StateId::START), 10);
    }

    #[test]
    fn test_iter_order() {
        let mut arena = StateArena::new();
        for s in [3u8, 1, 2] {
            arena.intern(s);
        }
        let order: Vec<u8> = arena.iter().map(|(_, &s)| s).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn test_state_id_display() {
        assert_eq!(StateId::new(5).to_string(), "StateId(5)");
    }
}
