//! Insertion-ordered open set.
//!
//! Members are kept in the order they were first opened. Selection scans
//! them in that order and keeps the first least element, so ties always go
//! to the state discovered earliest. A binary heap would need a total order
//! on costs; comparators here only promise a strict weak ordering, and a
//! linear scan gives the same answer on every platform.

use super::arena::StateId;

/// Open set of state IDs with O(1) membership tests.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    order: Vec<StateId>,
    member: Vec<bool>,
    high_water: usize,
}

impl Frontier {
    /// Create an empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a state. Returns `false` if it was already open.
    pub fn push(&mut self, id: StateId) -> bool {
        let idx = id.index();
        if idx >= self.member.len() {
            self.member.resize(idx + 1, false);
        }
        if self.member[idx] {
            return false;
        }
        self.member[idx] = true;
        self.order.push(id);
        self.high_water = self.high_water.max(self.order.len());
        true
    }

    /// Remove a state, keeping the order of the rest.
    pub fn remove(&mut self, id: StateId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.member[id.index()] = false;
        if let Some(pos) = self.order.iter().position(|&o| o == id) {
            self.order.remove(pos);
        }
        true
    }

    /// Check if a state is open.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: StateId) -> bool {
        self.member.get(id.index()).copied().unwrap_or(false)
    }

    /// Pick the member that no other member beats.
    ///
    /// `less(a, b)` must return `true` when `a` should be expanded before
    /// `b`. Earlier members win ties.
    pub fn select_by(&self, mut less: impl FnMut(StateId, StateId) -> bool) -> Option<StateId> {
        let mut members = self.order.iter().copied();
        let first = members.next()?;
        Some(members.fold(first, |best, id| if less(id, best) { id } else { best }))
    }

    /// Open states in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.order.iter().copied()
    }

    /// Number of open states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the frontier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Largest size the frontier has reached.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}
