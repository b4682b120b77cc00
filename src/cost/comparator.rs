//! Cost comparators.
//!
//! The engine ranks costs only through [`CostComparator`]. A comparator must
//! be a strict weak ordering: irreflexive, transitive, and with
//! incomparability transitive as well.

use std::cmp::Ordering;

use super::vector::{PenaltyKind, PenaltyVector};

/// Strict "less than" over costs.
pub trait CostComparator<C>: Send + Sync {
    /// Returns `true` if `a` ranks strictly better (cheaper) than `b`.
    fn less(&self, a: &C, b: &C) -> bool;
}

/// The cost type's own `<`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl<C: PartialOrd> CostComparator<C> for NaturalOrder {
    #[inline]
    fn less(&self, a: &C, b: &C) -> bool {
        a < b
    }
}

/// Compares penalty vectors one component at a time in priority order.
///
/// Components not listed are ignored. Useful when one concern must dominate
/// all others regardless of magnitude (e.g. never lose a unit).
#[derive(Clone, Debug)]
pub struct Lexicographic {
    priority: Vec<PenaltyKind>,
}

impl Lexicographic {
    /// Create a comparator that checks `priority[0]` first.
    pub fn new(priority: impl IntoIterator<Item = PenaltyKind>) -> Self {
        Self {
            priority: priority.into_iter().collect(),
        }
    }

    /// The priority order.
    #[must_use]
    pub fn priority(&self) -> &[PenaltyKind] {
        &self.priority
    }

    fn compare(&self, a: &PenaltyVector, b: &PenaltyVector) -> Ordering {
        self.priority
            .iter()
            .map(|&kind| a.get(kind).cmp(&b.get(kind)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl Default for Lexicographic {
    fn default() -> Self {
        Self::new(PenaltyKind::ALL)
    }
}

impl CostComparator<PenaltyVector> for Lexicographic {
    fn less(&self, a: &PenaltyVector, b: &PenaltyVector) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}
