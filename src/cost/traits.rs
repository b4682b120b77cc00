//! The `Cost` trait and its scalar implementations.

use std::fmt::Debug;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A value the search engine can accumulate along a path.
///
/// ## Contract
///
/// - `identity().combine(x) == x` for every cost `x`.
/// - `combine` is associative, never decreases a cost and saturates at the
///   type's upper limit instead of overflowing.
/// - Every cost a policy can produce orders strictly below `maximum()`
///   under the comparator in use.
///
/// Ordering is deliberately not part of this trait. The engine orders costs
/// through a [`CostComparator`](super::CostComparator) so that vector costs
/// can be ranked by tunable rules instead of a fixed `Ord`.
pub trait Cost: Clone + Debug + Add<Output = Self> {
    /// The additive identity (cost of the empty path).
    fn identity() -> Self;

    /// The "infinity" sentinel: worse than any reachable cost.
    fn maximum() -> Self;

    /// Multiply this cost by a non-negative factor.
    #[must_use]
    fn scale(&self, factor: u32) -> Self;

    /// Saturating sum of two costs. The engine accumulates path and
    /// heuristic costs only through this method.
    #[must_use]
    fn combine(&self, other: &Self) -> Self;
}

macro_rules! impl_scalar_cost {
    ($($ty:ty),*) => {
        $(
            impl Cost for $ty {
                #[inline]
                fn identity() -> Self {
                    0
                }

                #[inline]
                fn maximum() -> Self {
                    <$ty>::MAX
                }

                #[inline]
                fn scale(&self, factor: u32) -> Self {
                    self.saturating_mul(factor as $ty)
                }

                #[inline]
                fn combine(&self, other: &Self) -> Self {
                    self.saturating_add(*other)
                }
            }
        )*
    };
}

impl_scalar_cost!(u32, u64, usize);

/// The two sentinels a search runs with.
///
/// Defaults come from [`Cost::identity`] and [`Cost::maximum`]; callers can
/// override them per engine via
/// [`SearchEngine::with_bounds`](crate::search::SearchEngine::with_bounds).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBounds<C> {
    /// Cost assigned to the start state.
    pub identity: C,
    /// Cost reported for states the search has not reached.
    pub maximum: C,
}

impl<C: Cost> CostBounds<C> {
    /// Bounds supplied by the cost type itself.
    #[must_use]
    pub fn natural() -> Self {
        Self {
            identity: C::identity(),
            maximum: C::maximum(),
        }
    }

    /// Explicit bounds.
    #[must_use]
    pub fn new(identity: C, maximum: C) -> Self {
        Self { identity, maximum }
    }
}

impl<C: Cost> Default for CostBounds<C> {
    fn default() -> Self {
        Self::natural()
    }
}
