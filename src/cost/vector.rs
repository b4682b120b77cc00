//! Multi-component penalty costs.
//!
//! A [`PenaltyVector`] keeps each concern of a tactical decision in its own
//! slot instead of folding everything into one number up front. Addition is
//! component-wise and saturating; ordering is left to a comparator.

use std::fmt;
use std::ops::{Add, Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::traits::Cost;

/// Named penalty components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PenaltyKind {
    /// Opposing units still standing.
    EnemiesLeft,
    /// Hit points remaining across opposing units.
    EnemyHealth,
    /// Own units removed during the turn.
    AlliesLost,
    /// Own units left within reach of an opponent.
    AlliesAtRisk,
    /// Actions spent (tempo).
    Actions,
}

impl PenaltyKind {
    /// Number of components in a [`PenaltyVector`].
    pub const COUNT: usize = 5;

    /// Every kind, in slot order.
    pub const ALL: [PenaltyKind; Self::COUNT] = [
        PenaltyKind::EnemiesLeft,
        PenaltyKind::EnemyHealth,
        PenaltyKind::AlliesLost,
        PenaltyKind::AlliesAtRisk,
        PenaltyKind::Actions,
    ];

    /// Slot index of this kind.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short name used in debug output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PenaltyKind::EnemiesLeft => "enemies_left",
            PenaltyKind::EnemyHealth => "enemy_health",
            PenaltyKind::AlliesLost => "allies_lost",
            PenaltyKind::AlliesAtRisk => "allies_at_risk",
            PenaltyKind::Actions => "actions",
        }
    }
}

impl fmt::Display for PenaltyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fixed set of non-negative penalties, one per [`PenaltyKind`].
///
/// ## Example
///
/// ```
/// use turn_planner::cost::{PenaltyKind, PenaltyVector};
///
/// let a = PenaltyVector::of(PenaltyKind::EnemiesLeft, 2);
/// let b = PenaltyVector::of(PenaltyKind::AlliesLost, 1).with(PenaltyKind::EnemiesLeft, 1);
///
/// let sum = a + b;
/// assert_eq!(sum[PenaltyKind::EnemiesLeft], 3);
/// assert_eq!(sum[PenaltyKind::AlliesLost], 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PenaltyVector {
    components: [u32; PenaltyKind::COUNT],
}

impl PenaltyVector {
    /// All components zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            components: [0; PenaltyKind::COUNT],
        }
    }

    /// A vector with a single non-zero component.
    #[must_use]
    pub fn of(kind: PenaltyKind, amount: u32) -> Self {
        Self::zero().with(kind, amount)
    }

    /// Set one component, builder style.
    #[must_use]
    pub fn with(mut self, kind: PenaltyKind, amount: u32) -> Self {
        self.components[kind.index()] = amount;
        self
    }

    /// Get a component.
    #[inline]
    #[must_use]
    pub fn get(&self, kind: PenaltyKind) -> u32 {
        self.components[kind.index()]
    }

    /// Set a component.
    pub fn set(&mut self, kind: PenaltyKind, amount: u32) {
        self.components[kind.index()] = amount;
    }

    /// Iterate `(kind, amount)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (PenaltyKind, u32)> + '_ {
        PenaltyKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    /// Unweighted sum of all components.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.components.iter().map(|&c| u64::from(c)).sum()
    }

    /// Check if every component is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.components.iter().all(|&c| c == 0)
    }
}

impl Index<PenaltyKind> for PenaltyVector {
    type Output = u32;

    fn index(&self, kind: PenaltyKind) -> &u32 {
        &self.components[kind.index()]
    }
}

impl IndexMut<PenaltyKind> for PenaltyVector {
    fn index_mut(&mut self, kind: PenaltyKind) -> &mut u32 {
        &mut self.components[kind.index()]
    }
}

impl Add for PenaltyVector {
    type Output = PenaltyVector;

    fn add(mut self, rhs: PenaltyVector) -> PenaltyVector {
        for (lhs, rhs) in self.components.iter_mut().zip(rhs.components) {
            *lhs = lhs.saturating_add(rhs);
        }
        self
    }
}

impl Cost for PenaltyVector {
    fn identity() -> Self {
        Self::zero()
    }

    fn maximum() -> Self {
        Self {
            components: [u32::MAX; PenaltyKind::COUNT],
        }
    }

    fn scale(&self, factor: u32) -> Self {
        let mut out = *self;
        for c in &mut out.components {
            *c = c.saturating_mul(factor);
        }
        out
    }

    fn combine(&self, other: &Self) -> Self {
        *self + *other
    }
}

impl fmt::Display for PenaltyVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for (kind, amount) in self.iter().filter(|&(_, a)| a != 0) {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{kind}: {amount}")?;
            first = false;
        }
        f.write_str("}")
    }
}
