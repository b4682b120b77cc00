//! Weighted-projection ("personality") comparison of penalty vectors.
//!
//! A personality turns a [`PenaltyVector`] into a single score by
//! multiplying each component by its weight and summing. Swapping weights
//! changes how the AI trades concerns off against each other without
//! touching the cost type or the search.

use serde::{Deserialize, Serialize};

use super::comparator::CostComparator;
use super::vector::{PenaltyKind, PenaltyVector};
use crate::error::{Result, SearchError};

/// Per-component multipliers for a [`Personality`].
///
/// Owned by the caller and handed to whoever builds the comparator; there is
/// no process-wide tuning state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonalityWeights {
    weights: [u32; PenaltyKind::COUNT],
}

impl Default for PersonalityWeights {
    /// Balanced weights: losing a unit is the worst outcome, finishing off
    /// enemies comes next, tempo barely matters.
    fn default() -> Self {
        Self::zero()
            .with(PenaltyKind::EnemiesLeft, 10)
            .with(PenaltyKind::EnemyHealth, 2)
            .with(PenaltyKind::AlliesLost, 20)
            .with(PenaltyKind::AlliesAtRisk, 5)
            .with(PenaltyKind::Actions, 1)
    }
}

impl PersonalityWeights {
    /// All weights zero. Build up with [`with`](Self::with).
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            weights: [0; PenaltyKind::COUNT],
        }
    }

    /// Trades units freely for kills.
    #[must_use]
    pub fn aggressive() -> Self {
        Self::zero()
            .with(PenaltyKind::EnemiesLeft, 20)
            .with(PenaltyKind::EnemyHealth, 4)
            .with(PenaltyKind::AlliesLost, 5)
            .with(PenaltyKind::AlliesAtRisk, 1)
            .with(PenaltyKind::Actions, 1)
    }

    /// Keeps units safe before anything else.
    #[must_use]
    pub fn cautious() -> Self {
        Self::zero()
            .with(PenaltyKind::EnemiesLeft, 4)
            .with(PenaltyKind::EnemyHealth, 1)
            .with(PenaltyKind::AlliesLost, 50)
            .with(PenaltyKind::AlliesAtRisk, 15)
            .with(PenaltyKind::Actions, 1)
    }

    /// Set one weight, builder style.
    #[must_use]
    pub fn with(mut self, kind: PenaltyKind, weight: u32) -> Self {
        self.weights[kind.index()] = weight;
        self
    }

    /// Get a weight.
    #[must_use]
    pub fn get(&self, kind: PenaltyKind) -> u32 {
        self.weights[kind.index()]
    }

    /// Set a weight (live tuning).
    pub fn set(&mut self, kind: PenaltyKind, weight: u32) {
        self.weights[kind.index()] = weight;
    }

    /// Check if every weight is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.weights.iter().all(|&w| w == 0)
    }

    /// Weighted sum of the vector's components, saturating at `u64::MAX`.
    #[must_use]
    pub fn project(&self, cost: &PenaltyVector) -> u64 {
        cost.iter().fold(0u64, |acc, (kind, amount)| {
            acc.saturating_add(u64::from(amount) * u64::from(self.get(kind)))
        })
    }
}

/// Comparator that ranks penalty vectors by their weighted projection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Personality {
    weights: PersonalityWeights,
}

impl Personality {
    /// Create a personality.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] if every weight is zero: such a
    /// personality ranks all costs equal, so no path could ever improve on
    /// the maximum sentinel.
    pub fn new(weights: PersonalityWeights) -> Result<Self> {
        if weights.is_zero() {
            return Err(SearchError::InvalidConfig(
                "personality needs at least one non-zero weight".to_string(),
            ));
        }
        Ok(Self { weights })
    }

    /// The weights in use.
    #[must_use]
    pub fn weights(&self) -> &PersonalityWeights {
        &self.weights
    }

    /// Project a cost to its weighted score.
    #[must_use]
    pub fn score(&self, cost: &PenaltyVector) -> u64 {
        self.weights.project(cost)
    }
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            weights: PersonalityWeights::default(),
        }
    }
}

impl CostComparator<PenaltyVector> for Personality {
    fn less(&self, a: &PenaltyVector, b: &PenaltyVector) -> bool {
        self.score(a) < self.score(b)
    }
}
