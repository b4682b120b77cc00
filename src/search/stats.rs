//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Counters collected while a search runs.
///
/// Snapshotted after every step, so a UI polling a step-wise session sees
/// exactly the state of the last completed step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// States currently in the closed set.
    pub processed: usize,

    /// States currently in the frontier.
    pub open: usize,

    /// Expansion steps performed (counts re-expansions of re-opened states).
    pub expansions: usize,

    /// Successful action applications.
    pub generated: usize,

    /// Actions whose application failed.
    pub rejected_applications: usize,

    /// Successors dropped because they were already closed.
    pub closed_skips: usize,

    /// Successful gScore improvements.
    pub relaxations: usize,

    /// Closed states moved back to the frontier.
    pub reopened: usize,

    /// Largest frontier size seen.
    pub frontier_high_water: usize,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Expansions per second.
    #[must_use]
    pub fn expansions_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.expansions as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Average successors generated per expansion.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.expansions == 0 {
            0.0
        } else {
            self.generated as f64 / self.expansions as f64
        }
    }
}
