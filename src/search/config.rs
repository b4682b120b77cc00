//! Search configuration parameters.

use serde::{Deserialize, Serialize};

/// Search configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Re-open closed states when a strictly cheaper path to them shows up
    /// (textbook A*). Off by default: once expanded, a state stays closed.
    pub reopen_closed: bool,

    /// Maximum number of expansions (0 = unlimited).
    /// Hitting the limit ends the search without a plan.
    pub max_expansions: usize,

    /// Keep the fScore table for introspection after the run.
    pub record_cost_table: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            reopen_closed: false,
            max_expansions: 0,
            record_cost_table: true,
        }
    }
}

impl SearchConfig {
    /// Enable or disable re-opening of closed states.
    #[must_use]
    pub fn with_reopen_closed(mut self, reopen: bool) -> Self {
        self.reopen_closed = reopen;
        self
    }

    /// Set the expansion budget.
    #[must_use]
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = limit;
        self
    }

    /// Enable or disable the retained cost table.
    #[must_use]
    pub fn with_cost_table(mut self, record: bool) -> Self {
        self.record_cost_table = record;
        self
    }

    /// Check if `expansions` has used up the budget.
    #[inline]
    #[must_use]
    pub fn budget_exhausted(&self, expansions: usize) -> bool {
        self.max_expansions > 0 && expansions >= self.max_expansions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert!(!config.reopen_closed);
        assert_eq!(config.max_expansions, 0);
        assert!(config.record_cost_table);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SearchConfig::default()
            .with_reopen_closed(true)
            .with_max_expansions(500)
            .with_cost_table(false);

        assert!(config.reopen_closed);
        assert_eq!(config.max_expansions, 500);
        assert!(!config.record_cost_table);
    }

    #[test]
    fn test_budget() {
        assert!(!SearchConfig::default().budget_exhausted(1_000_000));

        let limited = SearchConfig::default().with_max_expansions(10);
        assert!(!limited.budget_exhausted(9));
        assert!(limited.budget_exhausted(10));
    }

    #[test]
    fn test_serialization() {
        let config = SearchConfig::default().with_max_expansions(42);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
