//! Introspection capability shared by decision strategies.

/// Read-only view a debugging UI polls on any decision strategy.
///
/// Implemented by the adapter layer (e.g. [`Planner`](super::Planner)); the
/// search engine itself does not implement it.
pub trait DecisionStrategy {
    /// States fully processed by the last (or current) decision.
    fn processed_count(&self) -> usize;

    /// States still waiting in the frontier.
    fn open_count(&self) -> usize;

    /// Human-readable summary of the current best choice.
    fn debug_info(&self) -> String;
}
