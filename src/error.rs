//! Error types for the decision engine.
//!
//! Only contract violations are errors. A search that finds no goal is an
//! ordinary outcome and is reported through
//! [`SearchOutcome`](crate::search::SearchOutcome).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Path reconstruction could not walk back to the start state.
    ///
    /// Means the predecessor history is broken or cyclic, which only happens
    /// if the relaxation logic itself is wrong.
    #[error("corrupt search history: start state not reached after {depth} steps")]
    CorruptHistory { depth: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
