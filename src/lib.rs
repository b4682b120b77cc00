//! # turn-planner
//!
//! A generic best-first (A*) search engine for turn-based game AI.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: The engine sees states, actions and costs only
//!    through five injected policies. It never interprets game concepts.
//!
//! 2. **Pluggable Cost Ordering**: Costs are ranked by a comparator chosen
//!    per search, so the same search can play aggressively or cautiously.
//!
//! 3. **Deterministic**: Equal-cost candidates are taken in discovery order.
//!    The same problem and start always yield the same plan.
//!
//! ## Architecture
//!
//! - **Frontier over an arena**: States are interned once and referred to by
//!   `StateId`; per-state scores live in a parallel table.
//!
//! - **Never reopen by default**: A closed state is not revisited even if a
//!   cheaper path to it shows up later. `SearchConfig::reopen_closed` turns
//!   on textbook A* behavior.
//!
//! - **Fail fast**: A broken predecessor chain is reported as
//!   `SearchError::CorruptHistory`, never as a partial plan.
//!
//! ## Modules
//!
//! - `cost`: Cost trait, penalty vectors, comparators and personalities
//! - `search`: Problem contract, engine, step-wise sessions, statistics
//! - `decision`: Planner with fallback and the introspection trait
//! - `games`: Example domains (grid tactics, 3-in-a-row)
//! - `error`: Error type

pub mod cost;
pub mod decision;
pub mod error;
pub mod games;
pub mod search;

// Re-export commonly used types
pub use crate::error::{Result, SearchError};

pub use crate::cost::{
    Cost, CostBounds, CostComparator, Lexicographic, NaturalOrder, PenaltyKind, PenaltyVector,
    Personality, PersonalityWeights,
};

pub use crate::search::{
    search, Candidate, FnProblem, SearchConfig, SearchEngine, SearchOutcome, SearchProblem,
    SearchReport, SearchSession, SearchStats, StateId, Step, Termination,
};

pub use crate::decision::{Decision, DecisionSource, DecisionStrategy, Planner};
