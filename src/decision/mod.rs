//! Decision layer between game adapters and the search engine.
//!
//! - `DecisionStrategy`: the introspection capability a debugging UI polls
//! - `Planner`: runs a search per decision and falls back to a default
//!   action when no goal is reachable

pub mod planner;
pub mod strategy;

pub use planner::{Decision, DecisionSource, Planner};
pub use strategy::DecisionStrategy;
