//! Generic best-first (A*) search.
//!
//! ## Overview
//!
//! The engine finds a least-cost sequence of actions from a start state to
//! any goal state. It is generic over the domain's state, action and cost
//! types and knows nothing about the game being played:
//!
//! - **Five policies**: a [`SearchProblem`] supplies `actions`, `is_goal`,
//!   `heuristic`, `weigh` and `apply`
//! - **Pluggable ordering**: costs are ranked by a
//!   [`CostComparator`](crate::cost::CostComparator), not by `Ord`
//! - **Deterministic**: ties go to the state discovered first
//! - **Step-wise**: a [`SearchSession`] can be advanced one expansion at a
//!   time and inspected in between
//!
//! ## Usage
//!
//! ```rust
//! use turn_planner::cost::NaturalOrder;
//! use turn_planner::search::{FnProblem, SearchConfig, SearchEngine, Step};
//!
//! // Walk right along a line of 5 cells; each step costs 1.
//! let problem = FnProblem::new(
//!     |_: &u8| vec![()],
//!     |_, s| *s == 4,
//!     |s| u32::from(4 - *s),
//!     |_, _, _, _| 1u32,
//!     |s, _| (*s < 4).then(|| s + 1),
//! );
//!
//! let mut engine = SearchEngine::new(SearchConfig::default());
//!
//! // Step by step, watching the counters.
//! let mut session = engine.start(&problem, 0, &NaturalOrder);
//! while let Step::Continue = session.step().unwrap() {
//!     println!("processed {} open {}", session.processed_count(), session.open_count());
//! }
//!
//! // Or run to completion.
//! let outcome = engine.search(&problem, 0, &NaturalOrder).unwrap();
//! assert!(outcome.found);
//! assert_eq!(outcome.actions.len(), 4);
//! ```

pub mod arena;
pub mod config;
pub mod engine;
pub mod frontier;
pub mod problem;
pub mod stats;

pub use arena::{StateArena, StateId};
pub use config::SearchConfig;
pub use engine::{
    search, Candidate, SearchEngine, SearchOutcome, SearchReport, SearchSession, Step, Termination,
};
pub use frontier::Frontier;
pub use problem::{FnProblem, SearchProblem};
pub use stats::SearchStats;
