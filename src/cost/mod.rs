//! Cost abstraction for the search engine.
//!
//! ## Overview
//!
//! The engine never assumes a numeric cost. Anything that can be added,
//! scaled and ordered can drive a search:
//!
//! - **Scalar costs**: `u32`, `u64` and `usize` implement [`Cost`] directly
//!   and are ordered by [`NaturalOrder`].
//! - **Vector costs**: [`PenaltyVector`] holds one non-negative penalty per
//!   [`PenaltyKind`]. It has no natural order; callers pick a comparator.
//! - **Personalities**: [`Personality`] projects a vector through
//!   [`PersonalityWeights`] and compares the weighted sums, so one vector
//!   cost type can produce many decision styles.
//!
//! ## Example
//!
//! ```
//! use turn_planner::cost::{CostComparator, PenaltyKind, PenaltyVector, Personality, PersonalityWeights};
//!
//! let weights = PersonalityWeights::zero()
//!     .with(PenaltyKind::EnemiesLeft, 1)
//!     .with(PenaltyKind::AlliesLost, 5);
//! let personality = Personality::new(weights).unwrap();
//!
//! let push_on = PenaltyVector::of(PenaltyKind::EnemiesLeft, 2);
//! let trade = PenaltyVector::of(PenaltyKind::AlliesLost, 1);
//!
//! // Losing an ally weighs 5, leaving two enemies weighs 2.
//! assert!(personality.less(&push_on, &trade));
//! ```

pub mod comparator;
pub mod personality;
pub mod traits;
pub mod vector;

pub use comparator::{CostComparator, Lexicographic, NaturalOrder};
pub use personality::{Personality, PersonalityWeights};
pub use traits::{Cost, CostBounds};
pub use vector::{PenaltyKind, PenaltyVector};
