//! Grid tactics turn planning.
//!
//! The searching side commands its allied units for one turn:
//! - Each ally may move once (up to its move range) and attack once
//! - Attacking is only possible against an adjacent enemy, and ends movement
//! - A surviving target strikes back
//! - The turn ends with an explicit `EndTurn`
//!
//! Ending the turn is weighed as a [`PenaltyVector`](crate::cost::PenaltyVector)
//! over enemies remaining, enemy health, allies lost and allies left in
//! enemy reach. Which of those matters most is up to the comparator, usually
//! a [`Personality`](crate::cost::Personality).

mod board;
mod problem;

pub use board::{Board, Pos, RandomBoardSpec, Side, TacticsAction, Unit};
pub use problem::{tactics_planner, TacticsProblem, TacticsTuning};
