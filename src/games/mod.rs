//! Example domains plugged into the search engine.
//!
//! - `tactics`: a turn of grid combat, vector cost, personality comparator
//! - `three_in_row`: one placement in 3-in-a-row, scalar cost

pub mod tactics;
pub mod three_in_row;
