//! 3-in-a-row with a scalar cost.
//!
//! The searching mark places one piece per decision. Placements are scored
//! with a plain `u32`:
//! - a base cost plus a position penalty (center, then corners, then edges)
//! - a large penalty for passing up an immediate win
//! - a penalty per opponent line left one mark from completion

mod game;

pub use game::{three_in_row_planner, Grid, Mark, Place, ThreeInRowProblem, ThreeInRowTuning};
