//! 3x3 board and the one-placement search problem.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::decision::Planner;
use crate::cost::NaturalOrder;
use crate::search::{SearchConfig, SearchProblem};

/// All eight winning lines, by cell index.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Penalty class of each cell: center 0, corners 1, edges 2.
const POSITION_CLASS: [u32; 9] = [1, 2, 1, 2, 0, 2, 1, 2, 1];

/// A player's mark. `X` moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The opponent's mark.
    #[must_use]
    pub fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// Put a mark on a cell (0..9, row-major).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Place(pub u8);

/// A 3-in-a-row position. `X` always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    cells: [Option<Mark>; 9],
    to_move: Mark,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Empty board, `X` to move.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [None; 9],
            to_move: Mark::X,
        }
    }

    /// Parse nine cells of `X`, `O` or `.`, ignoring whitespace.
    ///
    /// The side to move is inferred from the mark counts. Returns `None` if
    /// the text is malformed or the counts are impossible.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut cells = [None; 9];
        let mut n = 0;
        for ch in text.chars().filter(|c| !c.is_whitespace()) {
            let cell = cells.get_mut(n)?;
            *cell = match ch {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                '.' => None,
                _ => return None,
            };
            n += 1;
        }
        if n != 9 {
            return None;
        }

        let xs = cells.iter().filter(|c| **c == Some(Mark::X)).count();
        let os = cells.iter().filter(|c| **c == Some(Mark::O)).count();
        let to_move = match xs.checked_sub(os)? {
            0 => Mark::X,
            1 => Mark::O,
            _ => return None,
        };
        Some(Self { cells, to_move })
    }

    #[must_use]
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    #[must_use]
    pub fn cell(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    /// Number of marks on the board.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// The mark holding a complete line, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.cells[a]?;
            (self.cells[b] == Some(mark) && self.cells[c] == Some(mark)).then_some(mark)
        })
    }

    /// Whether the game is over (won or full).
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner().is_some() || self.filled() == 9
    }

    /// Open placements, in cell order. Empty once the game is over.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Place> {
        if self.is_over() {
            return Vec::new();
        }
        (0u8..9)
            .filter(|&i| self.cells[usize::from(i)].is_none())
            .map(Place)
            .collect()
    }

    /// Place the mark to move, or `None` if the cell is taken or the game
    /// is over.
    #[must_use]
    pub fn play(&self, place: Place) -> Option<Grid> {
        let index = usize::from(place.0);
        if self.is_over() || self.cells.get(index)?.is_some() {
            return None;
        }
        let mut next = *self;
        next.cells[index] = Some(self.to_move);
        next.to_move = self.to_move.other();
        Some(next)
    }

    /// Lines where `mark` has two cells and the third is empty.
    #[must_use]
    pub fn threats(&self, mark: Mark) -> usize {
        LINES
            .iter()
            .filter(|line| {
                let own = line.iter().filter(|&&i| self.cells[i] == Some(mark)).count();
                let empty = line.iter().filter(|&&i| self.cells[i].is_none()).count();
                own == 2 && empty == 1
            })
            .count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(3) {
            for cell in row {
                let ch = match cell {
                    Some(Mark::X) => 'X',
                    Some(Mark::O) => 'O',
                    None => '.',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Tuning for the 3-in-a-row adapter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreeInRowTuning {
    /// Base cost of any placement.
    pub placement: u32,
    /// Multiplier on the cell's position class (center 0, corner 1, edge 2).
    pub position: u32,
    /// Charged when a winning placement was available and not taken.
    pub missed_win: u32,
    /// Charged per opponent line left one mark from completion.
    pub open_threat: u32,
}

impl Default for ThreeInRowTuning {
    fn default() -> Self {
        Self {
            placement: 1,
            position: 1,
            missed_win: 100,
            open_threat: 40,
        }
    }
}

/// Choose one placement for `mark`.
#[derive(Clone, Debug)]
pub struct ThreeInRowProblem {
    mark: Mark,
    tuning: ThreeInRowTuning,
}

impl ThreeInRowProblem {
    /// Create a problem that places `mark` under `tuning`.
    #[must_use]
    pub fn new(mark: Mark, tuning: ThreeInRowTuning) -> Self {
        Self { mark, tuning }
    }

    /// The mark this problem plays for.
    #[must_use]
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Get the tuning.
    #[must_use]
    pub fn tuning(&self) -> &ThreeInRowTuning {
        &self.tuning
    }
}

impl SearchProblem for ThreeInRowProblem {
    type State = Grid;
    type Action = Place;
    type Cost = u32;

    fn actions(&self, state: &Grid) -> Vec<Place> {
        if state.to_move() != self.mark {
            return Vec::new();
        }
        state.legal_moves()
    }

    fn is_goal(&self, start: &Grid, state: &Grid) -> bool {
        state.filled() == start.filled() + 1
    }

    /// Every placement still to be made costs at least `placement`.
    fn heuristic(&self, state: &Grid) -> u32 {
        if state.to_move() == self.mark && !state.is_over() {
            self.tuning.placement
        } else {
            0
        }
    }

    fn weigh(&self, _start: &Grid, from: &Grid, to: &Grid, action: &Place) -> u32 {
        let t = &self.tuning;
        let class = POSITION_CLASS[usize::from(action.0)];
        let mut cost = t.placement.saturating_add(class.saturating_mul(t.position));

        if to.winner() == Some(self.mark) {
            return cost;
        }
        if from.threats(self.mark) > 0 {
            cost = cost.saturating_add(t.missed_win);
        }
        let open = u32::try_from(to.threats(self.mark.other())).unwrap_or(u32::MAX);
        cost.saturating_add(open.saturating_mul(t.open_threat))
    }

    fn apply(&self, state: &Grid, action: &Place) -> Option<Grid> {
        state.play(*action)
    }
}

/// A planner for `mark` with a scalar cost.
pub fn three_in_row_planner(
    mark: Mark,
    tuning: ThreeInRowTuning,
) -> Planner<ThreeInRowProblem, NaturalOrder> {
    Planner::new(
        ThreeInRowProblem::new(mark, tuning),
        NaturalOrder,
        SearchConfig::default(),
    )
}
