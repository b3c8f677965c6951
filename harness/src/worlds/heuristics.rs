//! Heuristic families for the sliding puzzle.
//!
//! | kind | label | estimate | admissible |
//! |------|-------|----------|------------|
//! | `Zero` | `BF` | 0 (uniform-cost / breadth-first) | yes |
//! | `MisplacedTiles` | `MT` | non-blank tiles off their goal cell | yes |
//! | `Manhattan` | `CB` | sum of city-block distances | yes |
//! | `Inflated` | `NA` | `MT + CB + 1` | no |
//!
//! The blank never contributes to any estimate. `Inflated` is non-zero
//! even on the solved board, so it can return suboptimal paths.

use std::str::FromStr;

use waypoint_search::contract::Cost;
use waypoint_search::heuristic::Heuristic;

use super::sliding_puzzle::Board;

/// Named puzzle heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeuristicKind {
    Zero,
    MisplacedTiles,
    Manhattan,
    Inflated,
}

impl HeuristicKind {
    /// Every kind in report order.
    pub const ALL: [HeuristicKind; 4] = [
        HeuristicKind::Zero,
        HeuristicKind::MisplacedTiles,
        HeuristicKind::Manhattan,
        HeuristicKind::Inflated,
    ];

    /// Short label used in evaluation records.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Zero => "BF",
            Self::MisplacedTiles => "MT",
            Self::Manhattan => "CB",
            Self::Inflated => "NA",
        }
    }

    /// Whether the estimate never exceeds the true remaining cost.
    #[must_use]
    pub fn is_admissible(self) -> bool {
        !matches!(self, Self::Inflated)
    }
}

impl std::fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized heuristic label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHeuristic {
    pub label: String,
}

impl std::fmt::Display for UnknownHeuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown heuristic {:?} (expected BF, MT, CB or NA)", self.label)
    }
}

impl std::error::Error for UnknownHeuristic {}

impl FromStr for HeuristicKind {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownHeuristic {
                label: s.to_string(),
            })
    }
}

impl Heuristic<Board> for HeuristicKind {
    fn estimate(&self, board: &Board) -> Cost {
        match self {
            Self::Zero => 0,
            Self::MisplacedTiles => misplaced_tiles(board),
            Self::Manhattan => manhattan(board),
            Self::Inflated => misplaced_tiles(board) + manhattan(board) + 1,
        }
    }
}

/// Count of non-blank tiles not on their goal cell.
#[must_use]
pub fn misplaced_tiles(board: &Board) -> Cost {
    let count = board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(cell, &tile)| tile != 0 && board.goal_cell(tile) != cell)
        .count();
    count as Cost
}

/// Sum over non-blank tiles of row and column distance to the goal cell.
#[must_use]
pub fn manhattan(board: &Board) -> Cost {
    board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != 0)
        .map(|(cell, &tile)| {
            let (row, col) = board.coordinates(cell);
            let (goal_row, goal_col) = board.coordinates(board.goal_cell(tile));
            (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as Cost
        })
        .sum()
}
