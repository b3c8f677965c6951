//! `SlidingPuzzle`: the n×n sliding-tile puzzle (8-puzzle for n = 3).
//!
//! A board is a row-major permutation of `0..n²` where `0` is the blank.
//! The solved layout is `1, 2, …, n²−1, 0`. Moves name the direction the
//! blank travels, so `Up` swaps the blank with the tile above it.
//!
//! Scrambles are reproducible: a seeded `StdRng` picks `m` random legal
//! blank moves from the solved board, never immediately undoing the
//! previous move. Every scrambled board is therefore solvable in at most
//! `m` moves.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use waypoint_search::contract::{SearchDomain, Successor};

/// Smallest supported side length.
pub const MIN_SIDE: u8 = 2;
/// Largest supported side length (tile labels must fit in a `u8`).
pub const MAX_SIDE: u8 = 16;

/// Direction the blank moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All moves in enumeration order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// The move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Lowercase name (`up`, `down`, `left`, `right`).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Typed failure for board construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Side length outside `MIN_SIDE..=MAX_SIDE`.
    InvalidSide { side: u8 },
    /// Tile count does not equal `side²`.
    WrongLength { expected: usize, actual: usize },
    /// Tiles are not a permutation of `0..side²`.
    NotAPermutation { detail: String },
}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSide { side } => write!(
                f,
                "board side {side} outside supported range {MIN_SIDE}..={MAX_SIDE}"
            ),
            Self::WrongLength { expected, actual } => {
                write!(f, "expected {expected} tiles, got {actual}")
            }
            Self::NotAPermutation { detail } => write!(f, "tiles are not a permutation: {detail}"),
        }
    }
}

impl std::error::Error for BoardError {}

/// An n×n tile configuration. Equality and hashing cover the full layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Board {
    side: u8,
    tiles: Vec<u8>,
    blank: usize,
}

impl Board {
    /// The solved board of the given side.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidSide`] if `side` is out of range.
    pub fn solved(side: u8) -> Result<Self, BoardError> {
        check_side(side)?;
        let count = usize::from(side) * usize::from(side);
        // Tile labels 1..count then the blank; count <= 256 so labels fit in u8.
        let tiles: Vec<u8> = (1..count)
            .map(|t| u8::try_from(t).unwrap_or(u8::MAX))
            .chain(std::iter::once(0))
            .collect();
        Ok(Self {
            side,
            tiles,
            blank: count - 1,
        })
    }

    /// Build a board from a row-major tile list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] if the side is out of range, the length is not
    /// `side²`, or the tiles are not a permutation of `0..side²`.
    pub fn from_tiles(side: u8, tiles: Vec<u8>) -> Result<Self, BoardError> {
        check_side(side)?;
        let count = usize::from(side) * usize::from(side);
        if tiles.len() != count {
            return Err(BoardError::WrongLength {
                expected: count,
                actual: tiles.len(),
            });
        }
        let mut seen = vec![false; count];
        for &tile in &tiles {
            let t = usize::from(tile);
            if t >= count {
                return Err(BoardError::NotAPermutation {
                    detail: format!("tile {tile} out of range for {count} cells"),
                });
            }
            if seen[t] {
                return Err(BoardError::NotAPermutation {
                    detail: format!("tile {tile} appears more than once"),
                });
            }
            seen[t] = true;
        }
        let blank = tiles.iter().position(|&t| t == 0).unwrap_or(0);
        Ok(Self { side, tiles, blank })
    }

    /// A reproducible scramble: `moves` random legal blank moves from the
    /// solved board, seeded by `seed`. Returns the board and the moves
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidSide`] if `side` is out of range.
    pub fn scrambled(side: u8, moves: usize, seed: u64) -> Result<(Self, Vec<Move>), BoardError> {
        let mut board = Self::solved(side)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let mut applied: Vec<Move> = Vec::with_capacity(moves);
        for _ in 0..moves {
            let undo = applied.last().map(|m| m.inverse());
            let options: Vec<Move> = board
                .legal_moves()
                .into_iter()
                .filter(|m| Some(*m) != undo)
                .collect();
            let mv = options[rng.random_range(0..options.len())];
            if let Some(next) = board.apply(mv) {
                board = next;
                applied.push(mv);
            }
        }
        Ok((board, applied))
    }

    /// Side length.
    #[must_use]
    pub fn side(&self) -> u8 {
        self.side
    }

    /// Row-major tiles (`0` is the blank).
    #[must_use]
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Cell index of the blank.
    #[must_use]
    pub fn blank(&self) -> usize {
        self.blank
    }

    /// `(row, column)` of a cell index.
    #[must_use]
    pub fn coordinates(&self, cell: usize) -> (usize, usize) {
        let side = usize::from(self.side);
        (cell / side, cell % side)
    }

    /// Cell index where `tile` sits on the solved board.
    #[must_use]
    pub fn goal_cell(&self, tile: u8) -> usize {
        if tile == 0 {
            self.tiles.len() - 1
        } else {
            usize::from(tile) - 1
        }
    }

    /// Whether the board is in the solved layout.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.tiles
            .iter()
            .enumerate()
            .all(|(cell, &tile)| self.goal_cell(tile) == cell)
    }

    /// Legal moves in [`Move::ALL`] order.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        Move::ALL
            .into_iter()
            .filter(|&m| self.target_cell(m).is_some())
            .collect()
    }

    /// The board after moving the blank, or `None` if the move leaves the grid.
    #[must_use]
    pub fn apply(&self, mv: Move) -> Option<Self> {
        let target = self.target_cell(mv)?;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);
        Some(Self {
            side: self.side,
            tiles,
            blank: target,
        })
    }

    fn target_cell(&self, mv: Move) -> Option<usize> {
        let side = usize::from(self.side);
        let (row, col) = self.coordinates(self.blank);
        match mv {
            Move::Up if row > 0 => Some(self.blank - side),
            Move::Down if row + 1 < side => Some(self.blank + side),
            Move::Left if col > 0 => Some(self.blank - 1),
            Move::Right if col + 1 < side => Some(self.blank + 1),
            _ => None,
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.tiles.len().saturating_sub(1).to_string().len();
        for row in self.tiles.chunks(usize::from(self.side)) {
            let cells: Vec<String> = row
                .iter()
                .map(|&t| {
                    if t == 0 {
                        format!("{:>width$}", "_")
                    } else {
                        format!("{t:>width$}")
                    }
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

fn check_side(side: u8) -> Result<(), BoardError> {
    if (MIN_SIDE..=MAX_SIDE).contains(&side) {
        Ok(())
    } else {
        Err(BoardError::InvalidSide { side })
    }
}

/// Replay `actions` from `start` and test whether the result is solved.
///
/// Illegal moves make the solution incorrect.
#[must_use]
pub fn check_solution(start: &Board, actions: &[Move]) -> bool {
    actions
        .iter()
        .try_fold(start.clone(), |board, &mv| board.apply(mv))
        .is_some_and(|board| board.is_solved())
}

/// Search domain over boards of one side length. Every move costs 1.
#[derive(Debug, Clone)]
pub struct SlidingPuzzle {
    side: u8,
    domain_id: String,
}

impl SlidingPuzzle {
    /// Domain for boards of side `side`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidSide`] if `side` is out of range.
    pub fn new(side: u8) -> Result<Self, BoardError> {
        check_side(side)?;
        Ok(Self {
            side,
            domain_id: format!("sliding_puzzle:v1:{side}x{side}"),
        })
    }

    /// The 3×3 eight-puzzle.
    #[must_use]
    pub fn eight() -> Self {
        Self {
            side: 3,
            domain_id: "sliding_puzzle:v1:3x3".into(),
        }
    }

    /// Side length.
    #[must_use]
    pub fn side(&self) -> u8 {
        self.side
    }
}

impl SearchDomain for SlidingPuzzle {
    type State = Board;
    type Action = Move;

    fn domain_id(&self) -> &str {
        &self.domain_id
    }

    fn successors(&self, state: &Board) -> Vec<Successor<Board, Move>> {
        Move::ALL
            .into_iter()
            .filter_map(|mv| state.apply(mv).map(|next| Successor::unit(next, mv)))
            .collect()
    }

    fn is_goal(&self, state: &Board) -> bool {
        state.is_solved()
    }
}
