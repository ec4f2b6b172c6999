//! Board coordinates and the four cardinal directions.

use core::fmt;

use crate::config::BOARD_SIZE;

const GRID_SIZE: usize = BOARD_SIZE as usize;

/// A 0-based `(row, col)` coordinate. Positions may lie outside the board;
/// callers check with [`Position::in_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether the position lies on a `BOARD_SIZE`×`BOARD_SIZE` board.
    pub fn in_bounds(&self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE
    }

    /// Shift by a signed offset. Returns `None` if the result leaves the board.
    pub fn offset(&self, d_row: i32, d_col: i32) -> Option<Position> {
        let row = self.row.checked_add_signed(d_row as isize)?;
        let col = self.col.checked_add_signed(d_col as isize)?;
        let pos = Position::new(row, col);
        pos.in_bounds().then_some(pos)
    }

    /// Neighbour one step along `dir`, if it is on the board.
    pub fn step(&self, dir: Direction) -> Option<Position> {
        let (dr, dc) = dir.offset();
        self.offset(dr, dc)
    }

    /// Direction leading from `self` to an orthogonally adjacent `other`.
    pub fn direction_to(&self, other: Position) -> Option<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .find(|dir| self.step(*dir) == Some(other))
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cardinal direction on the board. North is towards row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Fixed cycle order used when searching around a hit.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// `(d_row, d_col)` for one step in this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}
