//! Common types for the game: coordinates, cell status and board errors.

use core::fmt;
use core::str::FromStr;

use crate::config::BOARD_SIZE;

/// A cell on the 10×10 grid. Rows are labelled `A`..`J`, columns `0`..`9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Build a coordinate from zero-based indices. No bounds check is made here;
    /// the board rejects out-of-range cells.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Build a coordinate from a row letter (`'A'..='J'`, case-insensitive) and column.
    pub fn from_label(row: char, col: usize) -> Option<Self> {
        let row = row.to_ascii_uppercase();
        if !row.is_ascii_uppercase() {
            return None;
        }
        let coord = Self::new((row as u8 - b'A') as usize, col);
        coord.in_bounds().then_some(coord)
    }

    pub fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Row letter of this coordinate.
    pub fn row_label(&self) -> char {
        (b'A' + self.row as u8) as char
    }

    /// Shift by a signed offset, returning `None` when the result leaves the board.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        let coord = Self::new(row, col);
        coord.in_bounds().then_some(coord)
    }

    /// Orthogonal neighbours in pursuit order: right, left, below, above.
    /// Off-board neighbours are skipped.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        [(0, 1), (0, -1), (1, 0), (-1, 0)]
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(dr, dc))
    }

    /// Every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coord::new(row, col)))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.row < 26 {
            write!(f, "{}{}", self.row_label(), self.col)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

/// Error returned when a coordinate label such as `"B4"` cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a board coordinate (expected A0..J9)")]
pub struct ParseCoordError(pub alloc::string::String);

impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoordError(s.into());
        let s = s.trim();
        let mut chars = s.chars();
        let row = chars.next().ok_or_else(err)?;
        let col: usize = chars.as_str().parse().map_err(|_| err())?;
        Coord::from_label(row, col).ok_or_else(err)
    }
}

/// Status of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellStatus {
    #[default]
    Empty,
    Miss,
    Hit,
    ShipPresent,
}

impl CellStatus {
    /// `true` once the cell has been fired upon.
    pub fn is_resolved(self) -> bool {
        matches!(self, CellStatus::Miss | CellStatus::Hit)
    }
}

/// Errors returned by board operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Cell lies outside the 10×10 grid.
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },
    /// Ship placement runs off the edge of the board.
    #[error("ship placement runs off the board")]
    ShipOutOfBounds,
    /// Ship placement covers a cell that is not empty.
    #[error("ship placement overlaps {0}")]
    Overlap(Coord),
    /// Ships must cover at least one cell.
    #[error("ship length must be at least 1")]
    InvalidLength,
}
