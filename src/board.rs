//! Game board: a 10×10 grid of cell statuses plus the ships placed on it.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::common::{BoardError, CellStatus, Coord};
use crate::config::{BOARD_SIZE, SHIPS};
use crate::ship::{Orientation, Ship};

type Grid = [[CellStatus; BOARD_SIZE]; BOARD_SIZE];

/// Main board state: cell statuses and ship placements.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cells: Grid,
    ships: Vec<Ship>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board (no ships placed, no shots fired).
    pub fn new() -> Self {
        Board {
            cells: [[CellStatus::Empty; BOARD_SIZE]; BOARD_SIZE],
            ships: Vec::new(),
        }
    }

    /// Clear every ship and cell status.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn check_bounds(coord: Coord) -> Result<(), BoardError> {
        if coord.in_bounds() {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds {
                row: coord.row,
                col: coord.col,
            })
        }
    }

    /// Status of the cell at `coord`.
    pub fn cell(&self, coord: Coord) -> Result<CellStatus, BoardError> {
        Self::check_bounds(coord)?;
        Ok(self.cells[coord.row][coord.col])
    }

    /// Overwrite the status of the cell at `coord`.
    pub fn set_cell(&mut self, coord: Coord, status: CellStatus) -> Result<(), BoardError> {
        Self::check_bounds(coord)?;
        self.cells[coord.row][coord.col] = status;
        Ok(())
    }

    /// Row-major view of the grid.
    pub fn cells(&self) -> &[[CellStatus; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Ships currently on the board, in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Place a ship of `length` cells starting at `origin`.
    ///
    /// Every target cell must be on the board and `Empty`. On failure the board
    /// is left untouched.
    pub fn place_ship(
        &mut self,
        name: &str,
        length: usize,
        reward: i64,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        if length == 0 {
            return Err(BoardError::InvalidLength);
        }
        Self::check_bounds(origin)?;
        let cells: Vec<Coord> = (0..length).map(|i| orientation.step(origin, i)).collect();
        for &c in &cells {
            if !c.in_bounds() {
                return Err(BoardError::ShipOutOfBounds);
            }
            if self.cells[c.row][c.col] != CellStatus::Empty {
                return Err(BoardError::Overlap(c));
            }
        }
        for &c in &cells {
            self.cells[c.row][c.col] = CellStatus::ShipPresent;
        }
        log::trace!("placed {} at {} ({:?})", name, origin, orientation);
        self.ships.push(Ship::new(name, reward, cells));
        Ok(())
    }

    /// Lift the named ship off the board, emptying its cells. No-op when absent.
    pub fn remove_ship(&mut self, name: &str) {
        if let Some(idx) = self.ships.iter().position(|s| s.name() == name) {
            let ship = self.ships.remove(idx);
            for c in ship.cells() {
                self.cells[c.row][c.col] = CellStatus::Empty;
            }
        }
    }

    /// Drop the standard fleet at uniformly random positions.
    ///
    /// Each ship is retried until it fits; with 17 of 100 cells used this ends
    /// almost surely.
    pub fn place_ships_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for def in SHIPS.iter() {
            loop {
                let origin = Coord::new(
                    rng.random_range(0..BOARD_SIZE),
                    rng.random_range(0..BOARD_SIZE),
                );
                let orientation = if rng.random() {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };
                if self
                    .place_ship(def.name(), def.length(), def.reward(), origin, orientation)
                    .is_ok()
                {
                    break;
                }
            }
        }
    }

    /// The ship occupying `coord`, if any.
    pub fn ship_at(&self, coord: Coord) -> Option<&Ship> {
        self.ships.iter().find(|s| s.occupies(coord))
    }

    pub fn ship_at_mut(&mut self, coord: Coord) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|s| s.occupies(coord))
    }

    /// Returns `true` when every placed ship is sunk (vacuously with no ships).
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    /// Is a ship with this name on the board?
    pub fn has_ship(&self, name: &str) -> bool {
        self.ships.iter().any(|s| s.name() == name)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for (r, row) in self.cells.iter().enumerate() {
            write!(f, "  {} ", (b'A' + r as u8) as char)?;
            for cell in row {
                let ch = match cell {
                    CellStatus::Empty => '.',
                    CellStatus::Miss => 'o',
                    CellStatus::Hit => 'X',
                    CellStatus::ShipPresent => 'S',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  ships: {:?}\n}}", self.ships)
    }
}
