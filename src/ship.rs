//! Ship definitions and placed ships with hit tracking.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::common::Coord;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Cell `index` steps along this orientation from `origin`. May be off-board.
    pub fn step(self, origin: Coord, index: usize) -> Coord {
        match self {
            Orientation::Horizontal => Coord::new(origin.row, origin.col + index),
            Orientation::Vertical => Coord::new(origin.row + index, origin.col),
        }
    }
}

/// Fleet entry: name, length and the reward paid when it is sunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipDef {
    name: &'static str,
    length: usize,
    reward: i64,
}

impl ShipDef {
    pub const fn new(name: &'static str, length: usize, reward: i64) -> Self {
        Self {
            name,
            length,
            reward,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn reward(&self) -> i64 {
        self.reward
    }
}

/// A ship placed on a board. Occupied cells are fixed at placement.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    name: String,
    reward: i64,
    hit_count: usize,
    cells: Vec<Coord>,
}

impl Ship {
    /// Create a ship over `cells`, listed in placement order.
    pub(crate) fn new(name: &str, reward: i64, cells: Vec<Coord>) -> Self {
        Ship {
            name: name.into(),
            reward,
            hit_count: 0,
            cells,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> usize {
        self.cells.len()
    }

    pub fn reward(&self) -> i64 {
        self.reward
    }

    pub fn hit_count(&self) -> usize {
        self.hit_count
    }

    /// Occupied cells in placement order.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn occupies(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    /// Record one hit. Returns `true` only on the hit that sinks the ship.
    pub fn register_hit(&mut self) -> bool {
        if self.is_sunk() {
            return false;
        }
        self.hit_count += 1;
        self.is_sunk()
    }

    /// Check if the ship is sunk (every segment hit).
    pub fn is_sunk(&self) -> bool {
        self.hit_count == self.cells.len()
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ship {{ name: {:?}, cells: [", self.name)?;
        for (i, c) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(
            f,
            "], hits: {}/{}, reward: {} }}",
            self.hit_count,
            self.cells.len(),
            self.reward
        )
    }
}
