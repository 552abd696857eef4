//! Consumable special attacks and the cells each one strikes.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use rand::Rng;

use crate::common::Coord;
use crate::config::BOARD_SIZE;

/// Number of random cells hit by a frag bomb.
pub const FRAG_COUNT: usize = 8;
/// Chebyshev radius of a bomb blast.
pub const BOMB_RADIUS: isize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Powerup {
    Nuke,
    ConfusionRay,
    ShipFinder,
    Torpedo,
    FragBomb,
    CrossFire,
    Bomb,
}

/// What activating a powerup does to the computer's board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fire at each listed cell in order. Repeats are harmless.
    Strike(Vec<Coord>),
    /// Skip the computer's next turn.
    SkipOpponentTurn,
    /// Fire at the first cell, row-major, that still hides a ship.
    SeekShip,
}

impl Powerup {
    pub const ALL: [Powerup; 7] = [
        Powerup::Nuke,
        Powerup::ConfusionRay,
        Powerup::ShipFinder,
        Powerup::Torpedo,
        Powerup::FragBomb,
        Powerup::CrossFire,
        Powerup::Bomb,
    ];

    /// Display name, also used as the key in save files.
    pub fn name(self) -> &'static str {
        match self {
            Powerup::Nuke => "Nuke",
            Powerup::ConfusionRay => "Confusion Ray",
            Powerup::ShipFinder => "Ship Finder",
            Powerup::Torpedo => "Torpedo",
            Powerup::FragBomb => "Frag Bomb",
            Powerup::CrossFire => "Cross Fire",
            Powerup::Bomb => "Bomb",
        }
    }

    /// Shop price.
    pub fn cost(self) -> i64 {
        match self {
            Powerup::Nuke => 50_000,
            Powerup::ConfusionRay => 1_000,
            Powerup::ShipFinder => 3_000,
            Powerup::Torpedo => 5_000,
            Powerup::FragBomb => 2_000,
            Powerup::CrossFire => 5_200,
            Powerup::Bomb => 10_000,
        }
    }

    /// Resolve the attack pattern around the selected cell.
    pub fn effect<R: Rng + ?Sized>(self, origin: Coord, rng: &mut R) -> Effect {
        match self {
            Powerup::Nuke => Effect::Strike(Coord::all().collect()),
            Powerup::ConfusionRay => Effect::SkipOpponentTurn,
            Powerup::ShipFinder => Effect::SeekShip,
            Powerup::Torpedo => {
                if rng.random() {
                    Effect::Strike(row_of(origin).collect())
                } else {
                    Effect::Strike(column_of(origin).collect())
                }
            }
            Powerup::FragBomb => Effect::Strike(
                (0..FRAG_COUNT)
                    .map(|_| {
                        Coord::new(
                            rng.random_range(0..BOARD_SIZE),
                            rng.random_range(0..BOARD_SIZE),
                        )
                    })
                    .collect(),
            ),
            Powerup::CrossFire => Effect::Strike(row_of(origin).chain(column_of(origin)).collect()),
            Powerup::Bomb => Effect::Strike(
                (-BOMB_RADIUS..=BOMB_RADIUS)
                    .flat_map(|dr| (-BOMB_RADIUS..=BOMB_RADIUS).map(move |dc| (dr, dc)))
                    .filter_map(|(dr, dc)| origin.offset(dr, dc))
                    .collect(),
            ),
        }
    }
}

fn row_of(origin: Coord) -> impl Iterator<Item = Coord> {
    (0..BOARD_SIZE).map(move |col| Coord::new(origin.row, col))
}

fn column_of(origin: Coord) -> impl Iterator<Item = Coord> {
    (0..BOARD_SIZE).map(move |row| Coord::new(row, origin.col))
}

impl fmt::Display for Powerup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for an unrecognised powerup name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown powerup `{0}`")]
pub struct UnknownPowerup(pub String);

impl FromStr for Powerup {
    type Err = UnknownPowerup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Powerup::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPowerup(s.into()))
    }
}
