#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod ai;
mod board;
mod common;
mod config;
mod game;
mod inventory;
#[cfg(feature = "std")]
mod logging;
pub mod persistence;
mod powerup;
pub mod prelude;
mod presenter;
mod ship;
#[cfg(feature = "std")]
pub mod ui;

pub use ai::HuntTargetAi;
pub use board::Board;
pub use common::{BoardError, CellStatus, Coord, ParseCoordError};
pub use config::*;
pub use game::{GameEngine, GameError, Phase, ShotResult, Side, TurnOutcome};
pub use inventory::Inventory;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with, LOG_ENV};
#[cfg(feature = "std")]
pub use persistence::FileStore;
pub use persistence::{MemoryStore, PersistenceError, SaveData, SaveStore};
pub use powerup::{Effect, Powerup, UnknownPowerup, BOMB_RADIUS, FRAG_COUNT};
pub use presenter::{GameView, NewGameMode, NullPresenter, Presenter, RecordingPresenter};
pub use ship::{Orientation, Ship, ShipDef};
