//! Commonly used types and utilities for ease of import.

pub use crate::{
    Board, CellStatus, Coord, GameEngine, GameError, MemoryStore, NullPresenter, Orientation,
    Phase, Powerup, Presenter, SaveStore, Side, TurnOutcome,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, ui::TerminalPresenter, FileStore};
