//! Boundary between the engine and whatever draws the game.

use alloc::string::String;
use alloc::vec::Vec;

use crate::board::Board;
use crate::game::Phase;
use crate::inventory::Inventory;

/// Read-only snapshot handed to the presenter after every mutation.
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    pub phase: Phase,
    pub player_board: &'a Board,
    pub computer_board: &'a Board,
    pub balance: i64,
    pub inventory: &'a Inventory,
}

/// Answer to the "new game" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewGameMode {
    Auto,
    Manual,
    Cancel,
}

/// Callbacks the engine drives. All calls are synchronous.
pub trait Presenter {
    /// Redraw from a full snapshot.
    fn on_state_changed(&mut self, view: &GameView<'_>);

    /// Informational message (sinks, victory, defeat, confusion ray).
    fn on_notice(&mut self, title: &str, message: &str);

    /// Validation failure (bad placement, incomplete setup, insufficient funds).
    fn on_error(&mut self, title: &str, message: &str);

    /// The selected powerup has been spent and should be deselected.
    fn on_selection_cleared(&mut self) {}

    /// Ask how the next game should be set up.
    fn request_new_game_mode(&mut self) -> NewGameMode {
        NewGameMode::Cancel
    }
}

/// Presenter that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn on_state_changed(&mut self, _view: &GameView<'_>) {}
    fn on_notice(&mut self, _title: &str, _message: &str) {}
    fn on_error(&mut self, _title: &str, _message: &str) {}
}

/// Presenter that keeps a log of every callback.
#[derive(Debug, Clone)]
pub struct RecordingPresenter {
    pub notices: Vec<(String, String)>,
    pub errors: Vec<(String, String)>,
    pub refreshes: usize,
    pub selections_cleared: usize,
    pub last_balance: Option<i64>,
    /// Answer returned from `request_new_game_mode`.
    pub next_mode: NewGameMode,
}

impl Default for RecordingPresenter {
    fn default() -> Self {
        Self {
            notices: Vec::new(),
            errors: Vec::new(),
            refreshes: 0,
            selections_cleared: 0,
            last_balance: None,
            next_mode: NewGameMode::Cancel,
        }
    }
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notices whose title matches exactly.
    pub fn notices_titled(&self, title: &str) -> usize {
        self.notices.iter().filter(|(t, _)| t == title).count()
    }
}

impl Presenter for RecordingPresenter {
    fn on_state_changed(&mut self, view: &GameView<'_>) {
        self.refreshes += 1;
        self.last_balance = Some(view.balance);
    }

    fn on_notice(&mut self, title: &str, message: &str) {
        self.notices.push((title.into(), message.into()));
    }

    fn on_error(&mut self, title: &str, message: &str) {
        self.errors.push((title.into(), message.into()));
    }

    fn on_selection_cleared(&mut self) {
        self.selections_cleared += 1;
    }

    fn request_new_game_mode(&mut self) -> NewGameMode {
        self.next_mode
    }
}
