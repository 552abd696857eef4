#![cfg(feature = "std")]

use std::io::{self, BufRead, Write};
use std::string::String;

use crate::{
    board::Board,
    common::CellStatus,
    config::BOARD_SIZE,
    game::Phase,
    presenter::{GameView, NewGameMode, Presenter},
};

fn cell_char(status: CellStatus, reveal: bool) -> char {
    match status {
        CellStatus::Hit => 'X',
        CellStatus::Miss => 'o',
        CellStatus::ShipPresent if reveal => 'S',
        _ => '.',
    }
}

/// Render one grid, hiding ships unless `reveal` is set.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let mut out = String::from("  ");
    for c in 0..BOARD_SIZE {
        out.push_str(&std::format!(" {}", c));
    }
    out.push('\n');
    for (r, row) in board.cells().iter().enumerate() {
        out.push((b'A' + r as u8) as char);
        out.push(' ');
        for &status in row {
            out.push(' ');
            out.push(cell_char(status, reveal));
        }
        out.push('\n');
    }
    out
}

/// Presenter that draws to stdout and prompts on stdin.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Presenter for TerminalPresenter {
    fn on_state_changed(&mut self, view: &GameView<'_>) {
        std::println!("\nEnemy waters:");
        std::print!("{}", render_board(view.computer_board, false));
        std::println!("\nYour fleet:");
        std::print!("{}", render_board(view.player_board, true));
        std::print!("\nBalance: ${}", view.balance);
        for (item, n) in view.inventory.iter() {
            std::print!("  {} x{}", item, n);
        }
        std::println!();
        match view.phase {
            Phase::Setup => std::println!("Setup: place <ship> <cell> <h|v>, then `done`."),
            Phase::Playing => std::println!("Fire with `fire <cell>` or `use <powerup> <cell>`."),
            Phase::GameOver => std::println!("Game over. Type `new` for another round."),
        }
    }

    fn on_notice(&mut self, title: &str, message: &str) {
        std::println!("\n*** {} ***\n{}", title, message);
    }

    fn on_error(&mut self, title: &str, message: &str) {
        std::println!("\n!!! {} !!!\n{}", title, message);
    }

    fn on_selection_cleared(&mut self) {
        std::println!("(powerup spent)");
    }

    fn request_new_game_mode(&mut self) -> NewGameMode {
        std::print!("New game: [a]uto placement, [m]anual placement, or [c]ancel? ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return NewGameMode::Cancel;
        }
        match line.trim().to_ascii_lowercase().as_str() {
            "a" | "auto" => NewGameMode::Auto,
            "m" | "manual" => NewGameMode::Manual,
            _ => NewGameMode::Cancel,
        }
    }
}
