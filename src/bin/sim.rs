//! Headless game: the player fires at random untried cells until the battle is
//! decided. Prints a JSON summary.

use battleship_remastered::{
    Coord, GameEngine, MemoryStore, RecordingPresenter, TurnOutcome, BOARD_SIZE,
};
use rand::seq::SliceRandom;
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <seed>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;

    let mut engine = GameEngine::with_rng(
        MemoryStore::new(),
        RecordingPresenter::new(),
        SmallRng::seed_from_u64(seed),
    );
    let mut shots: Vec<Coord> = Coord::all().collect();
    shots.shuffle(&mut SmallRng::seed_from_u64(seed.wrapping_add(1)));

    let mut turns = 0;
    let mut outcome = TurnOutcome::Continued;
    while let Some(cell) = shots.pop() {
        outcome = engine.handle_player_shot(cell, None)?;
        turns += 1;
        if matches!(outcome, TurnOutcome::Victory | TurnOutcome::Defeat) {
            break;
        }
    }

    let winner = match outcome {
        TurnOutcome::Victory => Some("player"),
        TurnOutcome::Defeat => Some("computer"),
        _ => None,
    };
    let result = json!({
        "seed": seed,
        "turns": turns,
        "winner": winner,
        "balance": engine.balance(),
        "board_cells": BOARD_SIZE * BOARD_SIZE,
        "notices": engine.presenter().notices.len(),
        "saves": engine.store().writes(),
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
