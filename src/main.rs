use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use battleship_remastered::{
    init_logging, persistence, ui::TerminalPresenter, Coord, FileStore, GameEngine, GameError,
    NewGameMode, Orientation, Powerup, TurnOutcome, SAVE_FILE, SHIPS,
};
use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Location of the save file.
    #[arg(long, global = true, default_value = SAVE_FILE)]
    save: PathBuf,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer in the terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        /// Place your own fleet instead of a random one.
        #[arg(long)]
        manual: bool,
    },
    /// Show the saved balance and powerups.
    Wallet,
    /// Delete the save file.
    Reset,
}

const HELP: &str = "\
commands:
  fire <cell>                   fire at an enemy cell, e.g. `fire B4`
  use <powerup> <cell>          fire through a powerup, e.g. `use Cross Fire C3`
  buy <powerup>                 buy a powerup
  shop                          list powerup prices
  place <ship> <cell> <h|v>     setup only, e.g. `place Patrol Boat A0 h`
  done                          finish setup
  new                           start a new game
  quit";

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let store = FileStore::new(cli.save);

    match cli.command.unwrap_or(Commands::Play {
        seed: None,
        manual: false,
    }) {
        Commands::Wallet => {
            let data = persistence::load(&store);
            println!("Balance: ${}", data.balance);
            for (item, n) in data.inventory.iter() {
                println!("  {:<14} x{}", item.name(), n);
            }
        }
        Commands::Reset => {
            store.clear()?;
            println!("Save file {} removed.", store.path().display());
        }
        Commands::Play { seed, manual } => {
            let rng = match seed {
                Some(s) => {
                    println!("Using fixed seed: {} (game will be reproducible)", s);
                    SmallRng::seed_from_u64(s)
                }
                None => SmallRng::from_rng(&mut rand::rng()),
            };
            let mut engine = GameEngine::with_rng(store, TerminalPresenter::new(), rng);
            if manual {
                engine.start_manual_setup();
            }
            run(&mut engine)?;
        }
    }
    Ok(())
}

fn run(engine: &mut GameEngine<FileStore, TerminalPresenter>) -> anyhow::Result<()> {
    println!("{}", HELP);
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, args)) = words.split_first() else {
            continue;
        };
        let result = match cmd.to_ascii_lowercase().as_str() {
            "quit" | "exit" => return Ok(()),
            "help" => {
                println!("{}", HELP);
                Ok(())
            }
            "shop" => {
                for item in Powerup::ALL {
                    println!("  {:<14} ${}", item.name(), item.cost());
                }
                Ok(())
            }
            "new" => {
                if engine.prompt_new_game() == NewGameMode::Cancel {
                    println!("Cancelled.");
                }
                Ok(())
            }
            "fire" => parse_cell(args).and_then(|cell| shoot(engine, cell, None)),
            "use" => parse_powerup_shot(args)
                .and_then(|(item, cell)| shoot(engine, cell, Some(item))),
            "buy" => args
                .join(" ")
                .parse::<Powerup>()
                .map_err(anyhow::Error::from)
                .and_then(|item| report(engine.buy_item(item))),
            "place" => parse_placement(args).and_then(|(name, cell, orientation)| {
                report(engine.handle_player_setup_click(cell, &name, orientation))
            }),
            "done" => report(engine.finish_setup()),
            _ => Err(anyhow::anyhow!("unknown command `{}`; try `help`", cmd)),
        };
        if let Err(e) = result {
            println!("{}", e);
        }
    }
}

fn shoot(
    engine: &mut GameEngine<FileStore, TerminalPresenter>,
    cell: Coord,
    item: Option<Powerup>,
) -> anyhow::Result<()> {
    match engine.handle_player_shot(cell, item)? {
        TurnOutcome::Ignored => println!("Nothing happened."),
        TurnOutcome::Victory | TurnOutcome::Defeat => println!("Type `new` to play again."),
        TurnOutcome::Continued => {}
    }
    Ok(())
}

// Validation failures were already shown by the presenter.
fn report(result: Result<(), GameError>) -> anyhow::Result<()> {
    match result {
        Ok(()) | Err(GameError::InvalidPlacement { .. }) => Ok(()),
        Err(GameError::IncompleteSetup { .. }) | Err(GameError::InsufficientFunds { .. }) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn parse_cell(args: &[&str]) -> anyhow::Result<Coord> {
    match args {
        [cell] => Ok(cell.parse()?),
        _ => Err(anyhow::anyhow!("expected a single cell such as B4")),
    }
}

fn parse_powerup_shot(args: &[&str]) -> anyhow::Result<(Powerup, Coord)> {
    let (cell, name) = args
        .split_last()
        .ok_or_else(|| anyhow::anyhow!("expected `use <powerup> <cell>`"))?;
    Ok((name.join(" ").parse()?, cell.parse()?))
}

fn parse_placement(args: &[&str]) -> anyhow::Result<(String, Coord, Orientation)> {
    let [name @ .., cell, orient] = args else {
        return Err(anyhow::anyhow!("expected `place <ship> <cell> <h|v>`"));
    };
    let orientation = match orient.to_ascii_lowercase().as_str() {
        "h" | "horizontal" => Orientation::Horizontal,
        "v" | "vertical" => Orientation::Vertical,
        other => return Err(anyhow::anyhow!("unknown orientation `{}`", other)),
    };
    let name = name.join(" ");
    let name = SHIPS
        .iter()
        .find(|def| def.name().eq_ignore_ascii_case(&name))
        .map(|def| def.name().to_string())
        .unwrap_or(name);
    Ok((name, cell.parse()?, orientation))
}
