use alloc::format;
use alloc::string::{String, ToString};
use rand::rngs::SmallRng;

use crate::{
    ai::HuntTargetAi,
    board::Board,
    common::{BoardError, CellStatus, Coord},
    config::{ship_def, Rules, SHIPS},
    inventory::Inventory,
    persistence::{self, SaveData, SaveStore},
    powerup::{Effect, Powerup},
    presenter::{GameView, NewGameMode, Presenter},
    ship::Orientation,
};

/// Lifecycle of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Setup,
    Playing,
    GameOver,
}

/// Whose board a shot lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Computer,
}

/// Result of resolving a single shot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShotResult {
    /// The cell had already been fired upon; nothing changed.
    AlreadyResolved,
    Miss,
    Hit,
    /// The hit sank the named ship.
    Sunk(String),
}

/// What a player command led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Input was not acted upon and no turn was consumed.
    Ignored,
    /// The exchange resolved and the game goes on.
    Continued,
    Victory,
    Defeat,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("cannot place {ship}: {source}")]
    InvalidPlacement {
        ship: &'static str,
        source: BoardError,
    },
    #[error("setup incomplete: {missing} ship(s) still to place")]
    IncompleteSetup { missing: usize },
    #[error("{item} costs ${cost} but the balance is ${balance}")]
    InsufficientFunds { item: Powerup, cost: i64, balance: i64 },
    #[error("unknown ship `{0}`")]
    UnknownShip(String),
    #[error("not allowed during the {0:?} phase")]
    WrongPhase(Phase),
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Owns both boards, the economy and the computer opponent, and drives turns.
pub struct GameEngine<S: SaveStore, P: Presenter> {
    phase: Phase,
    player_board: Board,
    computer_board: Board,
    wallet: SaveData,
    ai: HuntTargetAi,
    skip_opponent_turn: bool,
    rules: Rules,
    rng: SmallRng,
    store: S,
    presenter: P,
}

impl<S: SaveStore, P: Presenter> GameEngine<S, P> {
    /// Load the saved wallet from `store` and start an auto-placed game.
    pub fn with_rng(store: S, presenter: P, mut rng: SmallRng) -> Self {
        let wallet = persistence::load(&store);
        let ai = HuntTargetAi::new(&mut rng);
        let mut engine = Self {
            phase: Phase::Setup,
            player_board: Board::new(),
            computer_board: Board::new(),
            wallet,
            ai,
            skip_opponent_turn: false,
            rules: Rules::default(),
            rng,
            store,
            presenter,
        };
        engine.start_auto_game();
        engine
    }

    /// Like [`with_rng`](Self::with_rng), seeded from the thread RNG.
    #[cfg(feature = "std")]
    pub fn new(store: S, presenter: P) -> Self {
        use rand::SeedableRng;
        let rng = SmallRng::from_rng(&mut rand::rng());
        Self::with_rng(store, presenter, rng)
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn balance(&self) -> i64 {
        self.wallet.balance
    }

    pub fn inventory(&self) -> &Inventory {
        &self.wallet.inventory
    }

    pub fn player_board(&self) -> &Board {
        &self.player_board
    }

    pub fn computer_board(&self) -> &Board {
        &self.computer_board
    }

    /// The computer's targeting state.
    pub fn opponent(&self) -> &HuntTargetAi {
        &self.ai
    }

    /// Replace the computer's targeting state, e.g. with a scripted order.
    pub fn set_opponent(&mut self, ai: HuntTargetAi) {
        self.ai = ai;
    }

    /// Whether the computer's next turn will be skipped.
    pub fn opponent_skips_turn(&self) -> bool {
        self.skip_opponent_turn
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Snapshot of everything the presenter draws.
    pub fn view(&self) -> GameView<'_> {
        GameView {
            phase: self.phase,
            player_board: &self.player_board,
            computer_board: &self.computer_board,
            balance: self.wallet.balance,
            inventory: &self.wallet.inventory,
        }
    }

    fn refresh(&mut self) {
        let view = GameView {
            phase: self.phase,
            player_board: &self.player_board,
            computer_board: &self.computer_board,
            balance: self.wallet.balance,
            inventory: &self.wallet.inventory,
        };
        self.presenter.on_state_changed(&view);
    }

    fn notice(&mut self, title: &str, message: &str) {
        log::info!("{}: {}", title, message);
        self.presenter.on_notice(title, message);
    }

    fn reject(&mut self, title: &str, message: &str) {
        log::debug!("rejected: {}: {}", title, message);
        self.presenter.on_error(title, message);
    }

    fn persist(&mut self) {
        persistence::save(&mut self.store, &self.wallet);
    }

    fn reset(&mut self) {
        self.player_board.reset();
        self.computer_board.reset();
        self.ai = HuntTargetAi::new(&mut self.rng);
        self.skip_opponent_turn = false;
        self.phase = Phase::Setup;
        self.computer_board.place_ships_randomly(&mut self.rng);
    }

    /// New game with both fleets placed at random; play starts immediately.
    pub fn start_auto_game(&mut self) {
        self.reset();
        self.player_board.place_ships_randomly(&mut self.rng);
        self.phase = Phase::Playing;
        log::info!("new game: automatic placement");
        self.refresh();
    }

    /// New game where the player places their own fleet.
    pub fn start_manual_setup(&mut self) {
        self.reset();
        log::info!("new game: manual placement");
        self.refresh();
    }

    /// Ask the presenter how to start the next game and act on the answer.
    pub fn prompt_new_game(&mut self) -> NewGameMode {
        let mode = self.presenter.request_new_game_mode();
        match mode {
            NewGameMode::Auto => self.start_auto_game(),
            NewGameMode::Manual => self.start_manual_setup(),
            NewGameMode::Cancel => {}
        }
        mode
    }

    /// Pick up the named ship (if placed) and drop it at `origin`.
    ///
    /// A failed drop leaves the ship unplaced; its previous position is not restored.
    pub fn handle_player_setup_click(
        &mut self,
        origin: Coord,
        ship_name: &str,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        if self.phase != Phase::Setup {
            return Err(GameError::WrongPhase(self.phase));
        }
        let def = ship_def(ship_name).ok_or_else(|| GameError::UnknownShip(ship_name.into()))?;
        self.player_board.remove_ship(def.name());
        let placed = self.player_board.place_ship(
            def.name(),
            def.length(),
            def.reward(),
            origin,
            orientation,
        );
        self.refresh();
        placed.map_err(|source| {
            self.reject(
                "Invalid Placement",
                &format!("Cannot place the {} at {}: {}", def.name(), origin, source),
            );
            GameError::InvalidPlacement {
                ship: def.name(),
                source,
            }
        })
    }

    /// Leave setup once the whole fleet is on the board.
    pub fn finish_setup(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::Setup {
            return Err(GameError::WrongPhase(self.phase));
        }
        let missing = SHIPS
            .iter()
            .filter(|def| !self.player_board.has_ship(def.name()))
            .count();
        if missing > 0 {
            self.reject(
                "Setup Incomplete",
                &format!("Place all {} ships before starting.", SHIPS.len()),
            );
            return Err(GameError::IncompleteSetup { missing });
        }
        self.phase = Phase::Playing;
        log::info!("setup finished, battle begins");
        self.refresh();
        Ok(())
    }

    /// The player fires at `target`, optionally through a powerup, and the
    /// computer answers unless the battle is decided.
    pub fn handle_player_shot(
        &mut self,
        target: Coord,
        powerup: Option<Powerup>,
    ) -> Result<TurnOutcome, GameError> {
        if self.phase != Phase::Playing {
            return Ok(TurnOutcome::Ignored);
        }
        let status = self.computer_board.cell(target)?;
        match powerup {
            Some(item) => {
                // an empty slot still spends the turn
                self.use_powerup(item, target)?;
                self.presenter.on_selection_cleared();
            }
            None if status.is_resolved() => return Ok(TurnOutcome::Ignored),
            None => {
                self.process_shot(Side::Computer, target)?;
            }
        }
        if self.check_win_condition() {
            return Ok(TurnOutcome::Victory);
        }
        self.cpu_turn()
    }

    /// Spend one `item` and apply its effect. Does nothing when none are held.
    fn use_powerup(&mut self, item: Powerup, origin: Coord) -> Result<(), BoardError> {
        if !self.wallet.inventory.take(item) {
            log::debug!("no {} in inventory", item);
            return Ok(());
        }
        self.persist();
        log::info!("player used {} at {}", item, origin);
        match item.effect(origin, &mut self.rng) {
            Effect::Strike(cells) => {
                for cell in cells {
                    self.process_shot(Side::Computer, cell)?;
                }
            }
            Effect::SkipOpponentTurn => {
                self.skip_opponent_turn = true;
                self.notice("Confusion Ray Used!", "CPU will skip this turn.");
            }
            Effect::SeekShip => {
                let found = Coord::all()
                    .find(|&c| self.computer_board.cell(c) == Ok(CellStatus::ShipPresent));
                if let Some(cell) = found {
                    self.process_shot(Side::Computer, cell)?;
                }
            }
        }
        Ok(())
    }

    /// Resolve one shot against `target`'s board. Firing at an already
    /// resolved cell changes nothing.
    pub fn process_shot(&mut self, target: Side, coord: Coord) -> Result<ShotResult, BoardError> {
        let board = match target {
            Side::Player => &mut self.player_board,
            Side::Computer => &mut self.computer_board,
        };
        match board.cell(coord)? {
            CellStatus::Miss | CellStatus::Hit => return Ok(ShotResult::AlreadyResolved),
            CellStatus::Empty => {
                board.set_cell(coord, CellStatus::Miss)?;
                return Ok(ShotResult::Miss);
            }
            CellStatus::ShipPresent => board.set_cell(coord, CellStatus::Hit)?,
        }
        let sunk = match board.ship_at_mut(coord) {
            Some(ship) => ship
                .register_hit()
                .then(|| (ship.name().to_string(), ship.reward())),
            None => {
                log::warn!("{:?} board shows a ship at {} but none is placed", target, coord);
                None
            }
        };
        match sunk {
            Some((name, reward)) => {
                self.resolve_sink(target, &name, reward);
                Ok(ShotResult::Sunk(name))
            }
            None => Ok(ShotResult::Hit),
        }
    }

    fn resolve_sink(&mut self, target: Side, name: &str, reward: i64) {
        match target {
            Side::Computer => {
                self.wallet.balance += reward;
                self.notice(
                    &format!("You sunk the {}!", name),
                    &format!("Reward: ${}", reward),
                );
            }
            Side::Player => {
                let penalty = self.rules.loss_penalty.amount(reward);
                self.wallet.balance -= penalty;
                self.notice(
                    &format!("Your {} was sunk!", name),
                    &format!("Penalty: -${}", penalty),
                );
                self.ai.abandon_pursuit();
            }
        }
        self.persist();
    }

    /// Refresh the presenter and, if the computer's fleet is gone, end the game
    /// with a victory bonus. Returns `true` on victory.
    pub fn check_win_condition(&mut self) -> bool {
        self.refresh();
        if self.phase != Phase::Playing || !self.computer_board.all_sunk() {
            return false;
        }
        self.phase = Phase::GameOver;
        self.wallet.balance += self.rules.victory_bonus;
        self.persist();
        self.notice(
            "VICTORY!",
            &format!(
                "You defeated the Computer! Bonus: ${}. Start a new game to play again.",
                self.rules.victory_bonus
            ),
        );
        self.refresh();
        true
    }

    /// The computer's move: skip if confused, otherwise pursue or explore.
    pub fn cpu_turn(&mut self) -> Result<TurnOutcome, GameError> {
        if self.phase != Phase::Playing {
            return Ok(TurnOutcome::Ignored);
        }
        if self.skip_opponent_turn {
            self.skip_opponent_turn = false;
            log::info!("computer is confused and skips its turn");
            self.refresh();
            return Ok(TurnOutcome::Continued);
        }
        let Some(target) = self.ai.next_target() else {
            log::warn!("computer has no cells left to fire at");
            return Ok(TurnOutcome::Continued);
        };

        let before = self.player_board.cell(target)?;
        let result = self.process_shot(Side::Player, target)?;
        let after = self.player_board.cell(target)?;
        log::debug!("computer fired at {}: {:?}", target, result);
        if before == CellStatus::ShipPresent && after == CellStatus::Hit {
            self.ai.pursue(target);
        }
        self.refresh();

        if self.player_board.all_sunk() {
            self.phase = Phase::GameOver;
            self.persist();
            self.notice(
                "Game Over",
                "Computer Won! You lost money. Start a new game to play again.",
            );
            self.refresh();
            return Ok(TurnOutcome::Defeat);
        }
        Ok(TurnOutcome::Continued)
    }

    /// Buy one `item` from the shop.
    pub fn buy_item(&mut self, item: Powerup) -> Result<(), GameError> {
        let cost = item.cost();
        let balance = self.wallet.balance;
        if balance < cost {
            self.reject("Insufficient Funds", "Not enough money!");
            return Err(GameError::InsufficientFunds {
                item,
                cost,
                balance,
            });
        }
        self.wallet.balance -= cost;
        self.wallet.inventory.add(item, 1);
        log::info!("bought {} for ${}", item, cost);
        self.persist();
        self.refresh();
        Ok(())
    }
}
