use battleship_remastered::{
    persistence, BoardError, CellStatus, Coord, GameEngine, GameError, HuntTargetAi, LossPenalty,
    MemoryStore, NewGameMode, Orientation, Phase, Powerup, RecordingPresenter, Rules, SaveData,
    ShotResult, Side, TurnOutcome, SHIPS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

type Engine = GameEngine<MemoryStore, RecordingPresenter>;

fn cell(label: &str) -> Coord {
    label.parse().unwrap()
}

fn engine(seed: u64) -> Engine {
    engine_with_balance(0, seed)
}

fn engine_with_balance(balance: i64, seed: u64) -> Engine {
    let data = SaveData {
        balance,
        ..SaveData::default()
    };
    GameEngine::with_rng(
        MemoryStore::with_data(&data),
        RecordingPresenter::new(),
        SmallRng::seed_from_u64(seed),
    )
}

/// Manual setup with every ship laid horizontally on its own row, starting at A0.
fn engine_with_fleet_on_rows(seed: u64) -> Engine {
    let mut e = engine(seed);
    e.start_manual_setup();
    for (i, def) in SHIPS.iter().enumerate() {
        e.handle_player_setup_click(Coord::new(i * 2, 0), def.name(), Orientation::Horizontal)
            .unwrap();
    }
    e.finish_setup().unwrap();
    e
}

#[test]
fn test_new_engine_starts_auto_game() {
    let e = engine(1);
    assert_eq!(e.phase(), Phase::Playing);
    assert_eq!(e.player_board().ships().len(), 5);
    assert_eq!(e.computer_board().ships().len(), 5);
    assert_eq!(e.opponent().remaining_shots().len(), 100);
    assert!(e.opponent().target_stack().is_empty());
    assert!(e.presenter().refreshes > 0);
}

#[test]
fn test_balance_is_loaded_from_store() {
    let e = engine_with_balance(4321, 2);
    assert_eq!(e.balance(), 4321);
}

#[test]
fn test_manual_setup_flow() {
    let mut e = engine(3);
    e.start_manual_setup();
    assert_eq!(e.phase(), Phase::Setup);
    assert!(e.player_board().ships().is_empty());
    assert_eq!(e.computer_board().ships().len(), 5);

    e.handle_player_setup_click(cell("B2"), "Destroyer", Orientation::Horizontal)
        .unwrap();
    assert_eq!(
        e.finish_setup(),
        Err(GameError::IncompleteSetup { missing: 4 })
    );
    assert_eq!(e.phase(), Phase::Setup);
    assert_eq!(e.presenter().errors.len(), 1);

    // shots are ignored until play begins
    assert_eq!(
        e.handle_player_shot(cell("A0"), None).unwrap(),
        TurnOutcome::Ignored
    );
}

#[test]
fn test_setup_click_picks_up_and_redrops() {
    let mut e = engine(4);
    e.start_manual_setup();
    e.handle_player_setup_click(cell("B2"), "Destroyer", Orientation::Horizontal)
        .unwrap();
    e.handle_player_setup_click(cell("E5"), "Destroyer", Orientation::Vertical)
        .unwrap();
    let board = e.player_board();
    assert_eq!(board.ships().len(), 1);
    assert_eq!(board.cell(cell("B2")).unwrap(), CellStatus::Empty);
    assert_eq!(
        board.ships()[0].cells(),
        &[cell("E5"), cell("F5"), cell("G5")]
    );

    // re-dropping over its own old cells is fine
    e.handle_player_setup_click(cell("E5"), "Destroyer", Orientation::Horizontal)
        .unwrap();
    assert_eq!(e.player_board().ships()[0].cells()[2], cell("E7"));
}

#[test]
fn test_failed_setup_click_leaves_ship_unplaced() {
    let mut e = engine(5);
    e.start_manual_setup();
    e.handle_player_setup_click(cell("B2"), "Destroyer", Orientation::Horizontal)
        .unwrap();
    e.handle_player_setup_click(cell("D0"), "Submarine", Orientation::Horizontal)
        .unwrap();

    let err = e
        .handle_player_setup_click(cell("B4"), "Submarine", Orientation::Horizontal)
        .unwrap_err();
    assert_eq!(
        err,
        GameError::InvalidPlacement {
            ship: "Submarine",
            source: BoardError::Overlap(cell("B4")),
        }
    );
    assert!(!e.player_board().has_ship("Submarine"));
    assert_eq!(e.player_board().cell(cell("D0")).unwrap(), CellStatus::Empty);
    assert!(e.player_board().has_ship("Destroyer"));
    assert_eq!(e.presenter().errors[0].0, "Invalid Placement");

    assert!(matches!(
        e.handle_player_setup_click(cell("J7"), "Carrier", Orientation::Horizontal),
        Err(GameError::InvalidPlacement { ship: "Carrier", .. })
    ));
    assert_eq!(
        e.handle_player_setup_click(cell("A0"), "Cruiser", Orientation::Horizontal),
        Err(GameError::UnknownShip("Cruiser".into()))
    );
}

#[test]
fn test_setup_commands_outside_setup() {
    let mut e = engine(6);
    assert_eq!(e.finish_setup(), Err(GameError::WrongPhase(Phase::Playing)));
    assert_eq!(
        e.handle_player_setup_click(cell("A0"), "Carrier", Orientation::Horizontal),
        Err(GameError::WrongPhase(Phase::Playing))
    );
}

#[test]
fn test_repeat_fire_is_ignored() {
    let mut e = engine(7);
    let target = cell("E5");
    assert_ne!(
        e.handle_player_shot(target, None).unwrap(),
        TurnOutcome::Ignored
    );
    let fired = 100 - e.opponent().remaining_shots().len();
    assert_eq!(
        e.handle_player_shot(target, None).unwrap(),
        TurnOutcome::Ignored
    );
    assert_eq!(100 - e.opponent().remaining_shots().len(), fired, "no computer turn");
}

#[test]
fn test_out_of_range_shot_is_an_error() {
    let mut e = engine(8);
    assert_eq!(
        e.handle_player_shot(Coord::new(0, 10), None),
        Err(GameError::Board(BoardError::OutOfBounds { row: 0, col: 10 }))
    );
}

#[test]
fn test_sinking_patrol_boat_rewards_once() {
    let mut e = engine(9);
    let cells = e
        .computer_board()
        .ships()
        .iter()
        .find(|s| s.name() == "Patrol Boat")
        .unwrap()
        .cells()
        .to_vec();

    assert_eq!(e.process_shot(Side::Computer, cells[0]).unwrap(), ShotResult::Hit);
    assert_eq!(e.balance(), 0);
    assert_eq!(
        e.process_shot(Side::Computer, cells[1]).unwrap(),
        ShotResult::Sunk("Patrol Boat".into())
    );
    assert_eq!(e.balance(), 1100);
    assert_eq!(
        e.process_shot(Side::Computer, cells[1]).unwrap(),
        ShotResult::AlreadyResolved
    );
    assert_eq!(e.balance(), 1100);
    assert_eq!(e.presenter().notices_titled("You sunk the Patrol Boat!"), 1);
    assert_eq!(persistence::load(e.store()).balance, 1100);
}

#[test]
fn test_losing_a_ship_costs_a_third_by_default() {
    let mut e = engine_with_fleet_on_rows(10);
    // Patrol Boat sits at I0..I1
    e.process_shot(Side::Player, cell("I0")).unwrap();
    e.process_shot(Side::Player, cell("I1")).unwrap();
    assert_eq!(e.balance(), -(1100 / 3));
    assert_eq!(e.presenter().notices_titled("Your Patrol Boat was sunk!"), 1);
}

#[test]
fn test_full_reward_penalty_rule() {
    let mut e = engine_with_fleet_on_rows(11).with_rules(Rules {
        loss_penalty: LossPenalty::FullReward,
        ..Rules::default()
    });
    e.process_shot(Side::Player, cell("I0")).unwrap();
    e.process_shot(Side::Player, cell("I1")).unwrap();
    assert_eq!(e.balance(), -1100);
}

#[test]
fn test_cpu_hit_queues_neighbours() {
    let mut e = engine(12);
    e.start_manual_setup();
    e.handle_player_setup_click(cell("B2"), "Destroyer", Orientation::Horizontal)
        .unwrap();
    e.handle_player_setup_click(cell("D0"), "Carrier", Orientation::Horizontal)
        .unwrap();
    e.handle_player_setup_click(cell("F0"), "Battleship", Orientation::Horizontal)
        .unwrap();
    e.handle_player_setup_click(cell("H0"), "Submarine", Orientation::Horizontal)
        .unwrap();
    e.handle_player_setup_click(cell("J0"), "Patrol Boat", Orientation::Horizontal)
        .unwrap();
    e.finish_setup().unwrap();

    let mut order: Vec<Coord> = Coord::all().filter(|&c| c != cell("B4")).collect();
    order.push(cell("B4"));
    e.set_opponent(HuntTargetAi::from_order(order));

    assert_eq!(e.cpu_turn().unwrap(), TurnOutcome::Continued);
    assert_eq!(e.player_board().cell(cell("B4")).unwrap(), CellStatus::Hit);
    let stack = e.opponent().target_stack();
    assert_eq!(stack, &[cell("B5"), cell("B3"), cell("C4"), cell("A4")]);
    assert!(stack.iter().all(|c| !e.opponent().remaining_shots().contains(c)));

    // next turn pursues A4 first
    e.cpu_turn().unwrap();
    assert_eq!(e.player_board().cell(cell("A4")).unwrap(), CellStatus::Miss);
}

#[test]
fn test_cpu_sink_abandons_pursuit() {
    let mut e = engine_with_fleet_on_rows(13);
    // Patrol Boat at I0..I1: open on I1, so I0 is still queued behind other cells
    let mut order: Vec<Coord> = Coord::all().filter(|&c| c != cell("I1")).collect();
    order.push(cell("I1"));
    e.set_opponent(HuntTargetAi::from_order(order));

    e.cpu_turn().unwrap();
    assert_eq!(
        e.opponent().target_stack(),
        &[cell("I2"), cell("I0"), cell("J1"), cell("H1")]
    );
    e.cpu_turn().unwrap();
    assert_eq!(e.player_board().cell(cell("H1")).unwrap(), CellStatus::Miss);
    e.cpu_turn().unwrap();
    assert_eq!(e.player_board().cell(cell("J1")).unwrap(), CellStatus::Miss);
    e.cpu_turn().unwrap();
    assert!(e.player_board().ship_at(cell("I0")).unwrap().is_sunk());

    // I2 was dropped from the pursuit and goes back to exploration; the stack
    // now only holds the untried neighbours of the sinking hit
    assert_eq!(e.opponent().target_stack(), &[cell("J0"), cell("H0")]);
    assert_eq!(e.opponent().remaining_shots()[0], cell("I2"));
    assert!(!e.opponent().remaining_shots().contains(&cell("I0")));
}

#[test]
fn test_computer_wins_within_one_hundred_turns() {
    let mut e = engine(14);
    let mut outcome = TurnOutcome::Continued;
    for _ in 0..100 {
        outcome = e.cpu_turn().unwrap();
        if outcome == TurnOutcome::Defeat {
            break;
        }
    }
    assert_eq!(outcome, TurnOutcome::Defeat);
    assert_eq!(e.phase(), Phase::GameOver);
    let penalty: i64 = SHIPS.iter().map(|d| d.reward() / 3).sum();
    assert_eq!(e.balance(), -penalty);
    assert_eq!(e.presenter().notices_titled("Game Over"), 1);
    assert_eq!(persistence::load(e.store()).balance, -penalty);

    // nothing moves after the game ends
    assert_eq!(e.cpu_turn().unwrap(), TurnOutcome::Ignored);
    assert_eq!(
        e.handle_player_shot(cell("A0"), None).unwrap(),
        TurnOutcome::Ignored
    );
}

#[test]
fn test_full_game_reaches_game_over() {
    let mut e = engine(15);
    let mut outcome = TurnOutcome::Continued;
    for c in Coord::all() {
        outcome = e.handle_player_shot(c, None).unwrap();
        if matches!(outcome, TurnOutcome::Victory | TurnOutcome::Defeat) {
            break;
        }
    }
    assert!(matches!(outcome, TurnOutcome::Victory | TurnOutcome::Defeat));
    assert_eq!(e.phase(), Phase::GameOver);
    if outcome == TurnOutcome::Victory {
        assert!(e.computer_board().all_sunk());
        assert_eq!(e.presenter().notices_titled("VICTORY!"), 1);
    } else {
        assert!(e.player_board().all_sunk());
    }
}

#[test]
fn test_buy_item() {
    let mut e = engine_with_balance(6000, 16);
    assert_eq!(
        e.buy_item(Powerup::Nuke),
        Err(GameError::InsufficientFunds {
            item: Powerup::Nuke,
            cost: 50_000,
            balance: 6000,
        })
    );
    assert_eq!(e.balance(), 6000);
    assert!(e.inventory().is_empty());
    assert_eq!(e.presenter().errors.len(), 1);

    e.buy_item(Powerup::Torpedo).unwrap();
    assert_eq!(e.balance(), 1000);
    assert_eq!(e.inventory().count(Powerup::Torpedo), 1);
    e.buy_item(Powerup::ConfusionRay).unwrap();
    assert_eq!(e.balance(), 0);

    let saved = persistence::load(e.store());
    assert_eq!(saved.balance, 0);
    assert_eq!(saved.inventory.count(Powerup::Torpedo), 1);
    assert_eq!(saved.inventory.count(Powerup::ConfusionRay), 1);
}

#[test]
fn test_new_game_keeps_wallet_and_resets_boards() {
    let mut e = engine_with_balance(500, 17);
    e.handle_player_shot(cell("C3"), None).unwrap();
    e.presenter_mut().next_mode = NewGameMode::Manual;
    assert_eq!(e.prompt_new_game(), NewGameMode::Manual);
    assert_eq!(e.phase(), Phase::Setup);
    assert!(e.player_board().ships().is_empty());
    assert!(Coord::all().all(|c| !e.computer_board().cell(c).unwrap().is_resolved()));
    assert_eq!(e.opponent().remaining_shots().len(), 100);
    assert_eq!(e.balance(), 500);

    e.presenter_mut().next_mode = NewGameMode::Cancel;
    e.prompt_new_game();
    assert_eq!(e.phase(), Phase::Setup);

    e.presenter_mut().next_mode = NewGameMode::Auto;
    e.prompt_new_game();
    assert_eq!(e.phase(), Phase::Playing);
    assert_eq!(e.player_board().ships().len(), 5);
}
