use crate::ship::ShipDef;

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;
pub const SHIPS: [ShipDef; NUM_SHIPS] = [
    ShipDef::new("Carrier", 5, 350),
    ShipDef::new("Battleship", 4, 600),
    ShipDef::new("Submarine", 3, 800),
    ShipDef::new("Destroyer", 3, 800),
    ShipDef::new("Patrol Boat", 2, 1100),
];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Credited once when the whole computer fleet is sunk.
pub const VICTORY_BONUS: i64 = 1200;

/// Default location of the single save slot.
pub const SAVE_FILE: &str = "user.dat";

/// Look up a fleet definition by its display name.
pub fn ship_def(name: &str) -> Option<ShipDef> {
    SHIPS.iter().copied().find(|def| def.name() == name)
}

/// What losing one of the player's ships costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LossPenalty {
    /// Debit the ship's full reward.
    FullReward,
    /// Debit a third of the reward, rounded down.
    #[default]
    ThirdOfReward,
}

impl LossPenalty {
    pub fn amount(self, reward: i64) -> i64 {
        match self {
            LossPenalty::FullReward => reward,
            LossPenalty::ThirdOfReward => reward / 3,
        }
    }
}

/// Economic rules applied by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub victory_bonus: i64,
    pub loss_penalty: LossPenalty,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            victory_bonus: VICTORY_BONUS,
            loss_penalty: LossPenalty::default(),
        }
    }
}
