//! Hunt/target opponent: explores a shuffled list of untried cells and, after a
//! confirmed hit, pursues the orthogonal neighbours before exploring again.
//!
//! Every cell lives in at most one of `remaining_shots` and `target_stack`, and a
//! cell leaves both for good once it is handed out as a target.

use alloc::vec::Vec;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::common::Coord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuntTargetAi {
    remaining_shots: Vec<Coord>,
    target_stack: Vec<Coord>,
}

impl HuntTargetAi {
    /// All 100 cells in a fresh random order, nothing to pursue.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut shots: Vec<Coord> = Coord::all().collect();
        shots.shuffle(rng);
        Self::from_order(shots)
    }

    /// Explore `shots` back to front. Used for scripted opponents.
    pub fn from_order(shots: Vec<Coord>) -> Self {
        Self {
            remaining_shots: shots,
            target_stack: Vec::new(),
        }
    }

    /// Untried cells; the next explore-mode target is the last element.
    pub fn remaining_shots(&self) -> &[Coord] {
        &self.remaining_shots
    }

    /// Queued pursuit targets; the next one is the last element. Cells dropped by
    /// [`abandon_pursuit`](Self::abandon_pursuit) return to the explore list and
    /// can still be fired at later.
    pub fn target_stack(&self) -> &[Coord] {
        &self.target_stack
    }

    pub fn is_pursuing(&self) -> bool {
        !self.target_stack.is_empty()
    }

    /// Pick the next cell to fire at, pursuit first. `None` once every cell is spent.
    pub fn next_target(&mut self) -> Option<Coord> {
        self.target_stack
            .pop()
            .or_else(|| self.remaining_shots.pop())
    }

    /// Queue the untried orthogonal neighbours of a fresh hit.
    pub fn pursue(&mut self, hit: Coord) {
        for n in hit.neighbors() {
            if let Some(idx) = self.remaining_shots.iter().position(|&c| c == n) {
                self.remaining_shots.remove(idx);
                self.target_stack.push(n);
            }
        }
        log::debug!("pursuing around {}: {} queued", hit, self.target_stack.len());
    }

    /// Drop the current pursuit. Queued cells were never fired at, so they go back
    /// to the front of the explore list and are tried last.
    pub fn abandon_pursuit(&mut self) {
        let queued = self.target_stack.len();
        let mut untried = core::mem::take(&mut self.remaining_shots);
        self.remaining_shots = core::mem::take(&mut self.target_stack);
        self.remaining_shots.append(&mut untried);
        if queued > 0 {
            log::debug!("abandoned pursuit, {} cells returned to exploration", queued);
        }
    }
}
