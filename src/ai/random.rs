//! Random playstyle
//!
//! Picks uniformly among the actions the next character can afford.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{Playstyle, PlaystyleKind};
use crate::game::{Action, BattleQueue};

/// Chooses a random affordable action
pub struct RandomPlaystyle {
    rng: StdRng,
}

impl Default for RandomPlaystyle {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPlaystyle {
    /// Create a random playstyle seeded from system entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a reproducible random playstyle
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Playstyle for RandomPlaystyle {
    fn kind(&self) -> PlaystyleKind {
        PlaystyleKind::Random
    }

    fn select_action(&mut self, queue: &BattleQueue, _key: Option<char>) -> Option<Action> {
        let actor = queue.peek()?;
        queue
            .available_actions(actor)
            .choose(&mut self.rng)
            .copied()
    }
}
