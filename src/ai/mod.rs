//! Playstyles
//!
//! A playstyle decides which action the character at the front of the
//! battle queue takes: a human key press, a random pick, or a minimax
//! search over the remaining game tree.

pub mod manual;
pub mod minimax;
pub mod random;
pub mod skill_tree;

use serde::{Deserialize, Serialize};

use crate::config::settings::SearchSettings;
use crate::game::{Action, BattleQueue};

pub use manual::ManualPlaystyle;
pub use minimax::{state_score, IterativeMinimax, RecursiveMinimax, SearchStats};
pub use random::RandomPlaystyle;
pub use skill_tree::SkillDecisionTree;

/// Decides the next action for whoever is at the front of a battle queue
pub trait Playstyle {
    /// Which kind of playstyle this is
    fn kind(&self) -> PlaystyleKind;

    /// Whether this playstyle needs a key press to decide
    fn is_manual(&self) -> bool {
        false
    }

    /// Pick the next action, or `None` when no valid move can be found.
    ///
    /// `key` is the last key pressed and is only consulted by manual
    /// playstyles.
    fn select_action(&mut self, queue: &BattleQueue, key: Option<char>) -> Option<Action>;
}

/// Type of playstyle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaystyleKind {
    /// Follow the player's key presses
    Manual,
    /// Uniformly random among affordable actions
    Random,
    /// Exhaustive minimax, recursive formulation
    RecursiveMinimax,
    /// Exhaustive minimax over an explicit stack
    IterativeMinimax,
}

impl PlaystyleKind {
    /// Look up a playstyle by its single-letter selection key
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'm' => Some(PlaystyleKind::Manual),
            'r' => Some(PlaystyleKind::Random),
            'c' => Some(PlaystyleKind::RecursiveMinimax),
            'i' => Some(PlaystyleKind::IterativeMinimax),
            _ => None,
        }
    }

    /// Build a playstyle of this kind
    pub fn build(self, search: &SearchSettings, seed: Option<u64>) -> Box<dyn Playstyle> {
        match self {
            PlaystyleKind::Manual => Box::new(ManualPlaystyle::new()),
            PlaystyleKind::Random => match seed {
                Some(seed) => Box::new(RandomPlaystyle::with_seed(seed)),
                None => Box::new(RandomPlaystyle::new()),
            },
            PlaystyleKind::RecursiveMinimax => Box::new(RecursiveMinimax::new(search.clone())),
            PlaystyleKind::IterativeMinimax => Box::new(IterativeMinimax::new(search.clone())),
        }
    }

    /// Check if this playstyle needs a human at the keyboard
    pub fn is_manual(&self) -> bool {
        matches!(self, PlaystyleKind::Manual)
    }
}
