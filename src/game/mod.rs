//! Game state and rules
//!
//! This module contains the combatants, their skills, and the battle queue
//! that decides who acts next.

pub mod battle_queue;
pub mod character;
pub mod skill;

pub use battle_queue::{BattleQueue, Side};
pub use character::{Character, CharacterClass};
pub use skill::{Action, Skill};

/// Errors raised by illegal moves against a battle queue
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("No character in the battle queue can act")]
    EmptyQueue,
    #[error("{name} cannot perform {action}")]
    InvalidAction { name: String, action: Action },
    #[error("The battle is already over")]
    GameOver,
}
