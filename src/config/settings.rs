//! Duel settings
//!
//! Defines who fights, how each side decides its moves, and how deep the
//! minimax playstyles are allowed to search.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::ai::PlaystyleKind;
use crate::game::CharacterClass;

/// Main settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The character added to the battle queue first
    pub first: CombatantConfig,
    /// The character added to the battle queue second
    pub second: CombatantConfig,
    /// Minimax search settings
    pub search: SearchSettings,
    /// Turn cap for automated duels
    pub max_turns: u32,
    /// Seed for random playstyles (unseeded when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            first: CombatantConfig::new("Alex", CharacterClass::Mage, PlaystyleKind::Random),
            second: CombatantConfig::new("Sophia", CharacterClass::Rogue, PlaystyleKind::Random),
            search: SearchSettings::default(),
            max_turns: 1000,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Serialize settings to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Make sure neither side waits on a key press
    pub fn ensure_automated(&self) -> Result<(), ConfigError> {
        for combatant in [&self.first, &self.second] {
            if combatant.playstyle.is_manual() {
                return Err(ConfigError::ManualPlaystyle(combatant.name.clone()));
            }
        }
        Ok(())
    }

    /// Create settings for a minimax mirror match
    pub fn minimax_exhibition() -> Self {
        Self {
            first: CombatantConfig::new(
                "Recursa",
                CharacterClass::Mage,
                PlaystyleKind::RecursiveMinimax,
            ),
            second: CombatantConfig::new(
                "Iterata",
                CharacterClass::Rogue,
                PlaystyleKind::IterativeMinimax,
            ),
            search: SearchSettings {
                depth_limit: Some(10),
            },
            ..Default::default()
        }
    }

    /// Create settings for a human against a minimax opponent
    pub fn versus_computer(name: &str, class: CharacterClass) -> Self {
        Self {
            first: CombatantConfig::new(name, class, PlaystyleKind::Manual),
            second: CombatantConfig::new(
                "Computer",
                CharacterClass::Sorcerer,
                PlaystyleKind::RecursiveMinimax,
            ),
            search: SearchSettings {
                depth_limit: Some(8),
            },
            ..Default::default()
        }
    }
}

/// One side of the duel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantConfig {
    /// Character name
    pub name: String,
    /// Character class
    pub class: CharacterClass,
    /// How this character picks moves
    pub playstyle: PlaystyleKind,
}

impl CombatantConfig {
    pub fn new(name: &str, class: CharacterClass, playstyle: PlaystyleKind) -> Self {
        Self {
            name: name.to_string(),
            class,
            playstyle,
        }
    }
}

/// Minimax search settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum plies below the current state. `None` searches the whole
    /// game tree.
    pub depth_limit: Option<u32>,
}
