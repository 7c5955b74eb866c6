//! Configuration module
//!
//! Handles duel settings: combatants, playstyles and search limits.

pub mod settings;

pub use settings::{CombatantConfig, SearchSettings, Settings};

/// Settings loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0} uses a manual playstyle, which needs interactive input")]
    ManualPlaystyle(String),
}
