//! Key-press driven playstyle

use super::{Playstyle, PlaystyleKind};
use crate::game::{Action, BattleQueue};

/// Plays whatever the player pressed, if it names an action
#[derive(Debug, Clone, Default)]
pub struct ManualPlaystyle;

impl ManualPlaystyle {
    pub fn new() -> Self {
        Self
    }
}

impl Playstyle for ManualPlaystyle {
    fn kind(&self) -> PlaystyleKind {
        PlaystyleKind::Manual
    }

    fn is_manual(&self) -> bool {
        true
    }

    fn select_action(&mut self, _queue: &BattleQueue, key: Option<char>) -> Option<Action> {
        key.and_then(Action::from_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Character, CharacterClass};

    #[test]
    fn test_manual_follows_keys() {
        let queue = BattleQueue::new(
            Character::new("Alex", CharacterClass::Mage),
            Character::new("Bob", CharacterClass::Rogue),
        );
        let mut manual = ManualPlaystyle::new();
        assert!(manual.is_manual());
        assert_eq!(manual.select_action(&queue, Some('A')), Some(Action::Attack));
        assert_eq!(manual.select_action(&queue, Some('s')), Some(Action::Special));
        assert_eq!(manual.select_action(&queue, Some('q')), None);
        assert_eq!(manual.select_action(&queue, None), None);
    }
}
