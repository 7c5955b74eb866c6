//! Skills and the actions that trigger them
//!
//! Every skill costs a fixed amount of SP, deals a fixed amount of damage,
//! and reshapes the battle queue in its own way.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::battle_queue::{BattleQueue, Side};
use super::GameError;

/// What a character can choose to do on their turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Normal attack (key `A`)
    Attack,
    /// Special attack (key `S`)
    Special,
}

impl Action {
    /// All actions in the order they are offered
    pub const ALL: [Action; 2] = [Action::Attack, Action::Special];

    /// Parse a key press
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_uppercase() {
            'A' => Some(Action::Attack),
            'S' => Some(Action::Special),
            _ => None,
        }
    }

    pub fn key(&self) -> char {
        match self {
            Action::Attack => 'A',
            Action::Special => 'S',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Attack => f.write_str("attack"),
            Action::Special => f.write_str("special attack"),
        }
    }
}

/// A skill with a fixed SP cost and damage value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    MageAttack,
    MageSpecial,
    RogueAttack,
    RogueSpecial,
    VampireAttack,
    VampireSpecial,
    SorcererSpecial,
}

impl Skill {
    /// SP spent by the caster
    pub fn sp_cost(&self) -> u32 {
        match self {
            Skill::MageAttack => 5,
            Skill::MageSpecial => 30,
            Skill::RogueAttack => 3,
            Skill::RogueSpecial => 10,
            Skill::VampireAttack => 15,
            Skill::VampireSpecial => 20,
            Skill::SorcererSpecial => 20,
        }
    }

    /// Damage before the target's defense is applied
    pub fn damage(&self) -> u32 {
        match self {
            Skill::MageAttack => 20,
            Skill::MageSpecial => 40,
            Skill::RogueAttack => 15,
            Skill::RogueSpecial => 20,
            Skill::VampireAttack => 20,
            Skill::VampireSpecial => 30,
            Skill::SorcererSpecial => 25,
        }
    }

    /// Have `caster` use this skill on their opponent.
    ///
    /// SP is spent and damage dealt before the queue is touched.
    pub fn apply(self, queue: &mut BattleQueue, caster: Side) -> Result<(), GameError> {
        let target = caster.opponent();
        let dealt = self.deal_damage(queue, caster);

        match self {
            Skill::MageAttack | Skill::RogueAttack => queue.add(caster),
            Skill::VampireAttack => {
                queue.add(caster);
                queue.character_mut(caster).heal(dealt);
            }
            Skill::MageSpecial => {
                queue.add(target);
                queue.add(caster);
            }
            Skill::RogueSpecial => {
                queue.add(caster);
                queue.add(caster);
            }
            Skill::VampireSpecial => {
                queue.add(caster);
                queue.add(caster);
                queue.add(target);
                queue.character_mut(caster).heal(dealt);
            }
            Skill::SorcererSpecial => {
                // Collapse every pending turn into one per character
                let mut seen = Vec::with_capacity(2);
                while !queue.is_empty() {
                    let side = queue.remove()?;
                    if !seen.contains(&side) {
                        seen.push(side);
                    }
                }
                for side in seen {
                    queue.add(side);
                }
                queue.add(caster);
            }
        }

        Ok(())
    }

    fn deal_damage(self, queue: &mut BattleQueue, caster: Side) -> u32 {
        queue.character_mut(caster).reduce_sp(self.sp_cost());
        queue
            .character_mut(caster.opponent())
            .apply_damage(self.damage())
    }
}
