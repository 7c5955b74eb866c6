//! Character data structures
//!
//! Represents a duelist, including their class, hit points, skill points,
//! and the skills their class grants.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::skill::{Action, Skill};
use crate::ai::skill_tree;

/// Hit points and skill points every character starts with
pub const STARTING_HP: u32 = 100;
pub const STARTING_SP: u32 = 100;

/// Character class types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Mage,
    Rogue,
    Vampire,
    Sorcerer,
}

impl CharacterClass {
    /// Flat damage reduction applied to every hit taken
    pub fn defense(&self) -> u32 {
        match self {
            CharacterClass::Mage => 8,
            CharacterClass::Rogue => 10,
            CharacterClass::Vampire => 3,
            CharacterClass::Sorcerer => 10,
        }
    }

    /// Look up a class by its single-letter selection key
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'm' => Some(CharacterClass::Mage),
            'r' => Some(CharacterClass::Rogue),
            'v' => Some(CharacterClass::Vampire),
            's' => Some(CharacterClass::Sorcerer),
            _ => None,
        }
    }

    /// Display name of the class
    pub fn label(&self) -> &'static str {
        match self {
            CharacterClass::Mage => "Mage",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Vampire => "Vampire",
            CharacterClass::Sorcerer => "Sorcerer",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A character taking part in a duel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    name: String,
    class: CharacterClass,
    hp: u32,
    sp: u32,
}

impl Character {
    /// Create a character at full HP and SP
    pub fn new(name: impl Into<String>, class: CharacterClass) -> Self {
        Self {
            name: name.into(),
            class,
            hp: STARTING_HP,
            sp: STARTING_SP,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> CharacterClass {
        self.class
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn sp(&self) -> u32 {
        self.sp
    }

    pub fn defense(&self) -> u32 {
        self.class.defense()
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Overwrite the current HP. Healing may exceed the starting value.
    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp;
    }

    /// Overwrite the current SP
    pub fn set_sp(&mut self, sp: u32) {
        self.sp = sp;
    }

    /// Spend skill points, bottoming out at zero
    pub fn reduce_sp(&mut self, cost: u32) {
        self.sp = self.sp.saturating_sub(cost);
    }

    /// Take a hit of `raw` damage reduced by defense.
    ///
    /// Returns the HP actually lost, which is what vampires heal by.
    pub fn apply_damage(&mut self, raw: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_sub(raw.saturating_sub(self.defense()));
        before - self.hp
    }

    /// Restore `amount` HP
    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount);
    }

    /// The skill this character uses for `action` against `target`.
    ///
    /// A sorcerer's normal attack is whatever the default skill decision
    /// tree picks for the current pair of combatants.
    pub fn skill_for(&self, action: Action, target: &Character) -> Skill {
        use CharacterClass::*;

        match (self.class, action) {
            (Mage, Action::Attack) => Skill::MageAttack,
            (Mage, Action::Special) => Skill::MageSpecial,
            (Rogue, Action::Attack) => Skill::RogueAttack,
            (Rogue, Action::Special) => Skill::RogueSpecial,
            (Vampire, Action::Attack) => Skill::VampireAttack,
            (Vampire, Action::Special) => Skill::VampireSpecial,
            (Sorcerer, Action::Attack) => skill_tree::default_tree().pick_skill(self, target),
            (Sorcerer, Action::Special) => Skill::SorcererSpecial,
        }
    }

    /// Check whether this character can afford `action` against `target`
    pub fn is_valid_action(&self, action: Action, target: &Character) -> bool {
        self.sp >= self.skill_for(action, target).sp_cost()
    }

    /// Affordable actions, attack first
    pub fn available_actions(&self, target: &Character) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|action| self.is_valid_action(*action, target))
            .collect()
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}/{}", self.name, self.class, self.hp, self.sp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_character() {
        let mage = Character::new("Alex", CharacterClass::Mage);
        assert_eq!(mage.hp(), 100);
        assert_eq!(mage.sp(), 100);
        assert_eq!(mage.defense(), 8);
        assert_eq!(mage.to_string(), "Alex (Mage): 100/100");
    }

    #[test]
    fn test_damage_respects_defense() {
        let mut rogue = Character::new("Sophia", CharacterClass::Rogue);
        assert_eq!(rogue.apply_damage(15), 5);
        assert_eq!(rogue.hp(), 95);

        // Hits weaker than defense do nothing
        assert_eq!(rogue.apply_damage(4), 0);
        assert_eq!(rogue.hp(), 95);
    }

    #[test]
    fn test_hp_and_sp_clamp_at_zero() {
        let mut mage = Character::new("Alex", CharacterClass::Mage);
        mage.set_hp(3);
        assert_eq!(mage.apply_damage(40), 3);
        assert_eq!(mage.hp(), 0);
        assert!(!mage.is_alive());

        mage.set_sp(2);
        mage.reduce_sp(5);
        assert_eq!(mage.sp(), 0);
    }

    #[test]
    fn test_available_actions_follow_sp() {
        let mut mage = Character::new("Alex", CharacterClass::Mage);
        let rogue = Character::new("Bob", CharacterClass::Rogue);
        assert_eq!(mage.available_actions(&rogue), vec![Action::Attack, Action::Special]);

        mage.set_sp(29);
        assert_eq!(mage.available_actions(&rogue), vec![Action::Attack]);
        assert!(!mage.is_valid_action(Action::Special, &rogue));

        mage.set_sp(4);
        assert!(mage.available_actions(&rogue).is_empty());
    }

    #[test]
    fn test_sorcerer_attack_uses_decision_tree() {
        let sorcerer = Character::new("Merlin", CharacterClass::Sorcerer);
        let mut rogue = Character::new("Bob", CharacterClass::Rogue);
        // Full health and SP: reachable leaves are p4, p8 and p7
        assert_eq!(sorcerer.skill_for(Action::Attack, &rogue), Skill::RogueSpecial);

        let mut hurt = sorcerer.clone();
        hurt.set_hp(40);
        rogue.set_sp(10);
        // Root condition fails, so the root's own skill is used
        assert_eq!(hurt.skill_for(Action::Attack, &rogue), Skill::MageAttack);
        assert_eq!(hurt.skill_for(Action::Special, &rogue), Skill::SorcererSpecial);
    }

    #[test]
    fn test_class_keys() {
        assert_eq!(CharacterClass::from_key('m'), Some(CharacterClass::Mage));
        assert_eq!(CharacterClass::from_key('R'), Some(CharacterClass::Rogue));
        assert_eq!(CharacterClass::from_key('x'), None);
    }
}
