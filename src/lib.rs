//! Queue Duel - turn-queue battles between two characters
//!
//! This library provides a small turn-based combat game: a battle queue
//! deciding who acts next, characters with class-specific skills, and
//! playstyles ranging from key presses to exhaustive minimax search.
//!
//! ## Search
//!
//! The `ai` module offers two minimax playstyles, one recursive and one
//! driven by an explicit stack. Both pick the same moves.

pub mod ai;
pub mod config;
pub mod course;
pub mod game;

use crate::ai::Playstyle;
use crate::config::Settings;
use crate::game::{Action, BattleQueue, Character, Side, Skill};

/// A duel between two characters, each driven by its own playstyle
pub struct Duel {
    queue: BattleQueue,
    playstyles: [Box<dyn Playstyle>; 2],
    settings: Settings,
    turns: u32,
}

impl Duel {
    /// Set up both characters and queue them in order
    pub fn new(settings: Settings) -> Self {
        let first = Character::new(settings.first.name.as_str(), settings.first.class);
        let second = Character::new(settings.second.name.as_str(), settings.second.class);

        let mut queue = BattleQueue::new(first, second);
        queue.add(Side::First);
        queue.add(Side::Second);

        // Give each side its own stream so mirrored random playstyles differ
        let playstyles = [
            settings.first.playstyle.build(&settings.search, settings.seed),
            settings
                .second
                .playstyle
                .build(&settings.search, settings.seed.map(|s| s.wrapping_add(1))),
        ];

        log::info!(
            "Duel set up: {} vs {}",
            queue.character(Side::First),
            queue.character(Side::Second)
        );

        Self {
            queue,
            playstyles,
            settings,
            turns: 0,
        }
    }

    pub fn queue(&self) -> &BattleQueue {
        &self.queue
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The playstyle driving `side`
    pub fn playstyle(&self, side: Side) -> &dyn Playstyle {
        self.playstyles[side.index()].as_ref()
    }

    /// Turns played so far
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn is_over(&self) -> bool {
        self.queue.is_over()
    }

    pub fn winner(&self) -> Option<Side> {
        self.queue.winner()
    }

    /// Let the next character's playstyle pick a move and play it.
    ///
    /// `key` is the last key pressed; only manual playstyles see it. An
    /// unusable choice leaves the battle untouched.
    pub fn perform_turn(&mut self, key: Option<char>) -> TurnOutcome {
        let actor = match self.queue.peek() {
            Some(actor) if !self.queue.is_over() => actor,
            _ => return self.outcome(None, None, None),
        };

        let playstyle = &mut self.playstyles[actor.index()];
        let key = if playstyle.is_manual() { key } else { None };
        let action = playstyle.select_action(&self.queue, key);

        let skill = match action {
            Some(action) => match self.queue.perform(action) {
                Ok(skill) => {
                    self.turns += 1;
                    log::debug!(
                        "Turn {}: {} used {:?} -> {} | {}",
                        self.turns,
                        self.queue.character(actor).name(),
                        skill,
                        self.queue.character(Side::First),
                        self.queue.character(Side::Second)
                    );
                    Some(skill)
                }
                Err(e) => {
                    log::warn!("Move rejected: {}", e);
                    None
                }
            },
            None => None,
        };

        self.outcome(Some(actor), action, skill)
    }

    fn outcome(&self, actor: Option<Side>, action: Option<Action>, skill: Option<Skill>) -> TurnOutcome {
        TurnOutcome {
            actor,
            action,
            skill,
            game_over: self.queue.is_over(),
            winner: self.queue.winner(),
        }
    }

    /// Play automated turns until the battle ends, the turn cap is hit, or
    /// a playstyle fails to produce a usable move
    pub fn run(&mut self) -> DuelSummary {
        while !self.queue.is_over() && self.turns < self.settings.max_turns {
            let outcome = self.perform_turn(None);
            if outcome.skill.is_none() {
                log::warn!("Duel stalled after {} turns", self.turns);
                break;
            }
        }

        let summary = DuelSummary {
            turns: self.turns,
            finished: self.queue.is_over(),
            winner: self.queue.winner(),
        };
        match summary.winner {
            Some(side) => log::info!(
                "{} wins after {} turns",
                self.queue.character(side),
                summary.turns
            ),
            None if summary.finished => log::info!("Tie after {} turns", summary.turns),
            None => log::info!("Duel stopped after {} turns", summary.turns),
        }
        summary
    }
}

/// What happened on a single turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Who was up, if anyone could act
    pub actor: Option<Side>,
    /// The action the playstyle picked (`None`: no valid move found)
    pub action: Option<Action>,
    /// The skill used, when the action went through
    pub skill: Option<Skill>,
    /// Whether the battle is over after this turn
    pub game_over: bool,
    /// The winner, once the battle is over and not a tie
    pub winner: Option<Side>,
}

/// Result of an automated duel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuelSummary {
    pub turns: u32,
    /// False when the duel stopped before the battle was over
    pub finished: bool,
    pub winner: Option<Side>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::PlaystyleKind;
    use crate::config::{CombatantConfig, SearchSettings};
    use crate::game::CharacterClass;

    fn settings(first: PlaystyleKind, second: PlaystyleKind) -> Settings {
        Settings {
            first: CombatantConfig::new("Alex", CharacterClass::Mage, first),
            second: CombatantConfig::new("Sophia", CharacterClass::Rogue, second),
            seed: Some(11),
            ..Default::default()
        }
    }

    #[test]
    fn test_duel_setup() {
        let duel = Duel::new(Settings::default());
        assert_eq!(duel.queue().entries(), vec![Side::First, Side::Second]);
        assert_eq!(duel.queue().character(Side::First).name(), "Alex");
        assert_eq!(duel.playstyle(Side::Second).kind(), PlaystyleKind::Random);
        assert!(!duel.is_over());
        assert_eq!(duel.turns(), 0);
    }

    #[test]
    fn test_manual_turns() {
        let mut duel = Duel::new(settings(PlaystyleKind::Manual, PlaystyleKind::Manual));

        let outcome = duel.perform_turn(Some('S'));
        assert_eq!(outcome.actor, Some(Side::First));
        assert_eq!(outcome.skill, Some(Skill::MageSpecial));
        assert_eq!(duel.queue().character(Side::Second).hp(), 70);

        // An unknown key does nothing
        let outcome = duel.perform_turn(Some('Q'));
        assert_eq!(outcome.actor, Some(Side::Second));
        assert_eq!(outcome.action, None);
        assert_eq!(duel.turns(), 1);

        let outcome = duel.perform_turn(Some('A'));
        assert_eq!(outcome.skill, Some(Skill::RogueAttack));
        assert!(!outcome.game_over);
    }

    #[test]
    fn test_random_duel_finishes() {
        let mut duel = Duel::new(settings(PlaystyleKind::Random, PlaystyleKind::Random));
        let summary = duel.run();
        assert!(summary.finished);
        assert!(duel.is_over());
        assert_eq!(summary.winner, duel.winner());
        assert!(summary.turns > 0);
    }

    #[test]
    fn test_manual_duel_stalls_in_run() {
        let mut duel = Duel::new(settings(PlaystyleKind::Manual, PlaystyleKind::Random));
        let summary = duel.run();
        assert!(!summary.finished);
        assert_eq!(summary.turns, 0);
    }

    #[test]
    fn test_turn_cap() {
        let mut settings = settings(PlaystyleKind::Random, PlaystyleKind::Random);
        settings.max_turns = 3;
        let mut duel = Duel::new(settings);
        let summary = duel.run();
        assert_eq!(summary.turns, 3);
        assert!(!summary.finished);
    }

    #[test]
    fn test_minimax_beats_random_from_endgame() {
        let mut settings = settings(PlaystyleKind::IterativeMinimax, PlaystyleKind::Random);
        settings.search = SearchSettings {
            depth_limit: Some(6),
        };
        let mut duel = Duel::new(settings);
        duel.queue.character_mut(Side::First).set_hp(30);
        duel.queue.character_mut(Side::Second).set_hp(25);

        // The mage can kill from here in one special before the rogue acts
        let outcome = duel.perform_turn(None);
        assert_eq!(outcome.skill, Some(Skill::MageSpecial));
        assert!(outcome.game_over);
        assert_eq!(outcome.winner, Some(Side::First));

        let after = duel.perform_turn(None);
        assert_eq!(after.actor, None);
        assert!(after.game_over);
    }
}
