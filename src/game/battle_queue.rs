//! Battle queue tracking
//!
//! The battle queue owns both combatants and the order in which they act.
//! Entries for characters that cannot afford any action are skipped rather
//! than removed, so they stay in place until the character can act again.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::character::Character;
use super::skill::{Action, Skill};
use super::GameError;

/// One of the two duelists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// The other duelist
    pub fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Array index for per-side storage
    pub fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

/// Turn order plus the full state of both combatants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleQueue {
    characters: [Character; 2],
    entries: VecDeque<Side>,
}

impl BattleQueue {
    /// Create an empty queue over two opponents
    pub fn new(first: Character, second: Character) -> Self {
        Self {
            characters: [first, second],
            entries: VecDeque::new(),
        }
    }

    pub fn character(&self, side: Side) -> &Character {
        &self.characters[side.index()]
    }

    pub fn character_mut(&mut self, side: Side) -> &mut Character {
        &mut self.characters[side.index()]
    }

    /// Queue entries from front to back, including skipped ones
    pub fn entries(&self) -> Vec<Side> {
        self.entries.iter().copied().collect()
    }

    /// Add a character to the back of the queue
    pub fn add(&mut self, side: Side) {
        self.entries.push_back(side);
    }

    /// Affordable actions for `side` against its opponent
    pub fn available_actions(&self, side: Side) -> Vec<Action> {
        self.character(side)
            .available_actions(self.character(side.opponent()))
    }

    /// Check whether `side` can afford any action
    pub fn can_act(&self, side: Side) -> bool {
        Action::ALL.into_iter().any(|action| self.is_valid_action(side, action))
    }

    pub fn is_valid_action(&self, side: Side, action: Action) -> bool {
        self.character(side)
            .is_valid_action(action, self.character(side.opponent()))
    }

    /// The skill `side` would use for `action` right now
    pub fn skill_for(&self, side: Side, action: Action) -> Skill {
        self.character(side)
            .skill_for(action, self.character(side.opponent()))
    }

    fn front_index(&self) -> Option<usize> {
        self.entries.iter().position(|side| self.can_act(*side))
    }

    /// Remove and return the first character able to act
    pub fn remove(&mut self) -> Result<Side, GameError> {
        let idx = self.front_index().ok_or(GameError::EmptyQueue)?;
        self.entries.remove(idx).ok_or(GameError::EmptyQueue)
    }

    /// The first character able to act, without removing them
    pub fn peek(&self) -> Option<Side> {
        self.front_index().map(|idx| self.entries[idx])
    }

    /// True when the queue has no entries or none of them can act
    pub fn is_empty(&self) -> bool {
        self.front_index().is_none()
    }

    /// The battle is over once the queue is empty or a character has
    /// fallen. A queue where neither character can act is always empty.
    pub fn is_over(&self) -> bool {
        self.is_empty() || self.characters.iter().any(|c| !c.is_alive())
    }

    /// The side left standing, if the battle is over and not a tie
    pub fn winner(&self) -> Option<Side> {
        if !self.is_over() {
            return None;
        }

        match (
            self.character(Side::First).is_alive(),
            self.character(Side::Second).is_alive(),
        ) {
            (true, false) => Some(Side::First),
            (false, true) => Some(Side::Second),
            _ => None,
        }
    }

    /// The side whose perspective a state is scored from.
    ///
    /// This is the next actor when there is one, otherwise whoever sits at
    /// the front of the queue.
    pub fn to_move(&self) -> Side {
        self.peek()
            .or_else(|| self.entries.front().copied())
            .unwrap_or(Side::First)
    }

    /// Play one action for the character at the front of the queue.
    ///
    /// The actor keeps their place when they can no longer act afterwards;
    /// their entry is skipped from then on.
    pub fn perform(&mut self, action: Action) -> Result<Skill, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let actor = self.peek().ok_or(GameError::EmptyQueue)?;

        if !self.is_valid_action(actor, action) {
            return Err(GameError::InvalidAction {
                name: self.character(actor).name().to_string(),
                action,
            });
        }

        let skill = self.skill_for(actor, action);
        skill.apply(self, actor)?;

        if self.can_act(actor) {
            self.remove()?;
        }

        Ok(skill)
    }

    /// Every state reachable in one action, paired with that action
    pub fn successors(&self) -> Vec<(Action, BattleQueue)> {
        let Some(actor) = self.peek() else {
            return Vec::new();
        };

        self.available_actions(actor)
            .into_iter()
            .filter_map(|action| {
                let mut next = self.clone();
                next.perform(action).ok().map(|_| (action, next))
            })
            .collect()
    }
}
