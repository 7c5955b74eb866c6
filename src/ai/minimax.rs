//! Minimax playstyles
//!
//! Both searches walk the full game tree below the current battle queue and
//! pick the action that maximizes the score the acting side can guarantee.
//! Scores are always from the point of view of the side to move in a state,
//! so a child's score is negated whenever the side to move changes between
//! parent and child.
//!
//! Ties go to the first action offered (attack before special). The
//! recursive and iterative searches therefore always agree.

use super::{Playstyle, PlaystyleKind};
use crate::config::settings::SearchSettings;
use crate::game::{Action, BattleQueue, Side};

/// Statistics from the most recent search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Game states evaluated
    pub nodes: u64,
}

/// Highest score the side to move in `queue` can guarantee.
///
/// A finished battle scores the winner's HP if the winner is the side to
/// move, minus that HP if they are the loser, and zero on a tie.
pub fn state_score(queue: &BattleQueue) -> i64 {
    let mut stats = SearchStats::default();
    score_subtree(queue, None, &mut stats)
}

/// Score of a finished battle, or `None` while it is still running
fn terminal_score(queue: &BattleQueue) -> Option<i64> {
    if !queue.is_over() {
        return None;
    }

    Some(match queue.winner() {
        None => 0,
        Some(winner) => {
            let hp = i64::from(queue.character(winner).hp());
            if winner == queue.to_move() {
                hp
            } else {
                -hp
            }
        }
    })
}

/// Estimate used when a depth limit cuts the search short
fn horizon_score(queue: &BattleQueue) -> i64 {
    let side = queue.to_move();
    i64::from(queue.character(side).hp()) - i64::from(queue.character(side.opponent()).hp())
}

/// Convert a child's score to the perspective of `parent_side`
fn from_perspective(parent_side: Side, child: &BattleQueue, child_score: i64) -> i64 {
    if child.to_move() == parent_side {
        child_score
    } else {
        -child_score
    }
}

/// First action with the strictly highest score
fn best_action(scored: impl IntoIterator<Item = (Action, i64)>) -> Option<(Action, i64)> {
    scored.into_iter().fold(None, |best, (action, score)| match best {
        Some((_, best_score)) if best_score >= score => best,
        _ => Some((action, score)),
    })
}

/// Depth budget for the children of the root
fn child_budget(search: &SearchSettings) -> Option<u32> {
    search.depth_limit.map(|limit| limit.max(1) - 1)
}

fn score_subtree(queue: &BattleQueue, remaining: Option<u32>, stats: &mut SearchStats) -> i64 {
    stats.nodes += 1;

    if let Some(score) = terminal_score(queue) {
        return score;
    }
    if remaining == Some(0) {
        return horizon_score(queue);
    }

    let side = queue.to_move();
    let next_budget = remaining.map(|r| r - 1);
    queue
        .successors()
        .iter()
        .map(|(_, child)| from_perspective(side, child, score_subtree(child, next_budget, stats)))
        .max()
        .unwrap_or_else(|| horizon_score(queue))
}

/// Minimax written as plain recursion
#[derive(Debug, Clone, Default)]
pub struct RecursiveMinimax {
    search: SearchSettings,
    stats: SearchStats,
}

impl RecursiveMinimax {
    pub fn new(search: SearchSettings) -> Self {
        Self {
            search,
            stats: SearchStats::default(),
        }
    }

    /// Statistics from the last call to [`Self::best_action`]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// The best action for the side to move together with its score
    pub fn best_action(&mut self, queue: &BattleQueue) -> Option<(Action, i64)> {
        let side = queue.peek()?;
        let mut stats = SearchStats { nodes: 1 };
        let budget = child_budget(&self.search);

        let scored: Vec<(Action, i64)> = queue
            .successors()
            .into_iter()
            .map(|(action, child)| {
                let score = score_subtree(&child, budget, &mut stats);
                (action, from_perspective(side, &child, score))
            })
            .collect();

        self.stats = stats;
        let best = best_action(scored);
        log::debug!(
            "recursive minimax chose {:?} after {} nodes",
            best,
            self.stats.nodes
        );
        best
    }
}

impl Playstyle for RecursiveMinimax {
    fn kind(&self) -> PlaystyleKind {
        PlaystyleKind::RecursiveMinimax
    }

    fn select_action(&mut self, queue: &BattleQueue, _key: Option<char>) -> Option<Action> {
        self.best_action(queue).map(|(action, _)| action)
    }
}

/// A game state on the explicit search stack
struct SearchNode {
    /// Dropped once the node has been scored
    queue: Option<BattleQueue>,
    to_move: Side,
    action: Option<Action>,
    depth: u32,
    children: Vec<usize>,
    expanded: bool,
    score: i64,
    best: Option<Action>,
}

impl SearchNode {
    fn new(queue: BattleQueue, action: Option<Action>, depth: u32) -> Self {
        Self {
            to_move: queue.to_move(),
            queue: Some(queue),
            action,
            depth,
            children: Vec::new(),
            expanded: false,
            score: 0,
            best: None,
        }
    }
}

/// Minimax over an explicit stack instead of the call stack.
///
/// Nodes live in an arena and are visited twice: once to expand their
/// children, and again after every child has a score, at which point the
/// best child's score is propagated upward.
#[derive(Debug, Clone, Default)]
pub struct IterativeMinimax {
    search: SearchSettings,
    stats: SearchStats,
}

impl IterativeMinimax {
    pub fn new(search: SearchSettings) -> Self {
        Self {
            search,
            stats: SearchStats::default(),
        }
    }

    /// Statistics from the last call to [`Self::best_action`]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// The best action for the side to move together with its score
    pub fn best_action(&mut self, queue: &BattleQueue) -> Option<(Action, i64)> {
        queue.peek()?;

        let limit = self.search.depth_limit.map(|limit| limit.max(1));
        let mut stats = SearchStats::default();
        let mut arena = vec![SearchNode::new(queue.clone(), None, 0)];
        let mut stack = vec![0usize];

        while let Some(idx) = stack.pop() {
            if arena[idx].expanded {
                let parent_side = arena[idx].to_move;
                let scored = arena[idx].children.iter().map(|&child| {
                    let node = &arena[child];
                    let score = if node.to_move == parent_side {
                        node.score
                    } else {
                        -node.score
                    };
                    (node.action.unwrap_or(Action::Attack), score)
                });
                if let Some((action, score)) = best_action(scored) {
                    arena[idx].score = score;
                    arena[idx].best = Some(action);
                }
                continue;
            }

            stats.nodes += 1;
            let Some(state) = arena[idx].queue.take() else {
                continue;
            };

            if let Some(score) = terminal_score(&state) {
                arena[idx].score = score;
                continue;
            }
            let depth = arena[idx].depth;
            if idx != 0 && limit.is_some_and(|limit| depth >= limit) {
                arena[idx].score = horizon_score(&state);
                continue;
            }

            let successors = state.successors();
            if successors.is_empty() {
                arena[idx].score = horizon_score(&state);
                continue;
            }

            arena[idx].expanded = true;
            stack.push(idx);
            for (action, child) in successors {
                let child_idx = arena.len();
                arena.push(SearchNode::new(child, Some(action), depth + 1));
                arena[idx].children.push(child_idx);
                stack.push(child_idx);
            }
        }

        self.stats = stats;
        let root = &arena[0];
        let best = root.best.map(|action| (action, root.score));
        log::debug!(
            "iterative minimax chose {:?} after {} nodes",
            best,
            self.stats.nodes
        );
        best
    }
}

impl Playstyle for IterativeMinimax {
    fn kind(&self) -> PlaystyleKind {
        PlaystyleKind::IterativeMinimax
    }

    fn select_action(&mut self, queue: &BattleQueue, _key: Option<char>) -> Option<Action> {
        self.best_action(queue).map(|(action, _)| action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Character, CharacterClass};

    fn endgame(
        first: CharacterClass,
        second: CharacterClass,
        first_stats: (u32, u32),
        second_stats: (u32, u32),
    ) -> BattleQueue {
        let mut queue = BattleQueue::new(Character::new("p1", first), Character::new("p2", second));
        queue.character_mut(Side::First).set_hp(first_stats.0);
        queue.character_mut(Side::First).set_sp(first_stats.1);
        queue.character_mut(Side::Second).set_hp(second_stats.0);
        queue.character_mut(Side::Second).set_sp(second_stats.1);
        queue.add(Side::First);
        queue.add(Side::Second);
        queue
    }

    fn exhaustive() -> SearchSettings {
        SearchSettings { depth_limit: None }
    }

    #[test]
    fn test_terminal_state_scores() {
        // Rogue to move, mage at low HP but the game is not over yet
        let mut queue = endgame(CharacterClass::Rogue, CharacterClass::Mage, (100, 100), (3, 100));
        assert!(!queue.is_over());

        // Rogue wins outright by attacking
        assert_eq!(state_score(&queue), 100);

        queue.character_mut(Side::First).set_hp(40);
        assert_eq!(state_score(&queue), 40);

        queue.character_mut(Side::Second).set_hp(0);
        assert_eq!(terminal_score(&queue), Some(40));
    }

    #[test]
    fn test_loser_to_move_scores_negative() {
        let mut queue = endgame(CharacterClass::Rogue, CharacterClass::Mage, (40, 100), (3, 100));
        // Put the mage at the front and drop the rogue's entry
        queue.remove().unwrap();
        queue.add(Side::First);
        queue.character_mut(Side::Second).set_hp(0);

        assert_eq!(queue.to_move(), Side::Second);
        assert_eq!(state_score(&queue), -40);
    }

    #[test]
    fn test_tie_scores_zero() {
        let queue = endgame(CharacterClass::Mage, CharacterClass::Rogue, (50, 0), (50, 0));
        assert!(queue.is_over());
        assert_eq!(state_score(&queue), 0);
    }

    #[test]
    fn test_no_moves_returns_none() {
        let queue = endgame(CharacterClass::Mage, CharacterClass::Rogue, (50, 0), (50, 0));
        let mut recursive = RecursiveMinimax::new(exhaustive());
        let mut iterative = IterativeMinimax::new(exhaustive());
        assert_eq!(recursive.select_action(&queue, None), None);
        assert_eq!(iterative.select_action(&queue, None), None);
    }

    #[test]
    fn test_finishing_blow_is_found() {
        // Only the special attack kills: 40 - 10 = 30 damage
        let queue = endgame(CharacterClass::Mage, CharacterClass::Rogue, (10, 40), (25, 3));
        let mut recursive = RecursiveMinimax::new(exhaustive());
        let mut iterative = IterativeMinimax::new(exhaustive());

        assert_eq!(recursive.best_action(&queue), Some((Action::Special, 10)));
        assert_eq!(iterative.best_action(&queue), Some((Action::Special, 10)));
    }

    #[test]
    fn test_recursive_and_iterative_agree() {
        let classes = [
            CharacterClass::Mage,
            CharacterClass::Rogue,
            CharacterClass::Vampire,
            CharacterClass::Sorcerer,
        ];
        for &first in &classes {
            for &second in &classes {
                for (first_stats, second_stats) in [((30, 40), (30, 40)), ((20, 60), (45, 25))] {
                    let queue = endgame(first, second, first_stats, second_stats);
                    let mut recursive = RecursiveMinimax::new(exhaustive());
                    let mut iterative = IterativeMinimax::new(exhaustive());
                    assert_eq!(
                        recursive.best_action(&queue),
                        iterative.best_action(&queue),
                        "{first:?} vs {second:?} at {first_stats:?}/{second_stats:?}"
                    );
                    assert_eq!(recursive.last_stats(), iterative.last_stats());
                }
            }
        }
    }

    #[test]
    fn test_chosen_action_is_never_worse_than_alternatives() {
        let queue = endgame(CharacterClass::Rogue, CharacterClass::Mage, (30, 40), (25, 50));
        let side = queue.peek().unwrap();
        let mut minimax = RecursiveMinimax::new(exhaustive());
        let (chosen, chosen_score) = minimax.best_action(&queue).unwrap();

        for (action, child) in queue.successors() {
            let score = from_perspective(side, &child, state_score(&child));
            assert!(chosen_score >= score, "{chosen:?} scored below {action:?}");
        }
        assert_eq!(chosen_score, state_score(&queue));
    }

    #[test]
    fn test_depth_limit_bounds_search() {
        let queue = endgame(CharacterClass::Rogue, CharacterClass::Rogue, (100, 100), (100, 100));
        let limited = SearchSettings {
            depth_limit: Some(4),
        };
        let mut recursive = RecursiveMinimax::new(limited.clone());
        let mut iterative = IterativeMinimax::new(limited);

        let a = recursive.best_action(&queue);
        let b = iterative.best_action(&queue);
        assert!(a.is_some());
        assert_eq!(a, b);
        // Two actions per ply, four plies deep
        assert!(recursive.last_stats().nodes <= 1 + 2 + 4 + 8 + 16);
    }
}
