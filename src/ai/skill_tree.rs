//! Skill decision tree
//!
//! Sorcerers do not have a fixed normal attack. Instead they walk a tree of
//! skills guarded by conditions on the caster and target, and use the
//! highest-priority skill among the nodes where the walk stopped.

use std::fmt;

use once_cell::sync::Lazy;

use crate::game::{Character, Skill};

/// A guard on a tree node, evaluated as `condition(caster, target)`
pub type Condition = fn(&Character, &Character) -> bool;

static DEFAULT_TREE: Lazy<SkillDecisionTree> = Lazy::new(SkillDecisionTree::build_default);

/// The tree every sorcerer uses
pub fn default_tree() -> &'static SkillDecisionTree {
    &DEFAULT_TREE
}

/// A node in a skill decision tree
#[derive(Clone)]
pub struct SkillDecisionTree {
    /// Skill used if the walk stops here
    pub value: Skill,
    /// Whether the walk may continue into the children
    pub condition: Condition,
    /// Lower numbers win. Priorities are unique within a tree.
    pub priority: u32,
    /// Subtrees
    pub children: Vec<SkillDecisionTree>,
}

impl SkillDecisionTree {
    /// Create a leaf node
    pub fn new(value: Skill, condition: Condition, priority: u32) -> Self {
        Self {
            value,
            condition,
            priority,
            children: Vec::new(),
        }
    }

    /// Attach subtrees
    pub fn with_children(mut self, children: Vec<SkillDecisionTree>) -> Self {
        self.children = children;
        self
    }

    /// Nodes where the walk stops: either their condition fails or they
    /// have no children
    fn stopping_nodes<'a>(
        &'a self,
        caster: &Character,
        target: &Character,
        out: &mut Vec<&'a SkillDecisionTree>,
    ) {
        if self.children.is_empty() || !(self.condition)(caster, target) {
            out.push(self);
            return;
        }
        for child in &self.children {
            child.stopping_nodes(caster, target, out);
        }
    }

    /// Pick the skill `caster` should use on `target`
    pub fn pick_skill(&self, caster: &Character, target: &Character) -> Skill {
        let mut stops = Vec::new();
        self.stopping_nodes(caster, target, &mut stops);
        stops
            .into_iter()
            .min_by_key(|node| node.priority)
            .map_or(self.value, |node| node.value)
    }

    /// The tree sorcerers are shipped with
    pub fn build_default() -> Self {
        let a = SkillDecisionTree::new(Skill::RogueAttack, never, 6);
        let b = SkillDecisionTree::new(Skill::RogueAttack, never, 8);
        let c = SkillDecisionTree::new(Skill::RogueSpecial, never, 7);
        let d = SkillDecisionTree::new(Skill::RogueSpecial, target_hp_below_30, 4)
            .with_children(vec![a]);
        let e = SkillDecisionTree::new(Skill::MageSpecial, target_sp_above_40, 2)
            .with_children(vec![b]);
        let f = SkillDecisionTree::new(Skill::RogueAttack, caster_hp_above_90, 1)
            .with_children(vec![c]);
        let g = SkillDecisionTree::new(Skill::MageAttack, caster_sp_above_20, 3)
            .with_children(vec![d]);

        SkillDecisionTree::new(Skill::MageAttack, caster_hp_above_50, 5).with_children(vec![g, e, f])
    }
}

impl fmt::Debug for SkillDecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkillDecisionTree")
            .field("value", &self.value)
            .field("priority", &self.priority)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

fn caster_hp_above_50(caster: &Character, _: &Character) -> bool {
    caster.hp() > 50
}

fn caster_sp_above_20(caster: &Character, _: &Character) -> bool {
    caster.sp() > 20
}

fn target_sp_above_40(_: &Character, target: &Character) -> bool {
    target.sp() > 40
}

fn caster_hp_above_90(caster: &Character, _: &Character) -> bool {
    caster.hp() > 90
}

fn target_hp_below_30(_: &Character, target: &Character) -> bool {
    target.hp() < 30
}

/// Leaves never continue
fn never(_: &Character, _: &Character) -> bool {
    false
}
