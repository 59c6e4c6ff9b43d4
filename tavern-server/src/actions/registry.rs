//! Action Registry
//!
//! Closed set of action kinds, keyed by the ids clients send.
//!
//! ```text
//! "fight"          → Fight           (5 energy)
//! "heal"           → Heal            (15 energy)
//! "trainStrength"  → Train(strength) (3 energy)
//! "trainDefense"   → Train(defense)  (3 energy)
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::actions::requirements::{meets_level_requirements, LevelRequirement};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::skills::SkillKind;
use crate::game::user::UserSnapshot;

/// Effect an action runs once its preconditions hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    /// Fight a catalog enemy.
    Fight,
    /// Restore health to max.
    Heal,
    /// Add training XP to a skill.
    Train(SkillKind),
}

/// A registered action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDef {
    /// Id clients send.
    pub id: String,
    /// Short display name.
    pub label: String,
    /// Optional longer text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Energy deducted on success.
    pub energy_cost: i64,
    /// Skill-level conditions, all of which must hold.
    pub requirements: Vec<LevelRequirement>,
    /// Effect.
    #[serde(skip)]
    pub kind: ActionKind,
}

impl ActionDef {
    /// Action without requirements or description.
    pub fn new(id: impl Into<String>, label: impl Into<String>, energy_cost: i64, kind: ActionKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            energy_cost,
            requirements: Vec::new(),
            kind,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a requirement.
    pub fn with_requirement(mut self, requirement: LevelRequirement) -> Self {
        self.requirements.push(requirement);
        self
    }
}

/// Id to action map.
#[derive(Clone, Debug, Default)]
pub struct ActionRegistry {
    actions: BTreeMap<String, ActionDef>,
}

impl ActionRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The tavern's actions, priced from `config`.
    pub fn standard(config: &GameConfig) -> Self {
        let mut registry = Self::new();

        registry.register(
            ActionDef::new("fight", "Fight", config.costs.fight, ActionKind::Fight)
                .with_description("Pick a fight with one of the locals."),
        );
        registry.register(
            ActionDef::new("heal", "Heal", config.costs.heal, ActionKind::Heal)
                .with_description("Rest until your wounds are gone."),
        );
        for skill in SkillKind::ALL {
            registry.register(ActionDef::new(
                train_action_id(skill),
                format!("Train {}", skill.label()),
                config.costs.train,
                ActionKind::Train(skill),
            ));
        }

        registry
    }

    /// Add or replace an action. Returns the replaced one.
    pub fn register(&mut self, action: ActionDef) -> Option<ActionDef> {
        self.actions.insert(action.id.clone(), action)
    }

    /// Look up an action.
    pub fn get(&self, id: &str) -> Option<&ActionDef> {
        self.actions.get(id)
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// No actions registered?
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// All actions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ActionDef> {
        self.actions.values()
    }

    /// Actions whose level requirements `user` meets. Energy is not checked.
    pub fn available_for(&self, user: &UserSnapshot, config: &GameConfig) -> Result<Vec<&ActionDef>, GameError> {
        let mut available = Vec::new();
        for action in self.iter() {
            if meets_level_requirements(user, &action.requirements, config)? {
                available.push(action);
            }
        }
        Ok(available)
    }
}

/// Id of the training action for `skill`, e.g. `trainStrength`.
pub fn train_action_id(skill: SkillKind) -> String {
    format!("train{}", skill.label())
}

// =============================================================================
// TESTS
// =============================================================================
