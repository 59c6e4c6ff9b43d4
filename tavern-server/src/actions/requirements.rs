//! Action preconditions.
//!
//! Checked by the dispatcher before any effect runs. A failed check is an
//! ordinary result and leaves the user untouched.

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::skills::SkillKind;
use crate::game::user::UserSnapshot;

/// How a skill level is compared against the required level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequirementKind {
    /// Level must be at least the value.
    Minimum,
    /// Level must be at most the value.
    Maximum,
    /// Level must equal the value.
    Exact,
}

/// A single skill-level condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRequirement {
    /// Comparison.
    #[serde(rename = "type")]
    pub kind: RequirementKind,
    /// Skill whose derived level is compared.
    pub skill: SkillKind,
    /// Threshold.
    pub level: i64,
}

impl LevelRequirement {
    /// `skill` level >= `level`.
    pub const fn minimum(skill: SkillKind, level: i64) -> Self {
        Self { kind: RequirementKind::Minimum, skill, level }
    }

    /// `skill` level <= `level`.
    pub const fn maximum(skill: SkillKind, level: i64) -> Self {
        Self { kind: RequirementKind::Maximum, skill, level }
    }

    /// `skill` level == `level`.
    pub const fn exact(skill: SkillKind, level: i64) -> Self {
        Self { kind: RequirementKind::Exact, skill, level }
    }

    /// Whether a skill at `level` satisfies this requirement.
    pub fn is_met_by(&self, level: i64) -> bool {
        match self.kind {
            RequirementKind::Minimum => level >= self.level,
            RequirementKind::Maximum => level <= self.level,
            RequirementKind::Exact => level == self.level,
        }
    }
}

/// Every requirement holds for `user`.
///
/// Errors only when the user record lacks a referenced skill.
pub fn meets_level_requirements(
    user: &UserSnapshot,
    requirements: &[LevelRequirement],
    config: &GameConfig,
) -> Result<bool, GameError> {
    for requirement in requirements {
        let level = user.skill_level(requirement.skill, config)?;
        if !requirement.is_met_by(level) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Current energy covers `cost` at `now`.
pub fn meets_energy_requirement(
    user: &UserSnapshot,
    cost: i64,
    config: &GameConfig,
    now: DateTime<Utc>,
) -> bool {
    user.current_energy(config, now) >= cost
}

// =============================================================================
// TESTS
// =============================================================================
