//! Character Skills
//!
//! A skill only stores XP. Level and progress are derived through the
//! [`LevelCurve`] whenever they are needed.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Deserialize};

use crate::game::level::LevelCurve;

/// Trainable skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillKind {
    /// Drives attack power.
    Strength,
    /// Drives defense power.
    Defense,
}

impl SkillKind {
    /// Every skill a character has.
    pub const ALL: [SkillKind; 2] = [SkillKind::Strength, SkillKind::Defense];

    /// Lowercase name used in action ids and payloads.
    pub fn name(self) -> &'static str {
        match self {
            SkillKind::Strength => "strength",
            SkillKind::Defense => "defense",
        }
    }

    /// Capitalized name used in labels.
    pub fn label(self) -> &'static str {
        match self {
            SkillKind::Strength => "Strength",
            SkillKind::Defense => "Defense",
        }
    }
}

impl fmt::Display for SkillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stored skill progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Accumulated experience. Never negative.
    pub xp: i64,
}

impl Skill {
    /// Skill with the given XP.
    pub const fn new(xp: i64) -> Self {
        Self { xp }
    }

    /// Derived level.
    pub fn level(&self, curve: &LevelCurve) -> i64 {
        curve.level_for_xp(self.xp)
    }

    /// XP missing before the next level.
    pub fn xp_to_next_level(&self, curve: &LevelCurve) -> i64 {
        curve.xp_to_next_level(self.xp)
    }

    /// Add experience. Negative amounts are ignored.
    pub fn add_xp(&mut self, amount: i64) {
        self.xp = self.xp.saturating_add(amount.max(0));
    }

    /// Read model for display.
    pub fn view(&self, curve: &LevelCurve) -> SkillView {
        SkillView {
            xp: self.xp,
            level: self.level(curve),
            xp_to_next_level: self.xp_to_next_level(curve),
        }
    }
}

/// Skill map as stored on a character.
pub type Skills = BTreeMap<SkillKind, Skill>;

/// Fresh skill map with every skill at zero XP.
pub fn starting_skills() -> Skills {
    SkillKind::ALL.into_iter().map(|kind| (kind, Skill::default())).collect()
}

/// Derived skill values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillView {
    /// Accumulated experience.
    pub xp: i64,
    /// Current level.
    pub level: i64,
    /// XP missing before the next level.
    pub xp_to_next_level: i64,
}

// =============================================================================
// TESTS
// =============================================================================
