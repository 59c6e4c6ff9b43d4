//! Combatants
//!
//! Player and enemy share one stat block. The formulas are pure functions
//! of the current stats and are recomputed on every turn.
//!
//! ```text
//! attack power  = ceil(strength ^ 1.2)
//! defense power = floor((defense / 2) ^ 0.9)
//! combat level  = floor((strength + defense) / 2)
//! ```

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::skills::SkillKind;
use crate::game::user::UserSnapshot;

/// Exponent applied to strength for attack power.
const ATTACK_EXPONENT: f64 = 1.2;

/// Exponent applied to half the defense for defense power.
const DEFENSE_EXPONENT: f64 = 0.9;

/// Upper bound of a damage roll.
pub fn attack_power(strength: i64) -> i64 {
    (strength as f64).powf(ATTACK_EXPONENT).ceil() as i64
}

/// Upper bound of a damage reduction roll.
pub fn defense_power(defense: i64) -> i64 {
    (defense as f64 / 2.0).powf(DEFENSE_EXPONENT).floor() as i64
}

/// Level used to balance hit chance between two fighters.
pub fn combat_level(strength: i64, defense: i64) -> i64 {
    (strength + defense).div_euclid(2)
}

/// Which side of an encounter a combatant is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    /// The user's character.
    Player,
    /// The catalog enemy.
    Enemy,
}

impl Side {
    /// The other side.
    pub fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Name and health at one instant, as recorded in the combat log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantInfo {
    /// Display name.
    pub name: String,
    /// Health at that instant.
    pub health: i64,
}

/// Stat block of anything that can fight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    /// Display name.
    pub name: String,
    /// Health. Zero or below means dead.
    pub health: i64,
    /// Strength stat.
    pub strength: i64,
    /// Defense stat.
    pub defense: i64,
}

impl Combatant {
    /// Create a combatant.
    pub fn new(name: impl Into<String>, health: i64, strength: i64, defense: i64) -> Self {
        Self {
            name: name.into(),
            health,
            strength,
            defense,
        }
    }

    /// Player combatant for `user` at `now`.
    ///
    /// Health is the current regenerated value; strength and defense are the
    /// derived skill levels.
    pub fn player(user: &UserSnapshot, config: &GameConfig, now: DateTime<Utc>) -> Result<Self, GameError> {
        Ok(Self::new(
            user.name.clone(),
            user.current_health(config, now),
            user.skill_level(SkillKind::Strength, config)?,
            user.skill_level(SkillKind::Defense, config)?,
        ))
    }

    /// See [`attack_power`].
    pub fn attack_power(&self) -> i64 {
        attack_power(self.strength)
    }

    /// See [`defense_power`].
    pub fn defense_power(&self) -> i64 {
        defense_power(self.defense)
    }

    /// See [`combat_level`].
    pub fn combat_level(&self) -> i64 {
        combat_level(self.strength, self.defense)
    }

    /// Still standing?
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Subtract damage. Health may drop below zero.
    pub fn take_damage(&mut self, amount: i64) {
        self.health -= amount;
    }

    /// Log snapshot.
    pub fn info(&self) -> CombatantInfo {
        CombatantInfo {
            name: self.name.clone(),
            health: self.health,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
