//! User Records
//!
//! [`UserSnapshot`] is the per-user record the store persists. The
//! dispatcher is the only writer. [`CharacterView`] is the derived read
//! model a client sees.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::resource::{RegeneratingResource, ResourceSnapshot};
use crate::game::skills::{starting_skills, Skill, SkillKind, SkillView, Skills};

// =============================================================================
// USER ID
// =============================================================================

/// Unique user identifier (UUID as bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub struct UserId(pub [u8; 16]);

impl UserId {
    /// Create from raw bytes.
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Fresh random identifier.
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().into_bytes())
    }

    /// Create from UUID string.
    pub fn from_uuid_str(s: &str) -> Option<Self> {
        uuid::Uuid::parse_str(s)
            .ok()
            .map(|u| Self(*u.as_bytes()))
    }

    /// Convert to UUID string.
    pub fn to_uuid_string(&self) -> String {
        uuid::Uuid::from_bytes(self.0).to_string()
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uuid_string())
    }
}

// =============================================================================
// USER SNAPSHOT
// =============================================================================

/// Persisted per-user game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    /// Owner of the record.
    pub id: UserId,
    /// Character name shown in combat logs.
    pub name: String,
    /// Money balance.
    pub money: i64,
    /// Energy resource snapshot.
    pub energy: ResourceSnapshot,
    /// Health resource snapshot.
    pub health: ResourceSnapshot,
    /// Skill progress.
    pub skills: Skills,
}

impl UserSnapshot {
    /// New character: full energy and health, starting money, untrained skills.
    pub fn new(id: UserId, name: impl Into<String>, config: &GameConfig, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            money: config.starting_money,
            energy: config.energy.full(now),
            health: config.health.full(now),
            skills: starting_skills(),
        }
    }

    /// Stored skill entry.
    ///
    /// A missing entry means the record is corrupt, so it is an error rather
    /// than a default.
    pub fn skill(&self, kind: SkillKind) -> Result<&Skill, GameError> {
        self.skills.get(&kind).ok_or(GameError::MissingSkill {
            user_id: self.id,
            skill: kind,
        })
    }

    /// Mutable skill entry. Same contract as [`UserSnapshot::skill`].
    pub fn skill_mut(&mut self, kind: SkillKind) -> Result<&mut Skill, GameError> {
        let user_id = self.id;
        self.skills.get_mut(&kind).ok_or(GameError::MissingSkill {
            user_id,
            skill: kind,
        })
    }

    /// Derived level of a skill.
    pub fn skill_level(&self, kind: SkillKind, config: &GameConfig) -> Result<i64, GameError> {
        Ok(self.skill(kind)?.level(&config.level_curve))
    }

    /// Current energy at `now`.
    pub fn current_energy(&self, config: &GameConfig, now: DateTime<Utc>) -> i64 {
        config.energy.current_value(&self.energy, now)
    }

    /// Current health at `now`.
    pub fn current_health(&self, config: &GameConfig, now: DateTime<Utc>) -> i64 {
        config.health.current_value(&self.health, now)
    }

    /// Read model at `now`.
    pub fn view(&self, config: &GameConfig, now: DateTime<Utc>) -> CharacterView {
        CharacterView {
            id: self.id.to_uuid_string(),
            name: self.name.clone(),
            money: self.money,
            energy: ResourceView::new(&config.energy, &self.energy, now),
            health: ResourceView::new(&config.health, &self.health, now),
            skills: self
                .skills
                .iter()
                .map(|(kind, skill)| (*kind, skill.view(&config.level_curve)))
                .collect(),
        }
    }
}

// =============================================================================
// VIEWS
// =============================================================================

/// Derived state of one resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceView {
    /// Current value.
    pub current: i64,
    /// Cap.
    pub max: i64,
    /// Next regeneration tick, absent when full.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_tick_at: Option<DateTime<Utc>>,
}

impl ResourceView {
    fn new(resource: &RegeneratingResource, snapshot: &ResourceSnapshot, now: DateTime<Utc>) -> Self {
        Self {
            current: resource.current_value(snapshot, now),
            max: resource.max_value,
            next_tick_at: resource.next_tick_at(snapshot, now),
        }
    }
}

/// What a client sees of a character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterView {
    /// User id as a UUID string.
    pub id: String,
    /// Character name.
    pub name: String,
    /// Money balance.
    pub money: i64,
    /// Energy.
    pub energy: ResourceView,
    /// Health.
    pub health: ResourceView,
    /// Skills with derived levels.
    pub skills: BTreeMap<SkillKind, SkillView>,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 5, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_new_user_defaults() {
        let config = GameConfig::default();
        let user = UserSnapshot::new(UserId::new([1; 16]), "Ada", &config, now());

        assert_eq!(user.money, 100);
        assert_eq!(user.current_energy(&config, now()), 100);
        assert_eq!(user.current_health(&config, now()), 20);
        assert_eq!(user.skill_level(SkillKind::Strength, &config).unwrap(), 1);
        assert_eq!(user.skill_level(SkillKind::Defense, &config).unwrap(), 1);
    }

    #[test]
    fn test_missing_skill_is_an_error() {
        let config = GameConfig::default();
        let mut user = UserSnapshot::new(UserId::new([2; 16]), "Bo", &config, now());
        user.skills.remove(&SkillKind::Defense);

        assert!(matches!(
            user.skill(SkillKind::Defense),
            Err(GameError::MissingSkill { skill: SkillKind::Defense, .. })
        ));
        assert!(user.skill_mut(SkillKind::Defense).is_err());
        assert!(user.skill(SkillKind::Strength).is_ok());
    }

    #[test]
    fn test_view_hides_next_tick_when_full() {
        let config = GameConfig::default();
        let mut user = UserSnapshot::new(UserId::new([3; 16]), "Cy", &config, now());
        user.energy = config.energy.apply_delta(&user.energy, -10, now());

        let later = now() + Duration::seconds(30);
        let view = user.view(&config, later);

        assert_eq!(view.energy.current, 90);
        assert_eq!(view.energy.next_tick_at, Some(later + Duration::seconds(30)));
        assert_eq!(view.health.current, 20);
        assert_eq!(view.health.next_tick_at, None);
    }

    #[test]
    fn test_view_json_shape() {
        let config = GameConfig::default();
        let user = UserSnapshot::new(UserId::new([4; 16]), "Di", &config, now());
        let json = serde_json::to_value(user.view(&config, now())).unwrap();

        assert_eq!(json["skills"]["strength"]["xpToNextLevel"], 120);
        assert_eq!(json["energy"]["current"], 100);
        assert!(json["energy"].get("nextTickAt").is_none());
    }

    #[test]
    fn test_user_id_uuid_round_trip() {
        let id = UserId::random();
        let parsed = UserId::from_uuid_str(&id.to_uuid_string()).unwrap();
        assert_eq!(id, parsed);
        assert!(UserId::from_uuid_str("not-a-uuid").is_none());
    }
}
