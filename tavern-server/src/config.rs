//! Game and runtime configuration.
//!
//! [`GameConfig`] holds the balance constants the simulation runs on.
//! [`RuntimeConfig`] holds process-level knobs read from the environment.

use crate::game::encounter::CombatConfig;
use crate::game::level::LevelCurve;
use crate::game::resource::{RegeneratingResource, MINUTE_MS};

/// Energy cap.
pub const ENERGY_MAX: i64 = 100;

/// Minutes per energy tick.
pub const ENERGY_REGEN_RATE_MINUTES: i64 = 1;

/// Base health cap.
pub const HEALTH_MAX_BASE: i64 = 20;

/// Minutes per health tick.
pub const HEALTH_REGEN_RATE_MINUTES: i64 = 10;

/// Money a new character starts with.
pub const MONEY_STARTING: i64 = 100;

/// XP granted by one training action.
pub const TRAIN_XP: i64 = 10;

/// Energy cost per action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionCosts {
    /// Cost of a fight.
    pub fight: i64,
    /// Cost of a full heal.
    pub heal: i64,
    /// Cost of one training session.
    pub train: i64,
}

impl Default for ActionCosts {
    fn default() -> Self {
        Self {
            fight: 5,
            heal: 15,
            train: 3,
        }
    }
}

/// Balance configuration for the simulation core.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Energy resource.
    pub energy: RegeneratingResource,
    /// Health resource.
    pub health: RegeneratingResource,
    /// Combat tuning.
    pub combat: CombatConfig,
    /// XP curve shared by every skill.
    pub level_curve: LevelCurve,
    /// Energy costs.
    pub costs: ActionCosts,
    /// XP per training action.
    pub train_xp: i64,
    /// Money for new characters.
    pub starting_money: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            energy: RegeneratingResource::new(ENERGY_REGEN_RATE_MINUTES * MINUTE_MS, 0, ENERGY_MAX),
            health: RegeneratingResource::new(HEALTH_REGEN_RATE_MINUTES * MINUTE_MS, 0, HEALTH_MAX_BASE),
            combat: CombatConfig::default(),
            level_curve: LevelCurve::STANDARD,
            costs: ActionCosts::default(),
            train_xp: TRAIN_XP,
            starting_money: MONEY_STARTING,
        }
    }
}

/// Process configuration for the server binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Fallback log filter when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Fixed RNG seed. When unset, seeds are derived per action.
    pub rng_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            rng_seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_filter: std::env::var("TAVERN_LOG").unwrap_or(defaults.log_filter),
            rng_seed: std::env::var("TAVERN_SEED")
                .ok()
                .and_then(|v| v.trim().parse().ok()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
