//! Action Dispatcher
//!
//! Runs one action for one user against one timestamp.
//!
//! ```text
//! lookup action ──▶ load user ──▶ level reqs ──▶ energy ──▶ effect ──▶ deduct ──▶ save
//!      │                │              │            │          │
//!   notFound          fatal    requirementsNotMet   │       result
//!                                                  requirementsNotMet
//! ```
//!
//! A rejected action returns before the effect and never touches the
//! store. The effect works on a loaded copy, so a fatal error halfway
//! through leaves the stored record as it was.

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::actions::context::{ActionContext, ActionParams};
use crate::actions::registry::{ActionDef, ActionKind, ActionRegistry};
use crate::actions::requirements::{meets_energy_requirement, meets_level_requirements};
use crate::actions::result::ActionResult;
use crate::actions::{fight, heal, train};
use crate::config::GameConfig;
use crate::core::rng::RandomSource;
use crate::error::GameError;
use crate::game::enemies::EnemyCatalog;
use crate::game::user::{CharacterView, UserId, UserSnapshot};
use crate::store::UserStore;

/// Owns the rules and the store handle.
#[derive(Debug)]
pub struct Dispatcher<S> {
    store: S,
    config: GameConfig,
    registry: ActionRegistry,
    catalog: EnemyCatalog,
}

impl<S: UserStore> Dispatcher<S> {
    /// Dispatcher with the standard actions and enemies.
    pub fn new(store: S, config: GameConfig) -> Self {
        let registry = ActionRegistry::standard(&config);
        Self {
            store,
            config,
            registry,
            catalog: EnemyCatalog::standard(),
        }
    }

    /// Replace the action registry.
    pub fn with_registry(mut self, registry: ActionRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the enemy catalog.
    pub fn with_catalog(mut self, catalog: EnemyCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Store handle.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Balance configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Registered actions.
    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Enemy catalog.
    pub fn catalog(&self) -> &EnemyCatalog {
        &self.catalog
    }

    /// Run `action_id` for `user_id` at `now`.
    ///
    /// Unmet requirements and unknown ids come back as failed results. Only
    /// broken invariants (user missing, corrupt record, store failure) are
    /// errors.
    #[instrument(skip(self, user_id, params, now, rng), fields(user = %user_id))]
    pub fn dispatch<R: RandomSource + ?Sized>(
        &self,
        user_id: &UserId,
        action_id: &str,
        params: &ActionParams,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<ActionResult, GameError> {
        let Some(action) = self.registry.get(action_id) else {
            debug!("Unknown action {}", action_id);
            return Ok(ActionResult::not_found(format!("Action {} not found", action_id)));
        };

        let mut user = self.load_user(user_id)?;

        if !meets_level_requirements(&user, &action.requirements, &self.config)? {
            debug!("Level requirements not met for {}", action.id);
            return Ok(ActionResult::requirements_not_met(
                "You do not meet the level requirements for this action",
            ));
        }
        if !meets_energy_requirement(&user, action.energy_cost, &self.config, now) {
            debug!(
                "Not enough energy for {}: need {}, have {}",
                action.id,
                action.energy_cost,
                user.current_energy(&self.config, now)
            );
            return Ok(ActionResult::requirements_not_met("Not enough energy"));
        }

        let ctx = ActionContext {
            config: &self.config,
            catalog: &self.catalog,
            params,
            now,
        };
        let result = match action.kind {
            ActionKind::Fight => fight::execute(&mut user, &ctx, rng)?,
            ActionKind::Heal => heal::execute(&mut user, &ctx)?,
            ActionKind::Train(skill) => train::execute(&mut user, skill, &ctx)?,
        };

        if result.success {
            user.energy = self
                .config
                .energy
                .apply_delta(&user.energy, -action.energy_cost, now);
        }

        self.store.save(&user)?;

        info!(
            "{} -> success={} \"{}\"",
            action.id, result.success, result.message
        );
        Ok(result)
    }

    /// Actions whose level requirements the user meets.
    pub fn available_actions(&self, user_id: &UserId) -> Result<Vec<&ActionDef>, GameError> {
        let user = self.load_user(user_id)?;
        self.registry.available_for(&user, &self.config)
    }

    /// Character read model at `now`.
    pub fn character(&self, user_id: &UserId, now: DateTime<Utc>) -> Result<CharacterView, GameError> {
        Ok(self.load_user(user_id)?.view(&self.config, now))
    }

    fn load_user(&self, user_id: &UserId) -> Result<UserSnapshot, GameError> {
        match self.store.load(user_id)? {
            Some(user) => Ok(user),
            None => {
                warn!("User {} missing from store", user_id);
                Err(GameError::UserNotFound(*user_id))
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
