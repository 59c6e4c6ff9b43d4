//! Heal action: restore health to max.

use crate::actions::context::ActionContext;
use crate::actions::result::ActionResult;
use crate::error::GameError;
use crate::game::user::UserSnapshot;

pub(crate) fn execute(user: &mut UserSnapshot, ctx: &ActionContext<'_>) -> Result<ActionResult, GameError> {
    let health = &ctx.config.health;
    let current = user.current_health(ctx.config, ctx.now);
    if current >= health.max_value {
        return Ok(ActionResult::requirements_not_met("You have full health"));
    }

    let restored = health.max_value - current;
    user.health = health.apply_delta(&user.health, restored, ctx.now);

    Ok(ActionResult::succeeded(format!("You rest and recover {} HP.", restored))
        .with_extra("restored", restored.into())
        .with_extra("health", health.max_value.into()))
}

// =============================================================================
// TESTS
// =============================================================================
