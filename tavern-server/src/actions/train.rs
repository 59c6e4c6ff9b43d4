//! Training action: fixed XP into one skill.

use crate::actions::context::ActionContext;
use crate::actions::result::ActionResult;
use crate::error::GameError;
use crate::game::skills::SkillKind;
use crate::game::user::UserSnapshot;

pub(crate) fn execute(
    user: &mut UserSnapshot,
    skill: SkillKind,
    ctx: &ActionContext<'_>,
) -> Result<ActionResult, GameError> {
    let curve = &ctx.config.level_curve;
    let entry = user.skill_mut(skill)?;
    let level_before = entry.level(curve);
    entry.add_xp(ctx.config.train_xp);
    let view = entry.view(curve);

    let mut message = format!("You train {} and gain {} XP.", skill, ctx.config.train_xp);
    if view.level > level_before {
        message.push_str(&format!(" {} is now level {}.", skill.label(), view.level));
    }

    Ok(ActionResult::succeeded(message)
        .with_extra("skill", skill.name().into())
        .with_extra("xp", view.xp.into())
        .with_extra("level", view.level.into())
        .with_extra("xpToNextLevel", view.xp_to_next_level.into()))
}

// =============================================================================
// TESTS
// =============================================================================
