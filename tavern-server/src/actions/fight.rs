//! Fight action.
//!
//! Spawns an enemy, runs the encounter and writes the aftermath back into
//! the user: remaining health, strength XP and the money drop.

use serde_json::Value;

use crate::actions::context::ActionContext;
use crate::actions::result::ActionResult;
use crate::core::rng::RandomSource;
use crate::error::GameError;
use crate::game::encounter::{CombatEncounter, Outcome};
use crate::game::fighter::Combatant;
use crate::game::skills::SkillKind;
use crate::game::user::UserSnapshot;

pub(crate) fn execute<R: RandomSource + ?Sized>(
    user: &mut UserSnapshot,
    ctx: &ActionContext<'_>,
    rng: &mut R,
) -> Result<ActionResult, GameError> {
    let config = ctx.config;
    let health_before = user.current_health(config, ctx.now);
    if health_before <= 0 {
        return Ok(ActionResult::requirements_not_met("You are dead"));
    }

    let enemy = match ctx.params.enemy_id.as_deref() {
        Some(id) => ctx.catalog.spawn(id, rng),
        None => ctx.catalog.spawn_random(rng),
    };
    let Some(enemy) = enemy else {
        let message = match ctx.params.enemy_id.as_deref() {
            Some(id) => format!("Enemy {} not found", id),
            None => "No enemies to fight".to_string(),
        };
        return Ok(ActionResult::not_found(message));
    };

    let enemy_id = enemy.id.clone();
    let enemy_name = enemy.combatant.name.clone();
    let player = Combatant::player(user, config, ctx.now)?;
    let report = CombatEncounter::new(player, enemy, config.combat).start(rng);

    user.health = config
        .health
        .apply_delta(&user.health, report.player_health - health_before, ctx.now);
    user.skill_mut(SkillKind::Strength)?.add_xp(report.xp);
    user.money = user.money.saturating_add(report.money);

    let message = match report.outcome {
        Outcome::PlayerWon => format!("You defeated the {}.", enemy_name),
        Outcome::EnemyWon => format!("The {} defeated you.", enemy_name),
        Outcome::Draw => format!("You and the {} are too exhausted to go on.", enemy_name),
    };
    let result = if report.outcome == Outcome::PlayerWon {
        ActionResult::succeeded(message)
    } else {
        ActionResult::failed(message)
    };

    let lines: Vec<Value> = report.log.iter().map(|e| Value::String(e.to_string())).collect();
    Ok(result
        .with_extra("enemy", Value::String(enemy_id))
        .with_extra("outcome", serde_json::to_value(report.outcome)?)
        .with_extra("xp", report.xp.into())
        .with_extra("money", report.money.into())
        .with_extra("turns", report.turns.into())
        .with_extra("log", serde_json::to_value(&report.log)?)
        .with_extra("text", Value::Array(lines)))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::context::ActionParams;
    use crate::actions::result::FailureKind;
    use crate::config::GameConfig;
    use crate::game::encounter::CombatConfig;
    use crate::game::enemies::EnemyCatalog;
    use crate::game::skills::Skill;
    use crate::game::user::UserId;
    use chrono::{DateTime, TimeZone, Utc};

    /// Every roll returns the same value.
    struct FixedRoll(f64);

    impl RandomSource for FixedRoll {
        fn next_f64(&mut self) -> f64 {
            self.0
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 9, 12, 0, 0).unwrap()
    }

    fn always_hit() -> GameConfig {
        GameConfig {
            combat: CombatConfig {
                base_hit_chance: 1.0,
                hit_chance_per_level: 0.0,
                ..CombatConfig::default()
            },
            ..GameConfig::default()
        }
    }

    fn strong_user(config: &GameConfig) -> UserSnapshot {
        let mut user = UserSnapshot::new(UserId::new([7; 16]), "Gus", config, now());
        // level 11 strength: attack power 18, one-shots a mouse on a max roll
        user.skills.insert(SkillKind::Strength, Skill::new(4_900));
        user
    }

    #[test]
    fn test_win_awards_xp_and_money() {
        let config = always_hit();
        let catalog = EnemyCatalog::standard();
        let params = ActionParams::enemy("mouse");
        let ctx = ActionContext { config: &config, catalog: &catalog, params: &params, now: now() };
        let mut user = strong_user(&config);
        let xp_before = user.skill(SkillKind::Strength).unwrap().xp;

        let result = execute(&mut user, &ctx, &mut FixedRoll(0.999_999)).unwrap();

        assert!(result.success);
        assert_eq!(result.message, "You defeated the Mouse.");
        assert_eq!(result.extra("outcome"), Some(&Value::from("playerWon")));
        assert_eq!(user.skill(SkillKind::Strength).unwrap().xp, xp_before + 10);
        assert_eq!(user.money, 105);
        assert_eq!(user.current_health(&config, now()), 20);
        assert_eq!(result.extra("log").and_then(Value::as_array).map(Vec::len), Some(3));
    }

    #[test]
    fn test_loss_writes_back_health() {
        let config = always_hit();
        let catalog = EnemyCatalog::new(vec![crate::game::enemies::EnemyTemplate {
            id: "ogre".into(),
            name: "Ogre".into(),
            level: 9,
            health: 500,
            strength: [30, 30],
            defense: [0, 0],
            money: [0, 0],
            xp_reward: 100,
        }]);
        let params = ActionParams::none();
        let ctx = ActionContext { config: &config, catalog: &catalog, params: &params, now: now() };
        let mut user = UserSnapshot::new(UserId::new([8; 16]), "Hal", &config, now());

        let result = execute(&mut user, &ctx, &mut FixedRoll(0.999_999)).unwrap();

        assert!(!result.success);
        assert_eq!(result.failure, None);
        assert_eq!(result.message, "The Ogre defeated you.");
        assert_eq!(user.current_health(&config, now()), 0);
        assert_eq!(user.skill(SkillKind::Strength).unwrap().xp, 0);
        assert_eq!(user.money, 100);
    }

    #[test]
    fn test_dead_user_cannot_fight() {
        let config = GameConfig::default();
        let catalog = EnemyCatalog::standard();
        let params = ActionParams::none();
        let ctx = ActionContext { config: &config, catalog: &catalog, params: &params, now: now() };
        let mut user = UserSnapshot::new(UserId::new([9; 16]), "Ida", &config, now());
        user.health = config.health.apply_delta(&user.health, -20, now());
        let before = user.clone();

        let result = execute(&mut user, &ctx, &mut FixedRoll(0.5)).unwrap();

        assert_eq!(result.message, "You are dead");
        assert_eq!(result.failure, Some(FailureKind::RequirementsNotMet));
        assert_eq!(user, before);
    }

    #[test]
    fn test_unknown_enemy() {
        let config = GameConfig::default();
        let catalog = EnemyCatalog::standard();
        let params = ActionParams::enemy("dragon");
        let ctx = ActionContext { config: &config, catalog: &catalog, params: &params, now: now() };
        let mut user = UserSnapshot::new(UserId::new([10; 16]), "Jo", &config, now());

        let result = execute(&mut user, &ctx, &mut FixedRoll(0.5)).unwrap();

        assert_eq!(result.failure, Some(FailureKind::NotFound));
        assert_eq!(result.message, "Enemy dragon not found");
    }

    #[test]
    fn test_missing_skill_is_fatal() {
        let config = GameConfig::default();
        let catalog = EnemyCatalog::standard();
        let params = ActionParams::enemy("mouse");
        let ctx = ActionContext { config: &config, catalog: &catalog, params: &params, now: now() };
        let mut user = UserSnapshot::new(UserId::new([11; 16]), "Kim", &config, now());
        user.skills.remove(&SkillKind::Defense);

        assert!(matches!(
            execute(&mut user, &ctx, &mut FixedRoll(0.5)),
            Err(GameError::MissingSkill { skill: SkillKind::Defense, .. })
        ));
    }
}
