//! Enemy Catalog
//!
//! Templates describe an enemy with inclusive stat ranges. Each spawn
//! samples strength, defense and its money drop once.

use serde::{Serialize, Deserialize};

use crate::core::rng::RandomSource;
use crate::game::fighter::Combatant;

/// Inclusive `[min, max]` range.
pub type StatRange = [i64; 2];

/// Catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyTemplate {
    /// Identifier used by the fight action.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Nominal level.
    pub level: i64,
    /// Starting health.
    pub health: i64,
    /// Strength range.
    pub strength: StatRange,
    /// Defense range.
    pub defense: StatRange,
    /// Money drop range.
    pub money: StatRange,
    /// XP granted when defeated.
    pub xp_reward: i64,
}

impl EnemyTemplate {
    /// Sample a concrete enemy.
    pub fn spawn<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Enemy {
        let strength = sample(rng, self.strength);
        let defense = sample(rng, self.defense);
        let money = sample(rng, self.money);

        Enemy {
            id: self.id.clone(),
            combatant: Combatant::new(self.name.clone(), self.health, strength, defense),
            level: self.level,
            xp_reward: self.xp_reward,
            money_range: self.money,
            money,
        }
    }
}

#[inline]
fn sample<R: RandomSource + ?Sized>(rng: &mut R, range: StatRange) -> i64 {
    rng.next_int_range(range[0], range[1])
}

/// A spawned enemy. Lives for one encounter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enemy {
    /// Template id.
    pub id: String,
    /// Sampled stat block.
    pub combatant: Combatant,
    /// Nominal level.
    pub level: i64,
    /// XP granted when defeated.
    pub xp_reward: i64,
    /// Range the money drop was sampled from.
    pub money_range: StatRange,
    /// Money dropped when defeated.
    pub money: i64,
}

/// Set of enemies the fight action can spawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemyCatalog {
    templates: Vec<EnemyTemplate>,
}

impl Default for EnemyCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl EnemyCatalog {
    /// Catalog from explicit templates.
    pub fn new(templates: Vec<EnemyTemplate>) -> Self {
        Self { templates }
    }

    /// The live game's enemies.
    pub fn standard() -> Self {
        Self::new(vec![
            EnemyTemplate {
                id: "mouse".into(),
                name: "Mouse".into(),
                level: 1,
                health: 10,
                strength: [1, 1],
                defense: [0, 0],
                money: [1, 5],
                xp_reward: 10,
            },
            EnemyTemplate {
                id: "turtle".into(),
                name: "Turtle".into(),
                level: 2,
                health: 20,
                strength: [2, 2],
                defense: [5, 5],
                money: [3, 10],
                xp_reward: 20,
            },
        ])
    }

    /// Look up a template.
    pub fn get(&self, id: &str) -> Option<&EnemyTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// All templates in catalog order.
    pub fn templates(&self) -> &[EnemyTemplate] {
        &self.templates
    }

    /// Spawn a named enemy, or `None` if the id is unknown.
    pub fn spawn<R: RandomSource + ?Sized>(&self, id: &str, rng: &mut R) -> Option<Enemy> {
        self.get(id).map(|t| t.spawn(rng))
    }

    /// Spawn a uniformly chosen enemy. `None` only for an empty catalog.
    pub fn spawn_random<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<Enemy> {
        if self.templates.is_empty() {
            return None;
        }
        let idx = rng.next_index(self.templates.len());
        Some(self.templates[idx].spawn(rng))
    }
}

// =============================================================================
// TESTS
// =============================================================================
