//! Game Logic Module
//!
//! Everything that decides numbers: resources, levels, combat.
//! No I/O and no clock reads; callers pass `now` in.
//!
//! ## Module Structure
//!
//! - `level`: XP ↔ level curve
//! - `resource`: lazily regenerating energy and health
//! - `skills`: stored skill XP and derived levels
//! - `user`: persisted user record and its read model
//! - `fighter`: combatant stat block and formulas
//! - `enemies`: enemy catalog and sampling
//! - `encounter`: turn-based combat resolver

pub mod level;
pub mod resource;
pub mod skills;
pub mod user;
pub mod fighter;
pub mod enemies;
pub mod encounter;

// Re-export key types
pub use level::LevelCurve;
pub use resource::{RegeneratingResource, ResourceSnapshot};
pub use skills::{Skill, SkillKind, Skills};
pub use user::{CharacterView, UserId, UserSnapshot};
pub use fighter::{Combatant, Side};
pub use enemies::{Enemy, EnemyCatalog, EnemyTemplate};
pub use encounter::{CombatConfig, CombatEncounter, CombatLogEntry, EncounterReport, Outcome};
