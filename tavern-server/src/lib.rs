//! # Tavern Game Core
//!
//! Game-state simulation for the Tavern incremental RPG: regenerating
//! resources, skill levels, turn-based combat and the action dispatcher
//! that ties them to a persisted user record.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TAVERN CORE                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  └── rng.rs      - Xorshift128+ PRNG, action seeds           │
//! │                                                              │
//! │  game/           - Rules (pure, clock passed in)             │
//! │  ├── resource.rs - Lazily regenerating energy/health         │
//! │  ├── level.rs    - XP ↔ level curve                          │
//! │  ├── skills.rs   - Skill XP and derived levels               │
//! │  ├── user.rs     - User record and character view            │
//! │  ├── fighter.rs  - Combatant stats and formulas              │
//! │  ├── enemies.rs  - Enemy catalog                             │
//! │  └── encounter.rs- Turn-based combat resolver                │
//! │                                                              │
//! │  actions/        - Player actions                            │
//! │  ├── registry.rs - Ids, costs, requirements                  │
//! │  └── dispatch.rs - Check → effect → deduct → save            │
//! │                                                              │
//! │  store/          - UserStore trait, in-memory store          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Time and Randomness
//!
//! Nothing in `game/` or `actions/` reads the clock or a global RNG:
//! - Every operation takes `now` explicitly
//! - Resources are pure functions of `(snapshot, now)`
//! - Combat rolls come from an injected [`RandomSource`]
//!
//! Given the same record, timestamp and seed, an action produces the
//! same result and the same saved record.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod actions;
pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod store;

// Re-export commonly used types
pub use actions::{ActionParams, ActionResult, Dispatcher, FailureKind};
pub use config::{GameConfig, RuntimeConfig};
pub use crate::core::rng::{DeterministicRng, RandomSource};
pub use error::{GameError, StoreError};
pub use game::user::{CharacterView, UserId, UserSnapshot};
pub use store::{MemoryStore, UserStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
