//! Player Actions
//!
//! Everything a user can ask the tavern to do, and the dispatcher that
//! checks, runs and persists it.
//!
//! ## Module Structure
//!
//! - `registry`: action ids, costs and requirements
//! - `requirements`: level and energy checks
//! - `result`: what a caller gets back
//! - `dispatch`: the check/effect/deduct/save protocol
//! - `fight`, `heal`, `train`: the effects

pub mod context;
pub mod dispatch;
pub mod registry;
pub mod requirements;
pub mod result;

mod fight;
mod heal;
mod train;

// Re-export key types
pub use context::ActionParams;
pub use dispatch::Dispatcher;
pub use registry::{ActionDef, ActionKind, ActionRegistry};
pub use requirements::{LevelRequirement, RequirementKind};
pub use result::{ActionResult, FailureKind};
