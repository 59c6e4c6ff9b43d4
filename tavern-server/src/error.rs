//! Fatal error types.
//!
//! Only conditions that point at a bug in the surrounding system end up
//! here. Unmet requirements and unknown ids are ordinary results, see
//! [`crate::actions::ActionResult`].

use thiserror::Error;

use crate::game::skills::SkillKind;
use crate::game::user::UserId;

/// Failures of the user store collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record could not be encoded.
    #[error("failed to encode user record: {0}")]
    Encode(bincode::Error),

    /// Stored bytes could not be decoded.
    #[error("failed to decode user record: {0}")]
    Decode(bincode::Error),

    /// A writer panicked while holding the lock.
    #[error("user store lock poisoned")]
    LockPoisoned,
}

/// Invariant violations surfaced by the dispatcher.
#[derive(Debug, Error)]
pub enum GameError {
    /// The user vanished between authentication and the action.
    #[error("user {0} not found")]
    UserNotFound(UserId),

    /// A user record lacks a skill every character must have.
    #[error("user {user_id} has no {skill} skill entry")]
    MissingSkill {
        /// Owner of the corrupt record.
        user_id: UserId,
        /// Skill that is missing.
        skill: SkillKind,
    },

    /// The store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// An action payload could not be rendered as JSON.
    #[error("failed to encode action payload: {0}")]
    Payload(#[from] serde_json::Error),
}
