//! User Persistence
//!
//! The dispatcher loads a user once and saves it once per action. Anything
//! that can do that is a [`UserStore`]; [`MemoryStore`] keeps bincode
//! records in memory.

pub mod memory;

pub use memory::MemoryStore;

use std::sync::Arc;

use crate::error::StoreError;
use crate::game::user::{UserId, UserSnapshot};

/// Load/save collaborator of the dispatcher.
pub trait UserStore {
    /// Fetch a user. `Ok(None)` if there is no record.
    fn load(&self, id: &UserId) -> Result<Option<UserSnapshot>, StoreError>;

    /// Insert or overwrite a user record.
    fn save(&self, user: &UserSnapshot) -> Result<(), StoreError>;
}

impl<S: UserStore + ?Sized> UserStore for Arc<S> {
    fn load(&self, id: &UserId) -> Result<Option<UserSnapshot>, StoreError> {
        (**self).load(id)
    }

    fn save(&self, user: &UserSnapshot) -> Result<(), StoreError> {
        (**self).save(user)
    }
}

impl<S: UserStore + ?Sized> UserStore for &S {
    fn load(&self, id: &UserId) -> Result<Option<UserSnapshot>, StoreError> {
        (**self).load(id)
    }

    fn save(&self, user: &UserSnapshot) -> Result<(), StoreError> {
        (**self).save(user)
    }
}
