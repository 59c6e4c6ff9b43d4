//! In-memory user store.
//!
//! Records are kept bincode-encoded so a load always hands out a fresh
//! copy and a save of a bad record fails the same way a real store would.

use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::trace;

use crate::error::StoreError;
use crate::game::user::{UserId, UserSnapshot};
use crate::store::UserStore;

/// Thread-safe map of encoded user records.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<UserId, Vec<u8>>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `users`.
    pub fn with_users<I>(users: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = UserSnapshot>,
    {
        let store = Self::new();
        for user in users {
            store.save(&user)?;
        }
        Ok(store)
    }

    /// Number of stored users.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().map_err(|_| StoreError::LockPoisoned)?.len())
    }

    /// No users stored?
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Drop a record. Returns whether it existed.
    pub fn remove(&self, id: &UserId) -> Result<bool, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.remove(id).is_some())
    }
}

impl UserStore for MemoryStore {
    fn load(&self, id: &UserId) -> Result<Option<UserSnapshot>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        records
            .get(id)
            .map(|bytes| bincode::deserialize(bytes).map_err(StoreError::Decode))
            .transpose()
    }

    fn save(&self, user: &UserSnapshot) -> Result<(), StoreError> {
        let bytes = bincode::serialize(user).map_err(StoreError::Encode)?;
        trace!("Saving user {} ({} bytes)", user.id, bytes.len());

        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        records.insert(user.id, bytes);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::skills::{Skill, SkillKind};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn user(byte: u8) -> UserSnapshot {
        let now = Utc.with_ymd_and_hms(2024, 6, 6, 6, 6, 6).unwrap();
        UserSnapshot::new(UserId::new([byte; 16]), format!("user-{}", byte), &GameConfig::default(), now)
    }

    #[test]
    fn test_save_and_load() {
        let store = MemoryStore::new();
        let mut alice = user(1);
        alice.skills.insert(SkillKind::Defense, Skill::new(42));
        alice.money = 7;

        store.save(&alice).unwrap();

        assert_eq!(store.load(&alice.id).unwrap(), Some(alice));
        assert_eq!(store.load(&UserId::new([2; 16])).unwrap(), None);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_save_overwrites() {
        let mut bob = user(3);
        let store = MemoryStore::with_users([bob.clone()]).unwrap();

        bob.money = 999;
        store.save(&bob).unwrap();

        assert_eq!(store.load(&bob.id).unwrap().unwrap().money, 999);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_remove() {
        let carol = user(4);
        let store = MemoryStore::with_users([carol.clone()]).unwrap();

        assert!(store.remove(&carol.id).unwrap());
        assert!(!store.remove(&carol.id).unwrap());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_corrupt_record_fails_to_decode() {
        let store = MemoryStore::new();
        let id = UserId::new([5; 16]);
        store.records.write().unwrap().insert(id, vec![1, 2, 3]);

        assert!(matches!(store.load(&id), Err(StoreError::Decode(_))));
    }

    #[test]
    fn test_shared_across_threads() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..4u8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.save(&user(10 + i)).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len().unwrap(), 4);
    }
}
