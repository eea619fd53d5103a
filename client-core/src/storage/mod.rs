//! Session persistence.
//!
//! The token and user are one record: they are written, loaded, and
//! cleared together, so a crash can never leave a token without its
//! user or vice versa.

mod file;

use serde::{Deserialize, Serialize};
use shared::User;

use crate::errors::StorageError;

pub use file::FileSessionStore;

/// The persisted session: bearer token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
    /// RFC 3339 timestamp of when the session was saved
    pub saved_at: String,
}

/// Storage abstraction for the session record, so the auth store can
/// run against the real file store or an in-memory one in tests.
pub trait SessionStore {
    /// Read the persisted session, if any.
    fn load(&self) -> Result<Option<Session>, StorageError>;

    /// Persist the session, replacing any previous record atomically.
    fn save(&self, session: &Session) -> Result<(), StorageError>;

    /// Remove the persisted session. Removing an absent record is not
    /// an error.
    fn clear(&self) -> Result<(), StorageError>;
}

/// In-memory session store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: std::sync::Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemorySessionStore {
    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        // Poisoning cannot corrupt an Option; recover the inner value.
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, StorageError> {
        Ok(self.slot().clone())
    }

    fn save(&self, session: &Session) -> Result<(), StorageError> {
        *self.slot() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            token: "tok".to_string(),
            user: User {
                id: "1".to_string(),
                name: "Parent User".to_string(),
                email: "p@example.com".to_string(),
                telephone: "0771234567".to_string(),
            },
            saved_at: "2026-08-06T09:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemorySessionStore::new();
        assert!(store.load().unwrap().is_none());
        store.save(&session()).unwrap();
        assert_eq!(store.load().unwrap(), Some(session()));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = MemorySessionStore::new();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
