//! Application wiring: one API client, one session store, and the two
//! state stores, constructed together at process start.

use anyhow::Result;
use tracing::warn;

use crate::api::{ApiClient, ApiConfig};
use crate::storage::FileSessionStore;
use crate::stores::{AuthStore, ChildStore};

/// Everything a front end needs, built once and passed down explicitly.
pub struct App {
    pub api: ApiClient,
    pub auth: AuthStore<FileSessionStore>,
    pub children: ChildStore,
}

impl App {
    /// Wire up the stores against the given backend settings, with the
    /// session persisted at the default location.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let api = ApiClient::new(config)?;
        let storage = FileSessionStore::default_location()?;
        Ok(Self::with_parts(api, storage))
    }

    /// Wiring with explicit parts, used by tests and custom shells.
    pub fn with_parts(api: ApiClient, storage: FileSessionStore) -> Self {
        Self {
            auth: AuthStore::new(api.clone(), storage),
            children: ChildStore::new(api.clone()),
            api,
        }
    }

    /// Startup sequence: restore a persisted session and, when one
    /// exists, load the child list. Returns whether a session was
    /// restored. A failed refresh downgrades to an empty local list
    /// rather than failing startup.
    pub async fn bootstrap(&mut self) -> bool {
        if !self.auth.check_auth() {
            return false;
        }
        let token = self.auth.token().map(str::to_string);
        if let Some(token) = token {
            if let Err(err) = self.children.refresh(&token).await {
                warn!(%err, "could not load children on startup");
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_starts_unauthenticated_with_empty_collection() {
        let api = ApiClient::with_base_url("http://localhost:8080").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStore::new(dir.path().join("session.json"));
        let app = App::with_parts(api, storage);
        assert!(!app.auth.is_authenticated());
        assert!(app.children.is_empty());
    }
}
