//! The auth session: login, registration, logout, and restoring a
//! persisted session on startup.

use chrono::Utc;
use tracing::{info, warn};

use shared::{AuthPayload, LoginRequest, RegisterForm, User, UserRole};

use crate::api::ApiClient;
use crate::errors::AuthError;
use crate::storage::{Session, SessionStore};

/// Session lifecycle: `unauthenticated` -> `authenticated` on a
/// successful login or registration, back on logout. Failures leave the
/// previous state untouched and are reported to the caller; there is no
/// retry or backoff.
pub struct AuthStore<S: SessionStore> {
    api: ApiClient,
    storage: S,
    session: Option<Session>,
}

impl<S: SessionStore> AuthStore<S> {
    pub fn new(api: ApiClient, storage: S) -> Self {
        Self {
            api,
            storage,
            session: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    /// Authenticate against the backend and persist the session.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let payload = self.api.login(&request).await?;
        self.establish(payload)
    }

    /// Validate the registration form client-side, register on the
    /// backend, and persist the resulting session.
    pub async fn register(&mut self, form: &RegisterForm, role: UserRole) -> Result<&User, AuthError> {
        let request = form.validate(role)?;
        let payload = self.api.register(&request).await?;
        self.establish(payload)
    }

    /// Clear the session. Storage failures are logged, never surfaced:
    /// logout always succeeds from the caller's point of view.
    pub fn logout(&mut self) {
        if let Err(err) = self.storage.clear() {
            warn!(%err, "failed to clear persisted session");
        }
        self.session = None;
        info!("logged out");
    }

    /// Restore a persisted session, if one exists. No network call is
    /// made; an expired token surfaces later as a normal API error.
    pub fn check_auth(&mut self) -> bool {
        match self.storage.load() {
            Ok(Some(session)) => {
                info!(user = %session.user.email, "restored persisted session");
                self.session = Some(session);
                true
            }
            Ok(None) => false,
            Err(err) => {
                warn!(%err, "failed to read persisted session");
                false
            }
        }
    }

    /// Persist first, then switch state: a failed save leaves the store
    /// unauthenticated.
    fn establish(&mut self, payload: AuthPayload) -> Result<&User, AuthError> {
        let session = Session {
            token: payload.token,
            user: payload.user,
            saved_at: Utc::now().to_rfc3339(),
        };
        self.storage.save(&session)?;
        info!(user = %session.user.email, "session established");
        let stored = self.session.insert(session);
        Ok(&stored.user)
    }
}
