use crate::domain::User;
use crate::persistence::{load_or_default, save_snapshot, StateStore, AUTH_KEY};
use crate::providers::Authenticator;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Auth container state. Only `user` and `is_authenticated` are persisted;
/// `loading` and `error` are transient per-session flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    #[serde(skip)]
    pub loading: bool,
    #[serde(skip)]
    pub error: Option<String>,
}

/// Holds the current session and drives login/logout against an external
/// authenticator. Login failures land in the `error` field rather than
/// propagating past the container.
pub struct AuthStore {
    state: AuthState,
    store: Arc<dyn StateStore>,
    authenticator: Arc<dyn Authenticator>,
}

impl AuthStore {
    /// Rehydrate the container from the persisted snapshot, falling back to
    /// the anonymous state when none exists.
    pub fn load(store: Arc<dyn StateStore>, authenticator: Arc<dyn Authenticator>) -> Self {
        let state = load_or_default(store.as_ref(), AUTH_KEY);
        Self {
            state,
            store,
            authenticator,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// Attempt a login. One attempt, no retry; a prior failure is cleared
    /// when the attempt starts. On success the session is persisted so a
    /// fresh load restores it.
    pub async fn login(&mut self, email: &str, password: &str) {
        self.state.loading = true;
        self.state.error = None;

        match self.authenticator.authenticate(email, password).await {
            Ok(user) => {
                debug!(email, "login succeeded");
                self.state.loading = false;
                self.state.user = Some(user);
                self.state.is_authenticated = true;
                save_snapshot(self.store.as_ref(), AUTH_KEY, &self.state);
            }
            Err(e) => {
                debug!(email, "login failed");
                self.state.loading = false;
                self.state.user = None;
                self.state.is_authenticated = false;
                self.state.error = Some(e.to_string());
            }
        }
    }

    /// Drop the session and delete the persisted auth blob, so a fresh load
    /// comes up anonymous.
    pub fn logout(&mut self) {
        self.state.user = None;
        self.state.is_authenticated = false;
        self.state.error = None;
        self.store.remove(AUTH_KEY);
    }
}
