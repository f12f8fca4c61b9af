use dioxus::prelude::*;
use shared_types::{SessionSignal, SessionUser};

/// Global authentication state, provided once at the app root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub current_user: Signal<Option<SessionUser>>,
    /// Set once the first session lookup has finished.
    pub loaded: Signal<bool>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            current_user: Signal::new(None),
            loaded: Signal::new(false),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.read().is_some()
    }

    pub fn set_user(&mut self, user: SessionUser) {
        self.current_user.set(Some(user));
        self.loaded.set(true);
    }

    pub fn clear_auth(&mut self) {
        self.current_user.set(None);
        self.loaded.set(true);
    }

    /// Current value as the plain session state used by the nav rules.
    pub fn snapshot(&self) -> SessionSignal {
        match self.current_user.read().clone() {
            Some(user) => SessionSignal::signed_in(user),
            None => SessionSignal::default(),
        }
    }

    /// Ask the server to end the session, then clear local state whatever it said.
    pub async fn sign_out(mut self) {
        match server::api::logout().await {
            Ok(outcome) if !outcome.remote_revoked => {
                tracing::warn!("session not revoked remotely; cleared locally");
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "sign-out request failed; cleared locally"),
        }
        self.clear_auth();
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}
