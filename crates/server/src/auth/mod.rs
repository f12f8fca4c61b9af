pub mod cookies;
pub mod extractors;
pub mod middleware;

use shared_types::{SessionUser, SignOutOutcome};

use crate::backend::{AnyBackend, Backend, BackendError};

/// Access token carried by the current request, inserted by
/// [`middleware::session_middleware`].
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// The caller's access token inside a server function.
///
/// Reads the middleware-injected `SessionToken` first and falls back to the
/// raw cookie or Bearer header.
pub fn session_token() -> Option<String> {
    let ctx = dioxus::fullstack::FullstackContext::current()?;
    let parts = ctx.parts_mut();
    if let Some(token) = parts.extensions.get::<SessionToken>() {
        return Some(token.0.clone());
    }
    cookies::extract_access_token(&parts.headers)
}

/// Resolve an optional token to its user. No token means no backend call.
pub async fn current_session_user(
    backend: &AnyBackend,
    token: Option<&str>,
) -> Result<Option<SessionUser>, BackendError> {
    match token {
        Some(token) => backend.current_user(token).await,
        None => Ok(None),
    }
}

/// Revoke the token remotely. Failures are logged, never returned: the
/// caller clears local state either way.
pub async fn revoke_session(backend: &AnyBackend, token: Option<&str>) -> SignOutOutcome {
    let Some(token) = token else {
        return SignOutOutcome {
            remote_revoked: false,
        };
    };
    let remote_revoked = match backend.sign_out(token).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "remote sign-out failed; clearing local session anyway");
            false
        }
    };
    SignOutOutcome { remote_revoked }
}
