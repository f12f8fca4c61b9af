use dioxus::prelude::*;
use shared_types::{
    Curriculum, DashboardStats, FeatureFlags, MenteeProgress, MentorOverview, Profile,
    RoleLookup, SessionUser, SignOutOutcome,
};

#[cfg(feature = "server")]
use crate::backend::{AnyBackend, Backend};

#[cfg(feature = "server")]
use crate::error_convert::{login_failure, AppErrorExt, ValidateRequest};

/// Signed-in caller with a backend handle scoped to their token.
#[cfg(feature = "server")]
struct Caller {
    backend: AnyBackend,
    user: SessionUser,
}

/// Resolve the caller from the request's session token.
/// Signed out, rejected tokens and lookup failures all yield `None`.
#[cfg(feature = "server")]
async fn caller() -> Option<Caller> {
    let token = crate::auth::session_token()?;
    let backend = crate::backend::shared();
    match backend.current_user(&token).await {
        Ok(Some(user)) => Some(Caller {
            backend: backend.with_access_token(&token),
            user,
        }),
        Ok(None) => {
            tracing::debug!("session token rejected");
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "session lookup failed");
            None
        }
    }
}

/// Get the current feature flags. No auth required.
#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}

/// The signed-in user, or `None`.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_current_user() -> Result<Option<SessionUser>, ServerFnError> {
    Ok(caller().await.map(|c| c.user))
}

/// Password sign-in. Sets the session cookies on success.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn login(email: String, password: String) -> Result<SessionUser, ServerFnError> {
    use shared_types::LoginRequest;

    let req = LoginRequest {
        email: email.trim().to_string(),
        password,
    };
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let session = crate::backend::shared()
        .sign_in_with_password(&req.email, &req.password)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "sign-in rejected");
            login_failure(e).into_server_fn_error()
        })?;

    crate::auth::cookies::schedule_auth_cookies(
        &session.access_token,
        &session.refresh_token,
        session.expires_in,
    );
    tracing::info!(user_id = %session.user.id, "signed in");
    Ok(session.user)
}

/// Revoke the session remotely and always clear the local cookies.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn logout() -> Result<SignOutOutcome, ServerFnError> {
    let token = crate::auth::session_token();
    let outcome = crate::auth::revoke_session(crate::backend::shared(), token.as_deref()).await;
    crate::auth::cookies::schedule_clear_cookies();
    Ok(outcome)
}

/// The caller's dashboard role. Signed out returns `Unauthenticated` without a query.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn resolve_dashboard_role() -> Result<RoleLookup, ServerFnError> {
    use crate::dashboard::resolve_role;

    let lookup = match caller().await {
        Some(c) => resolve_role(&c.backend, Some(&c.user)).await,
        None => resolve_role(crate::backend::shared(), None).await,
    };
    Ok(lookup)
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_mentee_progress() -> Result<MenteeProgress, ServerFnError> {
    Ok(match caller().await {
        Some(c) => crate::dashboard::load_mentee_progress(&c.backend, &c.user).await,
        None => MenteeProgress::default(),
    })
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_mentor_overview() -> Result<MentorOverview, ServerFnError> {
    Ok(match caller().await {
        Some(c) => crate::dashboard::load_mentor_overview(&c.backend, &c.user).await,
        None => MentorOverview::default(),
    })
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_dashboard_stats() -> Result<DashboardStats, ServerFnError> {
    Ok(match caller().await {
        Some(c) => crate::dashboard::load_dashboard_stats(&c.backend).await,
        None => DashboardStats::default(),
    })
}

/// The caller's profile. `None` when signed out or when no row exists.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_profile() -> Result<Option<Profile>, ServerFnError> {
    Ok(match caller().await {
        Some(c) => crate::profile::load_profile(&c.backend, &c.user).await,
        None => None,
    })
}

/// Active learning paths. Readable signed out with the anon key.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_curriculums() -> Result<Vec<Curriculum>, ServerFnError> {
    let curriculums = match caller().await {
        Some(c) => crate::profile::load_active_curriculums(&c.backend).await,
        None => crate::profile::load_active_curriculums(crate::backend::shared()).await,
    };
    Ok(curriculums)
}
