use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use shared_types::{AppError, SessionUser};

use super::{cookies, SessionToken};
use crate::backend::AnyBackend;
use crate::error_convert::BackendErrorExt;

fn request_token(parts: &Parts) -> Option<String> {
    parts
        .extensions
        .get::<SessionToken>()
        .map(|t| t.0.clone())
        .or_else(|| cookies::extract_access_token(&parts.headers))
}

/// Extractor that requires a live session. Returns 401 without one.
pub struct SessionRequired {
    pub user: SessionUser,
    pub token: String,
}

impl<S> FromRequestParts<S> for SessionRequired
where
    AnyBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = request_token(parts)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))?;
        let backend = AnyBackend::from_ref(state);
        let user = super::current_session_user(&backend, Some(&token))
            .await
            .map_err(BackendErrorExt::into_app_error)?
            .ok_or_else(|| AppError::unauthorized("Session expired"))?;
        Ok(SessionRequired { user, token })
    }
}

/// Extractor for an optional session. Never fails; backend errors read as signed out.
pub struct MaybeSession(pub Option<SessionRequired>);

impl<S> FromRequestParts<S> for MaybeSession
where
    AnyBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if request_token(parts).is_none() {
            return Ok(MaybeSession(None));
        }
        match SessionRequired::from_request_parts(parts, state).await {
            Ok(session) => Ok(MaybeSession(Some(session))),
            Err(e) => {
                tracing::warn!(error = %e, "session lookup failed; treating as anonymous");
                Ok(MaybeSession(None))
            }
        }
    }
}
