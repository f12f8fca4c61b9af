use axum::{extract::State, Json};
use shared_types::{AppError, Curriculum, Profile};

use crate::auth::extractors::{MaybeSession, SessionRequired};
use crate::backend::AnyBackend;
use crate::profile;

/// The caller's profile.
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "Profile", body = Profile),
        (status = 401, description = "No session", body = AppError),
        (status = 404, description = "No profile row", body = AppError)
    ),
    tag = "profile"
)]
pub async fn my_profile(
    State(backend): State<AnyBackend>,
    session: SessionRequired,
) -> Result<Json<Profile>, AppError> {
    let backend = backend.with_access_token(&session.token);
    profile::load_profile(&backend, &session.user)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found("Profile not found"))
}

/// Active learning paths.
#[utoipa::path(
    get,
    path = "/api/v1/curriculums",
    responses(
        (status = 200, description = "Active curriculums", body = Vec<Curriculum>)
    ),
    tag = "curriculum"
)]
pub async fn active_curriculums(
    State(backend): State<AnyBackend>,
    MaybeSession(session): MaybeSession,
) -> Json<Vec<Curriculum>> {
    let backend = match session {
        Some(s) => backend.with_access_token(&s.token),
        None => backend,
    };
    Json(profile::load_active_curriculums(&backend).await)
}
