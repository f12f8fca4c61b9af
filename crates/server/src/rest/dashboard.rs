use axum::{extract::State, Json};
use shared_types::{AppError, DashboardStats, MenteeProgress, MentorOverview, RoleLookup};

use crate::auth::extractors::{MaybeSession, SessionRequired};
use crate::backend::AnyBackend;
use crate::dashboard;

// ---------------------------------------------------------------------------
// GET /api/v1/dashboard/role
// ---------------------------------------------------------------------------

/// Resolve which dashboard the caller sees.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/role",
    responses(
        (status = 200, description = "Role lookup outcome", body = RoleLookup)
    ),
    tag = "dashboard"
)]
pub async fn dashboard_role(
    State(backend): State<AnyBackend>,
    MaybeSession(session): MaybeSession,
) -> Json<RoleLookup> {
    let lookup = match session {
        Some(s) => dashboard::resolve_role(&backend.with_access_token(&s.token), Some(&s.user)).await,
        None => dashboard::resolve_role(&backend, None).await,
    };
    Json(lookup)
}

// ---------------------------------------------------------------------------
// GET /api/v1/dashboard/mentee
// ---------------------------------------------------------------------------

/// Module completion for the caller.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/mentee",
    responses(
        (status = 200, description = "Mentee progress", body = MenteeProgress),
        (status = 401, description = "No session", body = AppError)
    ),
    tag = "dashboard"
)]
pub async fn mentee_progress(
    State(backend): State<AnyBackend>,
    session: SessionRequired,
) -> Result<Json<MenteeProgress>, AppError> {
    let backend = backend.with_access_token(&session.token);
    Ok(Json(dashboard::load_mentee_progress(&backend, &session.user).await))
}

// ---------------------------------------------------------------------------
// GET /api/v1/dashboard/mentor
// ---------------------------------------------------------------------------

/// The caller's mentees.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/mentor",
    responses(
        (status = 200, description = "Mentor overview", body = MentorOverview),
        (status = 401, description = "No session", body = AppError)
    ),
    tag = "dashboard"
)]
pub async fn mentor_overview(
    State(backend): State<AnyBackend>,
    session: SessionRequired,
) -> Result<Json<MentorOverview>, AppError> {
    let backend = backend.with_access_token(&session.token);
    Ok(Json(dashboard::load_mentor_overview(&backend, &session.user).await))
}

// ---------------------------------------------------------------------------
// GET /api/v1/dashboard/stats
// ---------------------------------------------------------------------------

/// Platform totals for the superadmin view.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    responses(
        (status = 200, description = "Dashboard totals", body = DashboardStats),
        (status = 401, description = "No session", body = AppError)
    ),
    tag = "dashboard"
)]
pub async fn dashboard_stats(
    State(backend): State<AnyBackend>,
    session: SessionRequired,
) -> Result<Json<DashboardStats>, AppError> {
    let backend = backend.with_access_token(&session.token);
    Ok(Json(dashboard::load_dashboard_stats(&backend).await))
}
