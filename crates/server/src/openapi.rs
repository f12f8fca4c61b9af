use axum::Router;
use shared_types::{
    AppError, AppErrorKind, Curriculum, DashboardStats, MenteeProgress, MenteeSummary,
    MentorOverview, MentorshipMatch, Profile, RoleLookup, SessionUser, UserRole,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::backend::AnyBackend;
use crate::health;
use crate::rest::{self, AppState};

#[derive(OpenApi)]
#[openapi(
    paths(
        rest::session::current_session,
        rest::dashboard::dashboard_role,
        rest::dashboard::mentee_progress,
        rest::dashboard::mentor_overview,
        rest::dashboard::dashboard_stats,
        rest::profile::my_profile,
        rest::profile::active_curriculums,
        health::health_check,
    ),
    components(schemas(
        AppError,
        AppErrorKind,
        SessionUser,
        UserRole,
        RoleLookup,
        MenteeProgress,
        MentorOverview,
        MentorshipMatch,
        MenteeSummary,
        DashboardStats,
        Profile,
        Curriculum,
        health::HealthResponse,
    )),
    tags(
        (name = "session", description = "Current session"),
        (name = "dashboard", description = "Role routing and dashboard aggregates"),
        (name = "profile", description = "Profile of the signed-in user"),
        (name = "curriculum", description = "Learning paths"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Mining Mentors API",
        description = "Read-only API behind the Mining Mentors dashboard",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// REST API at `/api/v1/*` and `/health`, plus docs at `/docs` when the
/// `api_docs` flag is on.
pub fn api_router(backend: AnyBackend) -> Router {
    let state = AppState { backend };

    let router = Router::new()
        .merge(rest::api_router())
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state);

    if crate::config::feature_flags().api_docs {
        router.merge(Scalar::with_url("/docs", ApiDoc::openapi()))
    } else {
        router
    }
}
