pub mod dashboard;
pub mod profile;
pub mod session;

use axum::{extract::FromRef, routing::get, Router};

use crate::backend::AnyBackend;

/// Shared state for the REST handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub backend: AnyBackend,
}

impl FromRef<AppState> for AnyBackend {
    fn from_ref(state: &AppState) -> Self {
        state.backend.clone()
    }
}

/// Read-only JSON mirror of the server functions, for non-Dioxus clients.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/session", get(session::current_session))
        .route("/api/v1/dashboard/role", get(dashboard::dashboard_role))
        .route("/api/v1/dashboard/mentee", get(dashboard::mentee_progress))
        .route("/api/v1/dashboard/mentor", get(dashboard::mentor_overview))
        .route("/api/v1/dashboard/stats", get(dashboard::dashboard_stats))
        .route("/api/v1/profile", get(profile::my_profile))
        .route("/api/v1/curriculums", get(profile::active_curriculums))
}
