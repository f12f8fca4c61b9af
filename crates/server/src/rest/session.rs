use axum::Json;
use shared_types::SessionUser;

use crate::auth::extractors::MaybeSession;

/// The signed-in user, or `null`.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Current user, null when signed out", body = Option<SessionUser>)
    ),
    tag = "session"
)]
pub async fn current_session(MaybeSession(session): MaybeSession) -> Json<Option<SessionUser>> {
    Json(session.map(|s| s.user))
}
