//! Profile and curriculum reads.

use shared_types::{Curriculum, Profile, SessionUser};

use crate::backend::{Backend, BackendError, Query, Table};

/// The caller's profile row, or `None` when it is missing or unreadable.
#[tracing::instrument(skip_all, fields(user_id = %user.id))]
pub async fn load_profile(backend: &impl Backend, user: &SessionUser) -> Option<Profile> {
    let query = Query::table(Table::Profiles).eq("id", &user.id).single();
    match backend.select(&query).await.and_then(|r| r.decode_first::<Profile>()) {
        Ok(profile) => profile,
        Err(BackendError::NoRows) => {
            tracing::info!("no profile row for user");
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load profile");
            None
        }
    }
}

/// Curriculums flagged active, in backend order.
#[tracing::instrument(skip_all)]
pub async fn load_active_curriculums(backend: &impl Backend) -> Vec<Curriculum> {
    let query = Query::table(Table::Curriculums).eq("is_active", true);
    match backend.select(&query).await.and_then(|r| r.decode()) {
        Ok(curriculums) => curriculums,
        Err(e) => {
            tracing::error!(error = %e, "failed to load curriculums");
            Vec::new()
        }
    }
}
