//! Read-only loaders behind the three dashboard variants.
//!
//! Every loader logs a failed read and falls back to an empty value; the
//! client never sees a distinct error state for these views.

use serde_json::Value;
use shared_types::{
    DashboardStats, MenteeProgress, MentorOverview, MentorshipMatch, RoleLookup, SessionUser,
    UserProgress, UserRole,
};

use crate::backend::{Backend, BackendError, Query, Table};

pub const MATCH_WITH_MENTEE: &str = "*,mentee:mentee_id(id,full_name,avatar_url)";

/// Look up the caller's role in `profiles`. No user means no query.
#[tracing::instrument(skip_all, fields(user_id = user.map(|u| u.id.as_str())))]
pub async fn resolve_role(backend: &impl Backend, user: Option<&SessionUser>) -> RoleLookup {
    let Some(user) = user else {
        return RoleLookup::Unauthenticated;
    };

    let query = Query::table(Table::Profiles)
        .select("role")
        .eq("id", &user.id)
        .single();

    match backend.select(&query).await {
        Ok(rows) => {
            let role = rows
                .rows
                .first()
                .and_then(|row| row.get("role"))
                .and_then(Value::as_str)
                .and_then(UserRole::parse);
            match role {
                Some(role) => RoleLookup::Found(role),
                None => {
                    tracing::info!("profile has no recognised role");
                    RoleLookup::Missing
                }
            }
        }
        Err(BackendError::NoRows) => {
            tracing::info!("no profile row for user");
            RoleLookup::Missing
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to resolve dashboard role");
            RoleLookup::Failed
        }
    }
}

/// Completed modules for the caller against the total module count.
#[tracing::instrument(skip_all, fields(user_id = %user.id))]
pub async fn load_mentee_progress(backend: &impl Backend, user: &SessionUser) -> MenteeProgress {
    let progress_query = Query::table(Table::UserProgress).eq("user_id", &user.id);
    let completed_modules = match backend.select(&progress_query).await {
        Ok(rows) => rows
            .decode_lossy::<UserProgress>()
            .iter()
            .filter(|p| p.is_completed())
            .count() as u64,
        Err(e) => {
            tracing::error!(error = %e, "failed to load user progress");
            0
        }
    };

    let modules_query = Query::table(Table::Modules).select("id").count_exact();
    let total_modules = match backend.select(&modules_query).await {
        Ok(rows) => rows.len_or_total(),
        Err(e) => {
            tracing::error!(error = %e, "failed to count modules");
            0
        }
    };

    MenteeProgress {
        completed_modules,
        total_modules,
    }
}

/// The caller's matches as a mentor, each with the mentee embedded.
#[tracing::instrument(skip_all, fields(user_id = %user.id))]
pub async fn load_mentor_overview(backend: &impl Backend, user: &SessionUser) -> MentorOverview {
    let query = Query::table(Table::MentorshipMatches)
        .select(MATCH_WITH_MENTEE)
        .eq("mentor_id", &user.id);

    let matches = match backend.select(&query).await {
        Ok(rows) => rows.decode_lossy::<MentorshipMatch>(),
        Err(e) => {
            tracing::error!(error = %e, "failed to load mentorship matches");
            Vec::new()
        }
    };
    MentorOverview::new(matches)
}

async fn count(backend: &impl Backend, table: Table) -> u64 {
    let query = Query::table(table).select("id").count_exact();
    match backend.select(&query).await {
        Ok(rows) => rows.len_or_total(),
        Err(e) => {
            tracing::error!(table = table.as_str(), error = %e, "failed to count rows");
            0
        }
    }
}

/// Platform-wide totals. Only user and session counts are real.
#[tracing::instrument(skip_all)]
pub async fn load_dashboard_stats(backend: &impl Backend) -> DashboardStats {
    DashboardStats {
        total_users: count(backend, Table::Profiles).await,
        active_users: 0,
        total_sessions: count(backend, Table::MentorshipMatches).await,
        completion_rate: 0.0,
        revenue: 0.0,
    }
}
