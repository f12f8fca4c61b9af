//! Dashboard role routing and the read-only aggregates each variant shows.

use crate::models::{MentorshipMatch, UserRole};
use serde::{Deserialize, Serialize};

/// Outcome of looking up the caller's role on the server.
///
/// `Missing` and `Failed` render identically but are kept apart so the
/// server can log which one happened.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "outcome", content = "role", rename_all = "snake_case")]
pub enum RoleLookup {
    Unauthenticated,
    Found(UserRole),
    Missing,
    Failed,
}

impl RoleLookup {
    pub fn role(&self) -> Option<UserRole> {
        match self {
            RoleLookup::Found(role) => Some(*role),
            _ => None,
        }
    }
}

/// Client-side role resolution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleState {
    #[default]
    Unresolved,
    Loading,
    Resolved(UserRole),
    Absent,
}

impl RoleState {
    /// Start resolving. Without a user nothing is fetched and the state
    /// settles straight to `Absent`.
    pub fn begin(has_user: bool) -> Self {
        if has_user {
            RoleState::Loading
        } else {
            RoleState::Absent
        }
    }

    pub fn settle(lookup: RoleLookup) -> Self {
        match lookup {
            RoleLookup::Found(role) => RoleState::Resolved(role),
            RoleLookup::Unauthenticated | RoleLookup::Missing | RoleLookup::Failed => {
                RoleState::Absent
            }
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, RoleState::Resolved(_) | RoleState::Absent)
    }
}

/// What the dashboard page renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardView {
    SignInPrompt,
    Loading,
    Variant(UserRole),
    NoRole,
}

impl DashboardView {
    pub fn select(has_user: bool, state: &RoleState) -> Self {
        if !has_user {
            return DashboardView::SignInPrompt;
        }
        match state {
            RoleState::Unresolved | RoleState::Loading => DashboardView::Loading,
            RoleState::Resolved(role) => DashboardView::Variant(*role),
            RoleState::Absent => DashboardView::NoRole,
        }
    }
}

/// Platform-wide counters for the superadmin view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DashboardStats {
    pub total_users: u64,
    pub active_users: u64,
    pub total_sessions: u64,
    pub completion_rate: f64,
    pub revenue: f64,
}

/// Module completion for the mentee view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MenteeProgress {
    pub completed_modules: u64,
    pub total_modules: u64,
}

impl MenteeProgress {
    /// Percentage of modules completed, in `0.0..=100.0`.
    pub fn completion_percent(&self) -> f64 {
        if self.total_modules == 0 {
            return 0.0;
        }
        let pct = self.completed_modules as f64 / self.total_modules as f64 * 100.0;
        pct.clamp(0.0, 100.0)
    }
}

pub const PLACEHOLDER_AVERAGE_RATING: f64 = 4.8;

/// Mentor view data: matches plus two placeholder figures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MentorOverview {
    pub matches: Vec<MentorshipMatch>,
    pub upcoming_sessions: u32,
    pub average_rating: f64,
}

impl MentorOverview {
    pub fn new(matches: Vec<MentorshipMatch>) -> Self {
        Self {
            matches,
            upcoming_sessions: 0,
            average_rating: PLACEHOLDER_AVERAGE_RATING,
        }
    }

    pub fn active_mentees(&self) -> usize {
        self.matches.len()
    }
}

impl Default for MentorOverview {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
