mod mentee;
mod mentor;
mod superadmin;

use dioxus::prelude::*;
use shared_types::{DashboardView, RoleLookup, RoleState, UserRole};
use shared_ui::{LoadingMessage, PageHeader, PageTitle};

use crate::auth::use_auth;
use mentee::MenteeDashboard;
use mentor::MentorDashboard;
use superadmin::SuperadminDashboard;

/// Role-aware dashboard.
///
/// The role is re-resolved whenever the signed-in user changes. A lookup
/// that errors settles the same way as a missing role.
#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let has_user = auth.is_authenticated();

    let lookup = use_resource(move || async move {
        let user_id = auth.current_user.read().as_ref().map(|u| u.id.clone());
        if user_id.is_none() {
            return RoleLookup::Unauthenticated;
        }
        match server::api::resolve_dashboard_role().await {
            Ok(lookup) => lookup,
            Err(e) => {
                tracing::warn!(error = %e, "role lookup failed");
                RoleLookup::Failed
            }
        }
    });

    let state = match lookup.read().as_ref() {
        Some(result) => RoleState::settle(*result),
        None => RoleState::begin(has_user),
    };

    let body = match DashboardView::select(has_user, &state) {
        DashboardView::SignInPrompt => {
            return rsx! {
                div { class: "dashboard-welcome",
                    h1 { "Welcome to Mining Mentors" }
                    p { "Please sign in to access your dashboard." }
                }
            };
        }
        DashboardView::Loading => rsx! { LoadingMessage { "Loading..." } },
        DashboardView::Variant(UserRole::Superadmin) => rsx! { SuperadminDashboard {} },
        DashboardView::Variant(UserRole::Mentor) => rsx! { MentorDashboard {} },
        DashboardView::Variant(UserRole::Mentee) => rsx! { MenteeDashboard {} },
        DashboardView::NoRole => rsx! {
            p { class: "dashboard-no-role",
                "Role not assigned. Please contact an administrator."
            }
        },
    };

    rsx! {
        div { class: "dashboard",
            PageHeader {
                PageTitle { "Dashboard" }
            }
            {body}
        }
    }
}
