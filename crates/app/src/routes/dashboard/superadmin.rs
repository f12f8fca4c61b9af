use dioxus::prelude::*;
use shared_types::DashboardStats;
use shared_ui::{
    Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle, LoadingMessage, StatCard,
    StatGrid,
};

#[component]
pub fn SuperadminDashboard() -> Element {
    let stats = use_resource(move || async move {
        server::api::get_dashboard_stats().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "dashboard stats unavailable");
            DashboardStats::default()
        })
    });

    let Some(stats) = stats.read().as_ref().cloned() else {
        return rsx! { LoadingMessage { "Loading..." } };
    };

    rsx! {
        div { class: "dashboard-variant",
            StatGrid { columns: 4,
                StatCard { label: "Total Users", value: stats.total_users.to_string() }
                StatCard { label: "Active Users", value: stats.active_users.to_string() }
                StatCard { label: "Total Sessions", value: stats.total_sessions.to_string() }
                StatCard { label: "Revenue", value: format!("${}", stats.revenue) }
            }

            div { class: "dashboard-grid dashboard-grid-2",
                Card {
                    CardHeader {
                        CardTitle { "User Management" }
                    }
                    CardContent {
                        div { class: "button-stack",
                            Button { variant: ButtonVariant::Primary, "Manage Users" }
                            Button { variant: ButtonVariant::Outline, "Role Assignments" }
                        }
                    }
                }

                Card {
                    CardHeader {
                        CardTitle { "System Configuration" }
                    }
                    CardContent {
                        div { class: "button-stack",
                            Button { variant: ButtonVariant::Primary, "Platform Settings" }
                            Button { variant: ButtonVariant::Outline, "API Integrations" }
                        }
                    }
                }
            }
        }
    }
}
