use dioxus::prelude::*;
use shared_types::navigation::format_started_date;
use shared_types::MentorOverview;
use shared_ui::{
    AvatarPlaceholder, Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle,
    LoadingMessage, StatCard, StatGrid,
};

#[component]
pub fn MentorDashboard() -> Element {
    let overview = use_resource(move || async move {
        server::api::get_mentor_overview().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "mentor overview unavailable");
            MentorOverview::default()
        })
    });

    let Some(overview) = overview.read().as_ref().cloned() else {
        return rsx! { LoadingMessage { "Loading..." } };
    };

    rsx! {
        div { class: "dashboard-variant",
            StatGrid { columns: 3,
                StatCard { label: "Active Mentees", value: overview.active_mentees().to_string() }
                StatCard { label: "Upcoming Sessions", value: overview.upcoming_sessions.to_string() }
                StatCard { label: "Average Rating", value: format!("{:.1}", overview.average_rating) }
            }

            Card {
                CardHeader {
                    CardTitle { "My Mentees" }
                }
                CardContent {
                    if overview.matches.is_empty() {
                        p { class: "empty-state", "No mentees assigned yet." }
                    } else {
                        ul { class: "mentee-list",
                            for m in overview.matches.iter() {
                                li { key: "{m.id}", class: "mentee-row",
                                    div { class: "mentee-row-info",
                                        AvatarPlaceholder {}
                                        div {
                                            p { class: "mentee-name", "{m.mentee_name()}" }
                                            if !m.created_at.is_empty() {
                                                p { class: "mentee-started",
                                                    "Started {format_started_date(&m.created_at)}"
                                                }
                                            }
                                        }
                                    }
                                    Button { variant: ButtonVariant::Outline, "View Details" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
