use dioxus::prelude::*;
use shared_types::MenteeProgress;
use shared_ui::{
    Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle,
    LoadingMessage, ProgressBar,
};

const LEARNING_PATH: [&str; 3] = ["Module 1", "Module 2", "Module 3"];

#[component]
pub fn MenteeDashboard() -> Element {
    let progress = use_resource(move || async move {
        server::api::get_mentee_progress().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "mentee progress unavailable");
            MenteeProgress::default()
        })
    });

    let Some(progress) = progress.read().as_ref().copied() else {
        return rsx! { LoadingMessage { "Loading..." } };
    };
    let percent = progress.completion_percent();

    rsx! {
        div { class: "dashboard-variant",
            div { class: "dashboard-intro",
                h2 { "Welcome Back!" }
                p { "Track your progress and connect with your mentor." }
            }

            div { class: "dashboard-grid",
                Card {
                    CardHeader {
                        CardTitle { "Learning Progress" }
                    }
                    CardContent {
                        ProgressBar { percent }
                        p { class: "progress-caption",
                            "{progress.completed_modules} of {progress.total_modules} modules completed"
                        }
                    }
                }

                Card {
                    CardHeader {
                        CardTitle { "Next Session" }
                        CardDescription { "No upcoming sessions" }
                    }
                    CardContent {
                        Button { variant: ButtonVariant::Primary, "Schedule Session" }
                    }
                }

                Card {
                    CardHeader {
                        CardTitle { "Your Mentor" }
                    }
                    CardContent {
                        p { class: "mentor-status", "Not Assigned" }
                        p { class: "mentor-hint", "Find a mentor to get started" }
                    }
                }
            }

            Card { class: "learning-path",
                CardHeader {
                    CardTitle { "Your Learning Path" }
                }
                CardContent {
                    ul { class: "learning-path-list",
                        for module in LEARNING_PATH {
                            li { key: "{module}", class: "learning-path-item",
                                div {
                                    h4 { "{module}" }
                                    p { class: "learning-path-status", "Not started" }
                                }
                                Button { variant: ButtonVariant::Soft, "Start" }
                            }
                        }
                    }
                }
            }
        }
    }
}
