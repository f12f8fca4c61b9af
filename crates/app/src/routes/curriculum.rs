use dioxus::prelude::*;
use shared_ui::{
    Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, LoadingMessage,
    PageHeader, PageTitle, TagList,
};

/// Active learning paths. Visible signed in or out.
#[component]
pub fn Curriculum() -> Element {
    let curriculums = use_resource(move || async move {
        server::api::list_curriculums().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "curriculums unavailable");
            Vec::new()
        })
    });

    let Some(curriculums) = curriculums.read().as_ref().cloned() else {
        return rsx! { LoadingMessage { "Loading curriculums..." } };
    };

    rsx! {
        div { class: "curriculum-page",
            PageHeader {
                PageTitle { "Learning Paths" }
            }

            div { class: "curriculum-grid",
                for curriculum in curriculums {
                    Card { key: "{curriculum.id}", class: "curriculum-card",
                        CardHeader {
                            h2 { class: "card-title", "{curriculum.title}" }
                            if let Some(description) = curriculum.description.as_ref() {
                                CardDescription { "{description}" }
                            }
                        }
                        CardContent {
                            TagList { tags: curriculum.industry_focus.clone() }
                            Button {
                                variant: ButtonVariant::Primary,
                                class: "curriculum-start",
                                "Start Learning"
                            }
                        }
                    }
                }
            }
        }
    }
}
