use dioxus::prelude::*;
use shared_types::Profile as ProfileRow;
use shared_ui::{
    Card, CardContent, FieldKind, LoadingMessage, PageDescription, PageHeader, PageTitle,
    ReadOnlyField, TagList,
};

use crate::auth::use_auth;

/// Read-only view of the signed-in user's profile. A missing row renders
/// with empty fields.
#[component]
pub fn Profile() -> Element {
    let auth = use_auth();

    let profile = use_resource(move || async move {
        if auth.current_user.read().is_none() {
            return None;
        }
        match server::api::get_profile().await {
            Ok(profile) => Some(profile.unwrap_or_default()),
            Err(e) => {
                tracing::warn!(error = %e, "profile unavailable");
                Some(ProfileRow::default())
            }
        }
    });

    if !auth.is_authenticated() {
        return rsx! {
            div { class: "page-message",
                p { "Please sign in to view your profile." }
            }
        };
    }

    let Some(Some(profile)) = profile.read().as_ref().cloned() else {
        return rsx! { LoadingMessage { "Loading profile..." } };
    };

    rsx! {
        div { class: "profile-page",
            PageHeader {
                PageTitle { "Profile" }
                PageDescription {
                    "This information will be displayed publicly so be careful what you share."
                }
            }

            Card {
                CardContent {
                    form { class: "profile-form", onsubmit: move |evt: FormEvent| evt.prevent_default(),
                        ReadOnlyField {
                            label: "Full Name",
                            name: "full_name",
                            value: profile.full_name_or_empty().to_string(),
                        }
                        ReadOnlyField {
                            label: "Bio",
                            name: "bio",
                            value: profile.bio_or_empty().to_string(),
                            kind: FieldKind::TextArea(3),
                        }
                        div { class: "profile-form-row",
                            ReadOnlyField {
                                label: "Company",
                                name: "company",
                                value: profile.company_or_empty().to_string(),
                            }
                            ReadOnlyField {
                                label: "Position",
                                name: "position",
                                value: profile.position_or_empty().to_string(),
                            }
                        }
                        ReadOnlyField {
                            label: "Years of Experience",
                            name: "years_experience",
                            value: profile.years_experience_or_zero().to_string(),
                            kind: FieldKind::Number,
                        }
                        div { class: "profile-focus",
                            span { class: "read-only-field-label", "Industry Focus" }
                            TagList { tags: profile.industry_focus.clone() }
                        }
                    }
                }
            }
        }
    }
}
