use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdSearch;
use dioxus_free_icons::Icon;

use crate::auth::use_auth;
use crate::routes::dashboard::Dashboard;

const CATEGORIES: [&str; 6] = [
    "Mining Engineers",
    "Mine Planning",
    "Geologists",
    "Processing Engineers",
    "Safety Officers",
    "Environmental",
];

/// Home page: the dashboard when signed in, the marketing hero otherwise.
#[component]
pub fn Landing() -> Element {
    let auth = use_auth();

    if auth.is_authenticated() {
        return rsx! { Dashboard {} };
    }

    rsx! {
        section { class: "hero",
            div { class: "hero-inner",
                h1 { class: "hero-title",
                    "Learn a new skill, launch a project,"
                    br {}
                    "land your dream career."
                }
                p { class: "hero-subtitle", "1-on-1 Mining Industry Mentorship" }

                form {
                    class: "hero-search",
                    role: "search",
                    onsubmit: move |evt: FormEvent| evt.prevent_default(),
                    div { class: "hero-search-field",
                        Icon::<LdSearch> { icon: LdSearch, width: 20, height: 20 }
                        input {
                            r#type: "search",
                            name: "q",
                            class: "hero-search-input",
                            aria_label: "Search mentors",
                            placeholder: "Search by company, skills or role",
                        }
                    }
                    button { r#type: "submit", class: "button-primary", "Find mentors" }
                }

                ul { class: "category-chips",
                    for category in CATEGORIES {
                        li { key: "{category}",
                            button { r#type: "button", class: "category-chip", "{category}" }
                        }
                    }
                }
            }
        }
    }
}
