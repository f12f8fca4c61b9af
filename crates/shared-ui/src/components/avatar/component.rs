use dioxus::prelude::*;

/// Round badge standing in for a profile photo, with an optional initial.
#[component]
pub fn AvatarPlaceholder(#[props(default)] initial: Option<String>) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "avatar-placeholder", aria_hidden: "true",
            if let Some(initial) = initial {
                span { "{initial}" }
            }
        }
    }
}
