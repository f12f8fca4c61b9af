use dioxus::prelude::*;

/// Centered status line shown while a view's fetch is in flight.
#[component]
pub fn LoadingMessage(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "loading-message", role: "status",
            p { {children} }
        }
    }
}
