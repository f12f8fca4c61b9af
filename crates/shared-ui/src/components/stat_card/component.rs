use dioxus::prelude::*;

/// A labelled headline figure.
#[component]
pub fn StatCard(
    label: String,
    value: String,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "stat-card", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            ..merged,
            h3 { class: "stat-card-label", "{label}" }
            p { class: "stat-card-value", "{value}" }
        }
    }
}

/// Responsive grid for a row of stat cards.
#[component]
pub fn StatGrid(#[props(default = 3)] columns: u8, children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "stat-grid", "data-columns": "{columns}",
            {children}
        }
    }
}
