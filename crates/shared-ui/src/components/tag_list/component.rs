use dioxus::prelude::*;

/// Pill-shaped tags, e.g. a profile's or curriculum's industry focus.
#[component]
pub fn TagList(
    tags: Vec<String>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "tag-list", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            ..merged,
            for tag in tags {
                span { key: "{tag}", class: "tag", "{tag}" }
            }
        }
    }
}
