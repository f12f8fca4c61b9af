use dioxus::prelude::*;

/// Horizontal completion bar. `percent` is clamped to `0..=100` and a
/// non-finite value draws an empty bar.
#[component]
pub fn ProgressBar(
    percent: f64,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let pct = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let base = vec![Attribute::new("class", "progress-bar", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            role: "progressbar",
            aria_valuemin: "0",
            aria_valuemax: "100",
            aria_valuenow: "{pct:.0}",
            ..merged,
            div { class: "progress-bar-fill", style: "width: {pct}%;" }
        }
    }
}
