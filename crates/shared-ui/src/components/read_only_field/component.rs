use dioxus::prelude::*;

/// How a read-only field's value is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Number,
    /// Multi-line textarea with the given number of rows.
    TextArea(u32),
}

/// A labelled, non-editable form control.
#[component]
pub fn ReadOnlyField(
    label: String,
    name: String,
    value: String,
    #[props(default)] kind: FieldKind,
) -> Element {
    let id = format!("field-{name}");

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "read-only-field",
            label { class: "read-only-field-label", r#for: "{id}", "{label}" }
            div { class: "read-only-field-control",
                match kind {
                    FieldKind::TextArea(rows) => rsx! {
                        textarea {
                            id: "{id}",
                            name: "{name}",
                            rows: "{rows}",
                            readonly: true,
                            value: "{value}",
                        }
                    },
                    FieldKind::Number => rsx! {
                        input {
                            id: "{id}",
                            r#type: "number",
                            name: "{name}",
                            readonly: true,
                            value: "{value}",
                        }
                    },
                    FieldKind::Text => rsx! {
                        input {
                            id: "{id}",
                            r#type: "text",
                            name: "{name}",
                            readonly: true,
                            value: "{value}",
                        }
                    },
                }
            }
        }
    }
}
