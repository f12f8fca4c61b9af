use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdMenu, LdX};
use dioxus_free_icons::Icon;

use crate::components::{
    AvatarPlaceholder, DropdownMenu, DropdownMenuContent, DropdownMenuItem, DropdownMenuTrigger,
};

/// Fixed top bar. `scrolled` adds the elevated style once the page has
/// moved off the top.
#[component]
pub fn SiteNav(
    scrolled: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let class = if scrolled {
        "site-nav navbar-scrolled"
    } else {
        "site-nav"
    };
    let base = vec![Attribute::new("class", class, None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        nav {
            ..merged,
            {children}
        }
    }
}

/// Hamburger button for the mobile disclosure panel.
#[component]
pub fn MobileMenuToggle(open: bool, ontoggle: EventHandler<MouseEvent>) -> Element {
    let label = if open { "Close main menu" } else { "Open main menu" };

    rsx! {
        button {
            class: "mobile-menu-toggle",
            r#type: "button",
            aria_expanded: "{open}",
            aria_controls: "mobile-menu",
            onclick: move |evt| ontoggle.call(evt),
            span { class: "sr-only", "{label}" }
            if open {
                Icon::<LdX> { icon: LdX, width: 24, height: 24 }
            } else {
                Icon::<LdMenu> { icon: LdMenu, width: 24, height: 24 }
            }
        }
    }
}

#[component]
pub fn MobileMenuPanel(open: bool, children: Element) -> Element {
    let state = if open { "open" } else { "closed" };

    rsx! {
        div {
            id: "mobile-menu",
            class: "mobile-menu-panel",
            "data-state": state,
            {children}
        }
    }
}

/// Session control on the right of the bar. Signed in, an avatar menu whose
/// only item is `label`; signed out, the caller's `sign_in` element.
#[component]
pub fn SessionMenu(
    signed_in: bool,
    #[props(into)] initial: String,
    #[props(into)] label: String,
    on_sign_out: EventHandler<()>,
    sign_in: Element,
) -> Element {
    if !signed_in {
        return sign_in;
    }

    rsx! {
        DropdownMenu {
            DropdownMenuTrigger {
                span { class: "sr-only", "Open user menu" }
                AvatarPlaceholder { initial: Some(initial) }
            }
            DropdownMenuContent {
                DropdownMenuItem::<String> {
                    value: "sign-out".to_string(),
                    index: 0usize,
                    on_select: move |_: String| on_sign_out.call(()),
                    "{label}"
                }
            }
        }
    }
}
