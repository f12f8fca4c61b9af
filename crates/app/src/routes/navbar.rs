use dioxus::prelude::*;
use shared_types::navigation::{active_link, avatar_initial, is_scrolled, NAV_LINKS};
use shared_types::session::session_affordance;
use shared_ui::{MobileMenuPanel, MobileMenuToggle, SessionMenu, SiteNav};

use crate::auth::use_auth;
use crate::routes::Route;

/// Reports `window.scrollY` on every scroll event, plus once on attach.
const SCROLL_BRIDGE_JS: &str = r#"(function() {
    var report = function() { dioxus.send(window.scrollY); };
    window.addEventListener('scroll', report, { passive: true });
    report();
})();"#;

/// Top navigation: brand, links, session affordance and the mobile panel.
#[component]
pub fn Navbar() -> Element {
    let auth = use_auth();
    let route: Route = use_route();
    let active_path = active_link(&route.to_string()).map(|link| link.path);

    let mut scrolled = use_signal(|| false);
    let mut menu_open = use_signal(|| false);

    use_effect(move || {
        spawn(async move {
            let mut eval = document::eval(SCROLL_BRIDGE_JS);
            while let Ok(y) = eval.recv::<f64>().await {
                let next = is_scrolled(y);
                if *scrolled.peek() != next {
                    scrolled.set(next);
                }
            }
        });
    });

    let session = auth.snapshot();
    let affordance = session_affordance(&session);
    let initial = avatar_initial(session.user().and_then(|u| u.email.as_deref()));

    let mut sign_out = move || {
        menu_open.set(false);
        spawn(async move {
            auth.sign_out().await;
            navigator().push(Route::Landing {});
        });
    };

    rsx! {
        SiteNav { scrolled: scrolled(),
            div { class: "site-nav-bar",
                div { class: "site-nav-left",
                    Link {
                        to: Route::Landing {},
                        class: "site-nav-brand",
                        aria_label: "Mining Mentors Home",
                        "Mining Mentors"
                    }
                    div { class: "site-nav-links",
                        for link in NAV_LINKS.iter() {
                            Link {
                                key: "{link.path}",
                                to: link.path,
                                class: if active_path == Some(link.path) { "nav-link-active" } else { "nav-link" },
                                aria_current: if active_path == Some(link.path) { "page" },
                                "{link.label}"
                            }
                        }
                    }
                }

                div { class: "site-nav-right",
                    SessionMenu {
                        signed_in: session.is_authenticated(),
                        initial,
                        label: affordance,
                        on_sign_out: move |_| sign_out(),
                        sign_in: rsx! {
                            Link {
                                to: Route::Login {},
                                class: "button-primary",
                                aria_label: "Sign in",
                                "{affordance}"
                            }
                        },
                    }

                    MobileMenuToggle {
                        open: menu_open(),
                        ontoggle: move |_| menu_open.toggle(),
                    }
                }
            }

            MobileMenuPanel { open: menu_open(),
                div { class: "mobile-nav-links",
                    for link in NAV_LINKS.iter() {
                        Link {
                            key: "{link.path}",
                            to: link.path,
                            class: if active_path == Some(link.path) { "mobile-nav-link mobile-nav-link-active" } else { "mobile-nav-link" },
                            aria_current: if active_path == Some(link.path) { "page" },
                            onclick: move |_| menu_open.set(false),
                            "{link.label}"
                        }
                    }
                }
                div { class: "mobile-nav-session",
                    if session.is_authenticated() {
                        button {
                            r#type: "button",
                            class: "mobile-nav-link",
                            onclick: move |_| sign_out(),
                            "{affordance}"
                        }
                    } else {
                        Link {
                            to: Route::Login {},
                            class: "mobile-nav-link",
                            onclick: move |_| menu_open.set(false),
                            "{affordance}"
                        }
                    }
                }
            }
        }
    }
}
