pub mod curriculum;
pub mod dashboard;
pub mod landing;
pub mod login;
pub mod navbar;
pub mod not_found;
pub mod profile;

use crate::auth::use_auth;
use dioxus::prelude::*;
use shared_types::FeatureFlags;

use curriculum::Curriculum;
use dashboard::Dashboard;
use landing::Landing;
use login::Login;
use navbar::Navbar;
use not_found::NotFound;
use profile::Profile;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[layout(SessionLoader)]
    #[layout(AppLayout)]
    #[route("/")]
    Landing {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/login")]
    Login {},
    #[route("/profile")]
    Profile {},
    #[route("/curriculum")]
    Curriculum {},
    #[route("/:..route")]
    NotFound { route: Vec<String> },
    #[end_layout]
    #[end_layout]
}

/// Loads the current session once and fills the auth context.
///
/// Suspends through `use_server_future` so SSR renders with the session
/// already known; the `SuspenseBoundary` in `App` shows the fallback.
/// Never redirects: each page decides what signed out looks like.
#[component]
fn SessionLoader() -> Element {
    let mut auth = use_auth();

    let resource = use_server_future(move || async move { server::api::get_current_user().await })?;
    let result = resource.read().as_ref().cloned();

    // Later sign-ins and sign-outs own the state; only seed it once.
    if !*auth.loaded.peek() {
        match result {
            Some(Ok(Some(user))) => auth.set_user(user),
            Some(Ok(None)) => auth.clear_auth(),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "session lookup failed; continuing signed out");
                auth.clear_auth();
            }
            None => {}
        }
    }

    rsx! { Outlet::<Route> {} }
}

/// Navbar over the routed page.
#[component]
fn AppLayout() -> Element {
    let flags: FeatureFlags = use_context();

    rsx! {
        div { class: "app-shell",
            Navbar {}
            main { class: "page-content",
                Outlet::<Route> {}
            }
            if flags.api_docs {
                footer { class: "site-footer",
                    a { href: "/docs", "API reference" }
                }
            }
        }
    }
}
