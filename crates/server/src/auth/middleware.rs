use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use super::cookies::{self, CookieSlot, PendingCookieAction};
use super::SessionToken;
use crate::backend::{AnyBackend, Backend};

/// Permissive session middleware.
///
/// On each request:
/// 1. Copies the access token (cookie or Bearer) into a `SessionToken` extension
/// 2. If only the refresh cookie survived, refreshes the session transparently
/// 3. Inserts a `CookieSlot` so server functions can schedule cookie changes
/// 4. Applies the scheduled change to the response
///
/// Never rejects a request; handlers decide what a missing session means.
pub async fn session_middleware(
    State(backend): State<AnyBackend>,
    mut req: Request,
    next: Next,
) -> Response {
    let headers = req.headers().clone();
    let mut refreshed = None;

    match cookies::extract_access_token(&headers) {
        Some(token) => {
            req.extensions_mut().insert(SessionToken(token));
        }
        None => {
            if let Some(refresh_token) = cookies::extract_refresh_token(&headers) {
                match backend.refresh_session(&refresh_token).await {
                    Ok(session) => {
                        tracing::debug!(user_id = %session.user.id, "session refreshed");
                        req.extensions_mut()
                            .insert(SessionToken(session.access_token.clone()));
                        refreshed = Some(session);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "transparent refresh failed");
                    }
                }
            }
        }
    }

    let cookie_slot = CookieSlot::default();
    req.extensions_mut().insert(cookie_slot.clone());

    let mut response = next.run(req).await;

    if let Some(session) = refreshed {
        cookies::set_auth_cookies(
            response.headers_mut(),
            &session.access_token,
            &session.refresh_token,
            session.expires_in,
        );
    }

    // A handler's choice wins over the refresh: both append, and the later
    // Set-Cookie for the same name takes effect in the browser.
    match cookie_slot.take() {
        Some(PendingCookieAction::Set {
            access_token,
            refresh_token,
            expires_in,
        }) => {
            cookies::set_auth_cookies(response.headers_mut(), &access_token, &refresh_token, expires_in);
        }
        Some(PendingCookieAction::Clear) => {
            cookies::clear_auth_cookies(response.headers_mut());
        }
        None => {}
    }

    response
}
