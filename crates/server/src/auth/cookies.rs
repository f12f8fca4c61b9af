use axum::http::{header, HeaderMap, HeaderValue};
use cookie::{Cookie, CookieBuilder};
use std::sync::{Arc, Mutex};

pub const ACCESS_COOKIE: &str = "mm_access";
pub const REFRESH_COOKIE: &str = "mm_refresh";

/// Refresh tokens outlive the access token; the backend decides when they stop working.
const REFRESH_MAX_AGE_DAYS: i64 = 30;

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

fn cookie_domain() -> Option<String> {
    std::env::var("COOKIE_DOMAIN")
        .ok()
        .filter(|d| !d.is_empty())
}

fn base_cookie(name: &'static str, value: &str) -> CookieBuilder<'static> {
    let mut cookie = Cookie::build((name, value.to_string()))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .secure(cookie_secure());
    if let Some(domain) = cookie_domain() {
        cookie = cookie.domain(domain);
    }
    cookie
}

fn to_header(cookie: Cookie<'_>) -> Option<HeaderValue> {
    match HeaderValue::from_str(&cookie.encoded().to_string()) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(cookie = cookie.name(), error = %e, "dropping unencodable cookie");
            None
        }
    }
}

/// Set-Cookie value for the access token, expiring with the token itself.
pub fn build_access_cookie(token: &str, max_age_seconds: i64) -> Option<HeaderValue> {
    let cookie = base_cookie(ACCESS_COOKIE, token)
        .max_age(cookie::time::Duration::seconds(max_age_seconds.max(0)))
        .build();
    to_header(cookie)
}

pub fn build_refresh_cookie(token: &str) -> Option<HeaderValue> {
    let cookie = base_cookie(REFRESH_COOKIE, token)
        .max_age(cookie::time::Duration::days(REFRESH_MAX_AGE_DAYS))
        .build();
    to_header(cookie)
}

/// Set-Cookie values that expire both session cookies.
pub fn build_clear_cookies() -> Vec<HeaderValue> {
    [ACCESS_COOKIE, REFRESH_COOKIE]
        .into_iter()
        .filter_map(|name| {
            to_header(
                base_cookie(name, "")
                    .max_age(cookie::time::Duration::ZERO)
                    .build(),
            )
        })
        .collect()
}

/// Access token from the cookie, falling back to a Bearer header for REST clients.
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_cookie(headers, ACCESS_COOKIE) {
        return Some(token);
    }
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

pub fn extract_refresh_token(headers: &HeaderMap) -> Option<String> {
    extract_cookie(headers, REFRESH_COOKIE)
}

/// True when the request carries any session credential at all.
pub fn has_session_credentials(headers: &HeaderMap) -> bool {
    extract_access_token(headers).is_some() || extract_refresh_token(headers).is_some()
}

fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|piece| Cookie::parse_encoded(piece.trim().to_string()).ok())
        .find(|c| c.name() == name && !c.value().is_empty())
        .map(|c| c.value().to_string())
}

pub fn set_auth_cookies(headers: &mut HeaderMap, access_token: &str, refresh_token: &str, expires_in: i64) {
    let values = [
        build_access_cookie(access_token, expires_in),
        build_refresh_cookie(refresh_token),
    ];
    for value in values.into_iter().flatten() {
        headers.append(header::SET_COOKIE, value);
    }
}

pub fn clear_auth_cookies(headers: &mut HeaderMap) {
    for value in build_clear_cookies() {
        headers.append(header::SET_COOKIE, value);
    }
}

/// Cookie change requested by a server function, applied by the middleware.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingCookieAction {
    Set {
        access_token: String,
        refresh_token: String,
        expires_in: i64,
    },
    Clear,
}

#[derive(Clone, Debug, Default)]
pub struct CookieSlot(pub Arc<Mutex<Option<PendingCookieAction>>>);

impl CookieSlot {
    pub fn put(&self, action: PendingCookieAction) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(action);
        }
    }

    pub fn take(&self) -> Option<PendingCookieAction> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

fn schedule(action: PendingCookieAction) {
    let Some(ctx) = dioxus::fullstack::FullstackContext::current() else {
        tracing::warn!("no request context; cookie change dropped");
        return;
    };
    let parts = ctx.parts_mut();
    match parts.extensions.get::<CookieSlot>() {
        Some(slot) => slot.put(action),
        None => tracing::warn!("session middleware not installed; cookie change dropped"),
    }
}

/// Ask the middleware to store a fresh token pair on the response.
pub fn schedule_auth_cookies(access_token: &str, refresh_token: &str, expires_in: i64) {
    schedule(PendingCookieAction::Set {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.to_string(),
        expires_in,
    });
}

pub fn schedule_clear_cookies() {
    schedule(PendingCookieAction::Clear);
}
