use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use server::auth::revoke_session;
use server::backend::AnyBackend;

use crate::common::{self, FakeBaas};

async fn app_over(fake: &FakeBaas) -> axum::Router {
    common::api_app(AnyBackend::Rest(fake.rest_backend().await))
}

#[tokio::test]
async fn test_access_cookie_resolves_user() {
    let fake = FakeBaas::new().with_user("u1", "ada@ridge.io", "pw");
    let (access, _) = fake.issue("u1");
    let app = app_over(&fake).await;

    let (status, headers, body) =
        common::get(&app, "/api/v1/session", Some(&format!("mm_access={access}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": "u1", "email": "ada@ridge.io"}));
    assert!(common::set_cookies(&headers).is_empty());
}

#[tokio::test]
async fn test_bearer_header_resolves_user() {
    let fake = FakeBaas::new().with_user("u1", "ada@ridge.io", "pw");
    let (access, _) = fake.issue("u1");
    let app = app_over(&fake).await;

    let (status, _, body) = common::get_bearer(&app, "/api/v1/session", &access).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "u1");
}

#[tokio::test]
async fn test_stale_access_cookie_reads_as_signed_out() {
    let fake = FakeBaas::new().with_user("u1", "ada@ridge.io", "pw");
    let app = app_over(&fake).await;

    let (status, _, body) = common::get(&app, "/api/v1/session", Some("mm_access=expired")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
    // An access cookie is present, so no refresh is attempted.
    assert!(fake.requests_to("/auth/v1/token").is_empty());
}

#[tokio::test]
async fn test_refresh_cookie_renews_session_transparently() {
    let fake = FakeBaas::new().with_user("u1", "ada@ridge.io", "pw");
    let (_, refresh) = fake.issue("u1");
    let app = app_over(&fake).await;

    let (status, headers, body) =
        common::get(&app, "/api/v1/session", Some(&format!("mm_refresh={refresh}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "u1");

    let cookies = common::set_cookies(&headers);
    assert_eq!(cookies.len(), 2, "{cookies:?}");
    assert!(cookies.iter().any(|c| c.starts_with("mm_access=fake-access-")));
    assert!(cookies.iter().any(|c| c.starts_with("mm_refresh=fake-refresh-")));
    assert!(cookies.iter().all(|c| c.contains("HttpOnly")));

    let grants = fake.requests_to("/auth/v1/token");
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].query, "grant_type=refresh_token");
}

#[tokio::test]
async fn test_rejected_refresh_cookie_leaves_request_anonymous() {
    let fake = FakeBaas::new();
    let app = app_over(&fake).await;

    let (status, headers, body) =
        common::get(&app, "/api/v1/session", Some("mm_refresh=revoked")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
    assert!(common::set_cookies(&headers).is_empty());
}

#[tokio::test]
async fn test_protected_route_requires_session() {
    let fake = FakeBaas::new();
    let app = app_over(&fake).await;

    let (status, _, body) = common::get(&app, "/api/v1/dashboard/mentee", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "Unauthorized");
    assert_eq!(body["message"], "Authentication required");
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_expired_session_on_protected_route() {
    let fake = FakeBaas::new();
    let app = app_over(&fake).await;

    let (status, _, body) =
        common::get(&app, "/api/v1/profile", Some("mm_access=expired")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Session expired");
}

#[tokio::test]
async fn test_backend_outage_on_protected_route_is_502() {
    let backend = AnyBackend::Rest(server::backend::RestBackend::new(
        server::backend::BackendConfig::new("http://127.0.0.1:1", common::ANON_KEY),
    ));
    let app = common::api_app(backend);

    let (status, _, body) = common::get(&app, "/api/v1/profile", Some("mm_access=tok")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "BackendUnavailable");
}

#[tokio::test]
async fn test_revoke_reports_remote_outcome() {
    let fake = FakeBaas::new().with_user("u1", "ada@ridge.io", "pw");
    let (access, _) = fake.issue("u1");
    let backend = AnyBackend::Rest(fake.rest_backend().await);

    assert!(revoke_session(&backend, Some(&access)).await.remote_revoked);
    assert!(!revoke_session(&backend, Some(&access)).await.remote_revoked);
    assert!(!revoke_session(&backend, None).await.remote_revoked);
    assert_eq!(fake.requests_to("/auth/v1/logout").len(), 2);
}
