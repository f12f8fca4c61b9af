use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use server::backend::{AnyBackend, MemoryBackend, Table};

use crate::common;

fn platform() -> MemoryBackend {
    let backend = MemoryBackend::new()
        .with_rows(
            Table::Profiles,
            [
                json!({"id": "admin", "full_name": "Ada Stone", "role": "superadmin"}),
                json!({"id": "coach", "full_name": "Ben Ore", "role": "mentor"}),
                json!({"id": "learner", "full_name": "Grace Hopper", "role": "mentee", "industry_focus": ["Gold"]}),
                json!({"id": "drifter", "full_name": "No Role", "role": null}),
            ],
        )
        .with_rows(
            Table::MentorshipMatches,
            [json!({"id": "match-1", "created_at": "2024-03-05", "mentor_id": "coach", "mentee_id": "learner"})],
        )
        .with_rows(
            Table::UserProgress,
            [json!({"id": "p1", "user_id": "learner", "module_id": "m1", "status": "completed"})],
        )
        .with_rows(Table::Modules, [json!({"id": "m1"}), json!({"id": "m2"})])
        .with_rows(
            Table::Curriculums,
            [
                json!({"id": "c1", "title": "Mine Planning 101", "is_active": true}),
                json!({"id": "c2", "title": "Legacy", "is_active": false}),
            ],
        );
    for id in ["admin", "coach", "learner", "drifter"] {
        backend.add_user(id, &format!("{id}@ridge.io"), "pw");
    }
    backend
}

fn cookie_for(backend: &MemoryBackend, user_id: &str) -> String {
    let session = backend.issue_session(user_id).unwrap();
    format!("mm_access={}", session.access_token)
}

#[tokio::test]
async fn test_health_reports_backend() {
    let (app, _) = common::memory_app(MemoryBackend::new());
    let (status, _, body) = common::get(&app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "configured");

    let app = common::api_app(AnyBackend::Unconfigured("BACKEND_URL"));
    let (_, _, body) = common::get(&app, "/health", None).await;
    assert_eq!(body["backend"], "unconfigured");
}

#[tokio::test]
async fn test_anonymous_role_lookup_makes_no_queries() {
    let (app, backend) = common::memory_app(platform());
    let (status, _, body) = common::get(&app, "/api/v1/dashboard/role", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"outcome": "unauthenticated"}));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_role_lookup_per_user() {
    let (app, backend) = common::memory_app(platform());
    for (id, expected) in [
        ("admin", json!({"outcome": "found", "role": "superadmin"})),
        ("coach", json!({"outcome": "found", "role": "mentor"})),
        ("learner", json!({"outcome": "found", "role": "mentee"})),
        ("drifter", json!({"outcome": "missing"})),
    ] {
        let cookie = cookie_for(&backend, id);
        let (status, _, body) = common::get(&app, "/api/v1/dashboard/role", Some(&cookie)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, expected, "user {id}");
    }
}

#[tokio::test]
async fn test_role_lookup_failure_is_reported_as_failed() {
    let backend = platform();
    backend.fail_table(Table::Profiles);
    let (app, backend) = common::memory_app(backend);
    let cookie = cookie_for(&backend, "coach");

    let (status, _, body) = common::get(&app, "/api/v1/dashboard/role", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"outcome": "failed"}));
}

#[tokio::test]
async fn test_mentee_progress_route() {
    let (app, backend) = common::memory_app(platform());
    let cookie = cookie_for(&backend, "learner");

    let (status, _, body) = common::get(&app, "/api/v1/dashboard/mentee", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"completed_modules": 1, "total_modules": 2}));
}

#[tokio::test]
async fn test_mentor_overview_route_embeds_mentee() {
    let (app, backend) = common::memory_app(platform());
    let cookie = cookie_for(&backend, "coach");

    let (status, _, body) = common::get(&app, "/api/v1/dashboard/mentor", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matches"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["matches"][0]["mentee"]["full_name"], "Grace Hopper");
    assert_eq!(body["upcoming_sessions"], 0);
    assert_eq!(body["average_rating"], 4.8);
}

#[tokio::test]
async fn test_stats_route() {
    let (app, backend) = common::memory_app(platform());
    let cookie = cookie_for(&backend, "admin");

    let (status, _, body) = common::get(&app, "/api/v1/dashboard/stats", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_users"], 4);
    assert_eq!(body["total_sessions"], 1);
    assert_eq!(body["revenue"], 0.0);
}

#[tokio::test]
async fn test_profile_route() {
    let (app, backend) = common::memory_app(platform());
    let cookie = cookie_for(&backend, "learner");

    let (status, _, body) = common::get(&app, "/api/v1/profile", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["full_name"], "Grace Hopper");
    assert_eq!(body["industry_focus"], json!(["Gold"]));
}

#[tokio::test]
async fn test_profile_route_without_row_is_404() {
    let backend = MemoryBackend::new();
    backend.add_user("orphan", "orphan@ridge.io", "pw");
    let (app, backend) = common::memory_app(backend);
    let cookie = cookie_for(&backend, "orphan");

    let (status, _, body) = common::get(&app, "/api/v1/profile", Some(&cookie)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Profile not found");
}

#[tokio::test]
async fn test_curriculums_route_is_public_and_active_only() {
    let (app, _) = common::memory_app(platform());

    let (status, _, body) = common::get(&app, "/api/v1/curriculums", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Mine Planning 101".to_string()]);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (app, _) = common::memory_app(MemoryBackend::new());
    let (status, _, _) = common::get(&app, "/api/v1/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
