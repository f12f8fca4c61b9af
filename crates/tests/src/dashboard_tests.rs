use pretty_assertions::assert_eq;
use serde_json::json;
use server::{dashboard, profile};
use shared_types::{DashboardView, MenteeProgress, RoleLookup, RoleState, SessionUser, UserRole};

use crate::common::FakeBaas;

fn user(id: &str) -> SessionUser {
    SessionUser {
        id: id.to_string(),
        email: Some(format!("{id}@ridge.io")),
    }
}

fn view_for(lookup: RoleLookup) -> DashboardView {
    DashboardView::select(true, &RoleState::settle(lookup))
}

#[tokio::test]
async fn test_role_resolves_over_http() {
    let fake = FakeBaas::new().with_rows(
        "profiles",
        [
            json!({"id": "admin", "role": "superadmin"}),
            json!({"id": "coach", "role": "mentor"}),
            json!({"id": "learner", "role": "mentee"}),
        ],
    );
    let backend = fake.rest_backend().await;

    for (id, role) in [
        ("admin", UserRole::Superadmin),
        ("coach", UserRole::Mentor),
        ("learner", UserRole::Mentee),
    ] {
        let lookup = dashboard::resolve_role(&backend, Some(&user(id))).await;
        assert_eq!(lookup, RoleLookup::Found(role));
        assert_eq!(view_for(lookup), DashboardView::Variant(role));
    }

    let calls = fake.requests_to("/rest/v1/profiles");
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].query, "select=role&id=eq.admin");
}

#[tokio::test]
async fn test_missing_and_failed_profiles_render_the_same() {
    let fake = FakeBaas::new();
    let backend = fake.rest_backend().await;
    let missing = dashboard::resolve_role(&backend, Some(&user("ghost"))).await;
    assert_eq!(missing, RoleLookup::Missing);

    let failing = FakeBaas::new();
    failing.fail_table("profiles");
    let backend = failing.rest_backend().await;
    let failed = dashboard::resolve_role(&backend, Some(&user("ghost"))).await;
    assert_eq!(failed, RoleLookup::Failed);

    assert_eq!(view_for(missing), DashboardView::NoRole);
    assert_eq!(view_for(failed), view_for(missing));
}

#[tokio::test]
async fn test_signed_out_dashboard_makes_no_requests() {
    let fake = FakeBaas::new();
    let backend = fake.rest_backend().await;

    let lookup = dashboard::resolve_role(&backend, None).await;
    assert_eq!(lookup, RoleLookup::Unauthenticated);
    assert_eq!(
        DashboardView::select(false, &RoleState::begin(false)),
        DashboardView::SignInPrompt
    );
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_mentee_progress_counts_only_own_completed_modules() {
    let fake = FakeBaas::new()
        .with_rows(
            "user_progress",
            [
                json!({"id": "p1", "user_id": "learner", "module_id": "m1", "status": "completed"}),
                json!({"id": "p2", "user_id": "learner", "module_id": "m2", "status": "completed"}),
                json!({"id": "p3", "user_id": "learner", "module_id": "m3", "status": "in_progress"}),
                json!({"id": "p4", "user_id": "other", "module_id": "m1", "status": "completed"}),
            ],
        )
        .with_rows("modules", (1..=4).map(|n| json!({"id": format!("m{n}")})));
    let backend = fake.rest_backend().await;

    let progress = dashboard::load_mentee_progress(&backend, &user("learner")).await;
    assert_eq!(
        progress,
        MenteeProgress {
            completed_modules: 2,
            total_modules: 4
        }
    );
    assert_eq!(progress.completion_percent(), 50.0);
}

#[tokio::test]
async fn test_mentee_progress_with_no_modules_is_zero_percent() {
    let fake = FakeBaas::new();
    let backend = fake.rest_backend().await;

    let progress = dashboard::load_mentee_progress(&backend, &user("learner")).await;
    assert_eq!(progress.total_modules, 0);
    assert_eq!(progress.completion_percent(), 0.0);
}

#[tokio::test]
async fn test_mentor_overview_decodes_embedded_mentee() {
    let fake = FakeBaas::new().with_rows(
        "mentorship_matches",
        [
            json!({
                "id": "match-1",
                "created_at": "2024-03-05T10:00:00+00:00",
                "mentor_id": "coach",
                "mentee_id": "learner",
                "mentee": {"id": "learner", "full_name": "Grace Hopper", "avatar_url": null}
            }),
            json!({
                "id": "match-2",
                "created_at": "2024-04-01T10:00:00+00:00",
                "mentor_id": "someone-else",
                "mentee_id": "x",
                "mentee": null
            }),
        ],
    );
    let backend = fake.rest_backend().await;

    let overview = dashboard::load_mentor_overview(&backend, &user("coach")).await;
    assert_eq!(overview.active_mentees(), 1);
    assert_eq!(overview.matches[0].mentee_name(), "Grace Hopper");
    assert_eq!(overview.upcoming_sessions, 0);
    assert_eq!(overview.average_rating, 4.8);

    let calls = fake.requests_to("/rest/v1/mentorship_matches");
    assert!(calls[0].query.contains("mentor_id=eq.coach"), "{:?}", calls[0]);
}

#[tokio::test]
async fn test_stats_use_exact_counts() {
    let fake = FakeBaas::new()
        .with_rows("profiles", (0..12).map(|n| json!({"id": format!("u{n}")})))
        .with_rows("mentorship_matches", [json!({"id": "match-1"}), json!({"id": "match-2"})])
        .with_page_size(5);
    let backend = fake.rest_backend().await;

    let stats = dashboard::load_dashboard_stats(&backend).await;
    assert_eq!(stats.total_users, 12);
    assert_eq!(stats.total_sessions, 2);
    assert_eq!(stats.active_users, 0);
    assert_eq!(stats.revenue, 0.0);
}

#[tokio::test]
async fn test_profile_and_curriculums_over_http() {
    let fake = FakeBaas::new()
        .with_rows(
            "profiles",
            [json!({
                "id": "learner",
                "full_name": "Ben Ore",
                "company": "Ridge Metals",
                "years_experience": 3,
                "industry_focus": ["Coal", "Gold"],
                "role": "mentee"
            })],
        )
        .with_rows(
            "curriculums",
            [
                json!({"id": "c1", "title": "Mine Planning 101", "industry_focus": null, "is_active": true}),
                json!({"id": "c2", "title": "Legacy", "is_active": false}),
            ],
        );
    let backend = fake.rest_backend().await;

    let profile = profile::load_profile(&backend, &user("learner")).await.unwrap();
    assert_eq!(profile.full_name_or_empty(), "Ben Ore");
    assert_eq!(profile.position_or_empty(), "");
    assert_eq!(profile.industry_focus, vec!["Coal".to_string(), "Gold".to_string()]);
    assert_eq!(profile.role, Some(UserRole::Mentee));

    assert_eq!(profile::load_profile(&backend, &user("ghost")).await, None);

    let curriculums = profile::load_active_curriculums(&backend).await;
    assert_eq!(curriculums.len(), 1);
    assert_eq!(curriculums[0].title, "Mine Planning 101");
    assert!(curriculums[0].industry_focus.is_empty());
}
