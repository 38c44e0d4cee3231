//! HTTP-level authorization tests
//!
//! Exercises the full chain: session resolution, the per-route gates, and
//! the object-level decisions in handlers, against the seeded demo data.

use crate::auth::AccessControl;
use crate::config::Config;
use crate::server::middleware::ProxyHeaderResolver;
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::MemoryStore;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use std::sync::Arc;

fn demo_state() -> AppState {
    let store = MemoryStore::new();
    store.seed_demo();
    AppState::new(
        Config::default(),
        AccessControl::with_defaults(),
        store,
        Arc::new(ProxyHeaderResolver::new()),
    )
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .route("/health", web::get().to(routes::health::health_check))
                .configure(routes::configure_api),
        )
        .await
    };
}

fn with_session(req: test::TestRequest, id: &str, role: &str) -> test::TestRequest {
    req.insert_header(("x-auth-user-id", id))
        .insert_header(("x-auth-user-role", role))
}

#[actix_web::test]
async fn health_needs_no_session() {
    let app = test_app!(demo_state());
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn missing_session_is_unauthorized_not_forbidden() {
    let app = test_app!(demo_state());
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/users").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn analytics_requires_a_blanket_grant() {
    let app = test_app!(demo_state());

    let denied = test::call_service(
        &app,
        with_session(
            test::TestRequest::get().uri("/api/v1/analytics/summary"),
            "member-1",
            "member",
        )
        .to_request(),
    )
    .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let allowed = test::call_service(
        &app,
        with_session(
            test::TestRequest::get().uri("/api/v1/analytics/summary"),
            "admin-1",
            "admin",
        )
        .to_request(),
    )
    .await;
    assert_eq!(allowed.status(), StatusCode::OK);
}

#[actix_web::test]
async fn trainer_sees_only_assigned_clients() {
    let app = test_app!(demo_state());

    let resp = test::call_service(
        &app,
        with_session(
            test::TestRequest::get().uri("/api/v1/clients"),
            "trainer-1",
            "trainer",
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let records = body["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["trainer_id"], "trainer-1");
}

#[actix_web::test]
async fn unassigned_client_record_reads_as_not_found() {
    let app = test_app!(demo_state());

    // Admin view to discover the other trainer's record id.
    let resp = test::call_service(
        &app,
        with_session(test::TestRequest::get().uri("/api/v1/clients"), "admin-1", "admin")
            .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let other_id = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["trainer_id"] == "trainer-2")
        .map(|r| r["id"].as_str().unwrap().to_string())
        .unwrap();

    // Object-level denial folds into 404 so record ids cannot be probed.
    let resp = test::call_service(
        &app,
        with_session(
            test::TestRequest::get().uri(&format!("/api/v1/clients/{}", other_id)),
            "trainer-1",
            "trainer",
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn client_updates_own_account_only() {
    let app = test_app!(demo_state());

    let own = test::call_service(
        &app,
        with_session(
            test::TestRequest::put()
                .uri("/api/v1/users/client-1")
                .set_json(serde_json::json!({"display_name": "Cleo"})),
            "client-1",
            "client",
        )
        .to_request(),
    )
    .await;
    assert_eq!(own.status(), StatusCode::OK);

    let other = test::call_service(
        &app,
        with_session(
            test::TestRequest::put()
                .uri("/api/v1/users/member-1")
                .set_json(serde_json::json!({"display_name": "nope"})),
            "client-1",
            "client",
        )
        .to_request(),
    )
    .await;
    assert_eq!(other.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn ownership_does_not_extend_to_delete() {
    let app = test_app!(demo_state());

    let resp = test::call_service(
        &app,
        with_session(
            test::TestRequest::delete().uri("/api/v1/users/client-1"),
            "client-1",
            "client",
        )
        .to_request(),
    )
    .await;
    // Rejected at the resource gate: delete is never self-service.
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn provisioning_follows_the_delegation_ladder() {
    let app = test_app!(demo_state());

    let below = test::call_service(
        &app,
        with_session(
            test::TestRequest::post().uri("/api/v1/users").set_json(serde_json::json!({
                "username": "new.trainer",
                "email": "new.trainer@club.example",
                "role": "trainer"
            })),
            "manager-1",
            "manager",
        )
        .to_request(),
    )
    .await;
    assert_eq!(below.status(), StatusCode::CREATED);

    // Manager may not provision a peer or above.
    let above = test::call_service(
        &app,
        with_session(
            test::TestRequest::post().uri("/api/v1/users").set_json(serde_json::json!({
                "username": "new.admin",
                "email": "new.admin@club.example",
                "role": "admin"
            })),
            "manager-1",
            "manager",
        )
        .to_request(),
    )
    .await;
    assert_eq!(above.status(), StatusCode::FORBIDDEN);

    // Trainer holds no users:create grant at all; the gate answers.
    let no_grant = test::call_service(
        &app,
        with_session(
            test::TestRequest::post().uri("/api/v1/users").set_json(serde_json::json!({
                "username": "x",
                "email": "x@club.example",
                "role": "member"
            })),
            "trainer-1",
            "trainer",
        )
        .to_request(),
    )
    .await;
    assert_eq!(no_grant.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn permission_summary_mirrors_the_engine() {
    let app = test_app!(demo_state());

    let resp = test::call_service(
        &app,
        with_session(
            test::TestRequest::get().uri("/api/v1/permissions/me"),
            "trainer-1",
            "trainer",
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let summary = &body["data"];
    assert_eq!(summary["role"], "trainer");
    assert_eq!(summary["grants"]["schedule"], serde_json::json!(["create"]));
    assert!(summary["grants"].get("users").is_none());

    let creatable = summary["creatable_roles"].as_array().unwrap();
    assert!(creatable.iter().any(|r| r == "staff"));
    assert!(!creatable.iter().any(|r| r == "manager"));
}

#[actix_web::test]
async fn maintenance_is_reserved_for_the_platform_operator() {
    let app = test_app!(demo_state());

    let denied = test::call_service(
        &app,
        with_session(
            test::TestRequest::post()
                .uri("/api/v1/system/maintenance")
                .set_json(serde_json::json!({"enabled": true})),
            "admin-1",
            "admin",
        )
        .to_request(),
    )
    .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let allowed = test::call_service(
        &app,
        with_session(
            test::TestRequest::post()
                .uri("/api/v1/system/maintenance")
                .set_json(serde_json::json!({"enabled": true})),
            "root-1",
            "super-admin",
        )
        .to_request(),
    )
    .await;
    assert_eq!(allowed.status(), StatusCode::OK);

    // Booking pauses while maintenance is on.
    let paused = test::call_service(
        &app,
        with_session(
            test::TestRequest::post().uri("/api/v1/schedule").set_json(serde_json::json!({
                "title": "Evening 1:1",
                "starts_at": "2026-09-01T17:00:00Z",
                "ends_at": "2026-09-01T18:00:00Z"
            })),
            "trainer-1",
            "trainer",
        )
        .to_request(),
    )
    .await;
    assert_eq!(paused.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn recipient_marks_own_notification_read() {
    let app = test_app!(demo_state());

    let resp = test::call_service(
        &app,
        with_session(
            test::TestRequest::get().uri("/api/v1/notifications"),
            "client-1",
            "client",
        )
        .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let notifications = body["data"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    let id = notifications[0]["id"].as_str().unwrap().to_string();

    let marked = test::call_service(
        &app,
        with_session(
            test::TestRequest::post().uri(&format!("/api/v1/notifications/{}/read", id)),
            "client-1",
            "client",
        )
        .to_request(),
    )
    .await;
    assert_eq!(marked.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(marked).await;
    assert_eq!(body["data"]["read"], true);

    // Someone else's notification is invisible, even for marking read.
    let foreign = test::call_service(
        &app,
        with_session(
            test::TestRequest::post().uri(&format!("/api/v1/notifications/{}/read", id)),
            "member-1",
            "member",
        )
        .to_request(),
    )
    .await;
    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn trainer_books_sessions_for_themselves() {
    let app = test_app!(demo_state());

    let resp = test::call_service(
        &app,
        with_session(
            test::TestRequest::post().uri("/api/v1/schedule").set_json(serde_json::json!({
                "title": "Morning 1:1",
                "client_id": "client-1",
                "starts_at": "2026-09-01T08:00:00Z",
                "ends_at": "2026-09-01T09:00:00Z"
            })),
            "trainer-1",
            "trainer",
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    // The trainer id comes from the session, not the payload.
    assert_eq!(body["data"]["trainer_id"], "trainer-1");
}

#[actix_web::test]
async fn client_sees_only_their_booked_sessions() {
    let app = test_app!(demo_state());

    let resp = test::call_service(
        &app,
        with_session(
            test::TestRequest::get().uri("/api/v1/schedule"),
            "client-1",
            "client",
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["client_id"], "client-1");
}
