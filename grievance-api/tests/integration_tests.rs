//! Integration tests for the grievance API endpoints
//!
//! These tests drive the HTTP surface end-to-end over the in-memory
//! backend: filing, filtering, anonymous tracking, status transitions with
//! the append-only history, and the auth checks.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use grievance_api::{create_server, AppState};
use grievance_db::{MemoryGrievanceStore, OfficialDirectory};
use serde_json::{json, Value};

const TEST_PIN: &str = "314159";

/// Create test state over the in-memory backend
fn create_test_state() -> (AppState, Arc<MemoryGrievanceStore>) {
    let store = Arc::new(MemoryGrievanceStore::new());
    (AppState::with_store(store.clone(), TEST_PIN), store)
}

/// Create test server
fn create_test_server() -> (TestServer, Arc<MemoryGrievanceStore>) {
    let (state, store) = create_test_state();
    let server = TestServer::new(create_server(state)).unwrap();
    (server, store)
}

fn submission_body(id: &str) -> Value {
    json!({
        "id": id,
        "type": "complaint",
        "name": "Kumar",
        "phone": "+91 98765-43210",
        "category": "water",
        "taluk": "Tenkasi",
        "firka": "Melagaram",
        "village": "Ilanji",
        "description": "No water supply for three days",
        "urgency": "high",
    })
}

// ============ Health Endpoint Tests ============

#[tokio::test]
async fn test_health_check() {
    let (server, _) = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ok"], true);
    assert_eq!(body["dbOk"], true);
}

#[tokio::test]
async fn test_responses_disable_caching() {
    let (server, _) = create_test_server();

    let response = server.get("/health").await;

    let cache_control = response
        .headers()
        .get("cache-control")
        .expect("cache-control header");
    assert_eq!(cache_control, "no-store");
}

// ============ Filing Tests ============

#[tokio::test]
async fn test_file_submission_and_fetch() {
    let (server, _) = create_test_server();

    let response = server
        .post("/api/submissions")
        .json(&submission_body("TNK-001"))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ok"], true);
    assert_eq!(body["id"], "TNK-001");

    let response = server.get("/api/submissions/TNK-001").await;
    response.assert_status_ok();
    let submission: Value = response.json();
    assert_eq!(submission["type"], "complaint");
    assert_eq!(submission["status"], "pending");
    assert_eq!(submission["history"].as_array().unwrap().len(), 1);
    assert!(submission["resolved_at"].is_null());
}

#[tokio::test]
async fn test_file_submission_rejects_missing_fields() {
    let (server, _) = create_test_server();

    let mut body = submission_body("TNK-001");
    body["village"] = json!("");
    let response = server.post("/api/submissions").json(&body).await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn test_file_submission_rejects_unknown_enum_values() {
    let (server, _) = create_test_server();

    let mut body = submission_body("TNK-001");
    body["type"] = json!("appeal");
    let response = server.post("/api/submissions").json(&body).await;
    response.assert_status_bad_request();

    let mut body = submission_body("TNK-001");
    body["urgency"] = json!("critical");
    let response = server.post("/api/submissions").json(&body).await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_duplicate_id_surfaces_as_generic_failure() {
    let (server, _) = create_test_server();

    server
        .post("/api/submissions")
        .json(&submission_body("TNK-001"))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/submissions")
        .json(&submission_body("TNK-001"))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["ok"], false);
}

// ============ Listing Tests ============

#[tokio::test]
async fn test_list_filters_and_orders_by_recency() {
    let (server, _) = create_test_server();

    server
        .post("/api/submissions")
        .json(&submission_body("TNK-001"))
        .await
        .assert_status_ok();
    let mut petition = submission_body("TNK-002");
    petition["type"] = json!("petition");
    petition["description"] = json!("Request street lights near the school");
    server
        .post("/api/submissions")
        .json(&petition)
        .await
        .assert_status_ok();

    // Most recently updated first
    server
        .post("/api/submissions/TNK-001/status")
        .json(&json!({"status": "in-progress"}))
        .await
        .assert_status_ok();
    let response = server.get("/api/submissions").await;
    response.assert_status_ok();
    let listed: Value = response.json();
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["id"], "TNK-001");

    // Equality criterion
    let response = server
        .get("/api/submissions")
        .add_query_param("type", "petition")
        .await;
    let listed: Value = response.json();
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], "TNK-002");

    // Free text over id/description, case-folded
    let response = server
        .get("/api/submissions")
        .add_query_param("q", "WATER")
        .await;
    let listed: Value = response.json();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // No matches is an empty array, not an error
    let response = server
        .get("/api/submissions")
        .add_query_param("status", "closed")
        .await;
    response.assert_status_ok();
    assert!(response.json::<Value>().as_array().unwrap().is_empty());
}

// ============ Anonymous Tracking Tests ============

#[tokio::test]
async fn test_lookup_matches_equivalent_phone_formats() {
    let (server, _) = create_test_server();
    server
        .post("/api/submissions")
        .json(&submission_body("TNK-001"))
        .await
        .assert_status_ok();

    for phone in ["9876543210", "+91 98765-43210"] {
        let response = server
            .get("/api/submissions/lookup")
            .add_query_param("id", "tnk-001")
            .add_query_param("phone", phone)
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["id"], "TNK-001", "phone format {phone}");
    }
}

#[tokio::test]
async fn test_lookup_miss_returns_null_not_error() {
    let (server, _) = create_test_server();
    server
        .post("/api/submissions")
        .json(&submission_body("TNK-001"))
        .await
        .assert_status_ok();

    // Wrong phone and unknown id are indistinguishable
    for (id, phone) in [("TNK-001", "1112223334"), ("TNK-404", "9876543210")] {
        let response = server
            .get("/api/submissions/lookup")
            .add_query_param("id", id)
            .add_query_param("phone", phone)
            .await;
        response.assert_status_ok();
        assert!(response.json::<Value>().is_null());
    }
}

#[tokio::test]
async fn test_lookup_requires_both_params() {
    let (server, _) = create_test_server();

    let response = server
        .get("/api/submissions/lookup")
        .add_query_param("id", "TNK-001")
        .await;
    response.assert_status_bad_request();

    let response = server
        .get("/api/submissions/lookup")
        .add_query_param("phone", "9876543210")
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_get_unknown_id_returns_null() {
    let (server, _) = create_test_server();

    let response = server.get("/api/submissions/TNK-404").await;
    response.assert_status_ok();
    assert!(response.json::<Value>().is_null());
}

// ============ Status Transition Tests ============

#[tokio::test]
async fn test_status_update_appends_response_and_history() {
    let (server, _) = create_test_server();
    server
        .post("/api/submissions")
        .json(&submission_body("TNK-001"))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/submissions/TNK-001/status")
        .json(&json!({"status": "in-progress", "response": "Inspector assigned"}))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["ok"], true);

    let submission: Value = server.get("/api/submissions/TNK-001").await.json();
    assert_eq!(submission["status"], "in-progress");
    let description = submission["description"].as_str().unwrap();
    assert!(description.ends_with("Inspector assigned"));
    assert!(description.contains("--- Official Response ---"));
    let history = submission["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1]["status"], "in-progress");
    assert_eq!(history[1]["response"], "Inspector assigned");
}

#[tokio::test]
async fn test_resolved_at_set_once_and_sticky() {
    let (server, _) = create_test_server();
    server
        .post("/api/submissions")
        .json(&submission_body("TNK-001"))
        .await
        .assert_status_ok();

    server
        .post("/api/submissions/TNK-001/status")
        .json(&json!({"status": "resolved"}))
        .await
        .assert_status_ok();
    let resolved: Value = server.get("/api/submissions/TNK-001").await.json();
    let resolved_at = resolved["resolved_at"].clone();
    assert!(!resolved_at.is_null());

    server
        .post("/api/submissions/TNK-001/status")
        .json(&json!({"status": "reopened"}))
        .await
        .assert_status_ok();
    let reopened: Value = server.get("/api/submissions/TNK-001").await.json();
    assert_eq!(reopened["status"], "reopened");
    assert_eq!(reopened["resolved_at"], resolved_at);
    assert_eq!(reopened["history"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_status_update_on_unknown_id_fails() {
    let (server, _) = create_test_server();

    let response = server
        .post("/api/submissions/TNK-404/status")
        .json(&json!({"status": "resolved"}))
        .await;
    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["ok"], false);
}

// ============ Auth Endpoint Tests ============

#[tokio::test]
async fn test_dcdm_pin_login() {
    let (server, _) = create_test_server();

    server
        .post("/api/auth/dcdm")
        .json(&json!({"pin": TEST_PIN}))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/auth/dcdm")
        .json(&json!({"pin": "000000"}))
        .await;
    response.assert_status_unauthorized();

    let response = server.post("/api/auth/dcdm").json(&json!({})).await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_official_login() {
    let (server, store) = create_test_server();
    store
        .seed_official("Tenkasi Admin", "letmein")
        .await
        .unwrap();

    server
        .post("/api/auth/official")
        .json(&json!({"username": "Tenkasi Admin", "password": "letmein"}))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/auth/official")
        .json(&json!({"username": "Tenkasi Admin", "password": "wrong"}))
        .await;
    response.assert_status_unauthorized();

    let response = server
        .post("/api/auth/official")
        .json(&json!({"username": "Nobody", "password": "letmein"}))
        .await;
    response.assert_status_unauthorized();

    let response = server
        .post("/api/auth/official")
        .json(&json!({"username": "Tenkasi Admin"}))
        .await;
    response.assert_status_bad_request();
}
