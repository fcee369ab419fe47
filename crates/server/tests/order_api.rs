//! API tests for the order board, actions and selection.
//!
//! Each test gets its own in-process server and display loop; orders are
//! created by pushing payloads through the mock recipe stream.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{fixtures, TestFixture, TEST_DESELECT_DELAY_MS};
use serde_json::json;

// =============================================================================
// Health / config / metrics
// =============================================================================

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/api/v1/health").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_exposes_display_settings() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/api/v1/config").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(
        response.body["display"]["deselect_delay_ms"],
        TEST_DESELECT_DELAY_MS
    );
    assert_eq!(response.body["stream"]["url"], "http://127.0.0.1:9/stream");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new().await;
    fixture.stream.push_recipe(&fixtures::panini()).await;
    // Make sure the order has been applied before scraping
    fixture.get("/api/v1/orders").await;

    let response = fixture.get("/api/v1/metrics").await;

    assert_status!(response, StatusCode::OK);
    let text = response.body.as_str().expect("metrics are plain text");
    assert!(text.contains("kitchen_orders_by_status"));
    assert!(text.contains("kitchen_http_requests_total"));
}

// =============================================================================
// Board
// =============================================================================

#[tokio::test]
async fn test_empty_board() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/api/v1/orders").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["pending"], json!([]));
    assert_eq!(response.body["preparing"], json!([]));
    assert_eq!(response.body["completed"], json!([]));
    assert_eq!(response.body["counts"]["total"], 0);
}

#[tokio::test]
async fn test_pushed_payload_appears_as_order_101() {
    let fixture = TestFixture::new().await;

    assert!(
        fixture
            .stream
            .push(r#"{"meal":"Panini","steps":["Toast bread","Add filling"]}"#)
            .await
    );

    let response = fixture.get("/api/v1/orders").await;
    assert_status!(response, StatusCode::OK);

    let order = &response.body["pending"][0];
    assert_eq!(order["order_number"], 101);
    assert_eq!(order["order_label"], "#101");
    assert_eq!(order["meal"], "Panini");
    assert_eq!(order["steps"], json!(["Toast bread", "Add filling"]));
    assert_eq!(order["status"], "pending");
    assert_eq!(order["status_label"], "Pending");
    assert_eq!(order["category"], "attention");
    assert_eq!(order["elapsed"], "just now");
    assert_eq!(order["actions"], json!(["toggle", "complete"]));
    assert_eq!(response.body["counts"]["pending"], 1);
}

#[tokio::test]
async fn test_malformed_payloads_are_dropped() {
    let fixture = TestFixture::new().await;

    fixture.stream.push("not json").await;
    fixture.stream.push(r#"{"steps":["no meal"]}"#).await;
    fixture.stream.push(r#"{"meal":"   "}"#).await;
    fixture.stream.push(r#"{"meal":"Soup"}"#).await;

    let response = fixture.get("/api/v1/orders").await;
    assert_eq!(response.body["counts"]["total"], 1);
    let order = &response.body["pending"][0];
    assert_eq!(order["order_number"], 101);
    assert_eq!(order["steps"], json!([]));
}

#[tokio::test]
async fn test_status_filter() {
    let fixture = TestFixture::new().await;
    let ids = fixture.seed_orders(3).await;

    fixture
        .post(&format!("/api/v1/orders/{}/start", ids[1]))
        .await;

    let pending = fixture.get("/api/v1/orders?status=pending").await;
    assert_status!(pending, StatusCode::OK);
    assert_eq!(pending.body["orders"].as_array().unwrap().len(), 2);

    let preparing = fixture.get("/api/v1/orders?status=preparing").await;
    let orders = preparing.body["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["id"], ids[1]);
    assert_eq!(orders[0]["category"], "in_progress");

    let completed = fixture.get("/api/v1/orders?status=completed").await;
    assert_eq!(completed.body["orders"], json!([]));
}

#[tokio::test]
async fn test_invalid_status_filter_is_rejected() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/api/v1/orders?status=burnt").await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].as_str().unwrap().contains("burnt"));
}

#[tokio::test]
async fn test_get_order() {
    let fixture = TestFixture::new().await;
    let ids = fixture.seed_orders(2).await;

    let response = fixture.get(&format!("/api/v1/orders/{}", ids[1])).await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["order_number"], 102);
    assert_eq!(response.body["meal"], "Dish 2");
}

#[tokio::test]
async fn test_get_unknown_order_returns_404() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/api/v1/orders/does-not-exist").await;

    assert_status!(response, StatusCode::NOT_FOUND);
    assert!(response.body["error"].is_string());
}

// =============================================================================
// Actions
// =============================================================================

#[tokio::test]
async fn test_start_and_pause() {
    let fixture = TestFixture::new().await;
    let ids = fixture.seed_orders(1).await;
    let id = &ids[0];

    let response = fixture.post(&format!("/api/v1/orders/{}/start", id)).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["from"], "pending");
    assert_eq!(response.body["to"], "preparing");
    assert_eq!(response.body["order"]["status_label"], "Preparing");

    let response = fixture.post(&format!("/api/v1/orders/{}/pause", id)).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["from"], "preparing");
    assert_eq!(response.body["to"], "pending");
}

#[tokio::test]
async fn test_toggle_flips_between_pending_and_preparing() {
    let fixture = TestFixture::new().await;
    let ids = fixture.seed_orders(1).await;
    let path = format!("/api/v1/orders/{}/toggle", ids[0]);

    let first = fixture.post(&path).await;
    assert_eq!(first.body["to"], "preparing");

    let second = fixture.post(&path).await;
    assert_eq!(second.body["to"], "pending");
}

#[tokio::test]
async fn test_completed_is_terminal() {
    let fixture = TestFixture::new().await;
    let ids = fixture.seed_orders(1).await;
    let id = &ids[0];

    let response = fixture.post(&format!("/api/v1/orders/{}/complete", id)).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["to"], "completed");
    assert_eq!(response.body["order"]["category"], "done");
    assert_eq!(response.body["order"]["actions"], json!([]));

    for action in ["start", "pause", "toggle", "complete"] {
        let response = fixture
            .post(&format!("/api/v1/orders/{}/{}", id, action))
            .await;
        assert_status!(response, StatusCode::OK);
        assert_eq!(response.body["from"], "completed");
        assert_eq!(response.body["to"], "completed");
    }

    let board = fixture.get("/api/v1/orders").await;
    assert_eq!(board.body["counts"]["completed"], 1);
    assert_eq!(board.body["counts"]["pending"], 0);
}

#[tokio::test]
async fn test_action_on_unknown_order_returns_404() {
    let fixture = TestFixture::new().await;
    fixture.seed_orders(1).await;

    let response = fixture.post("/api/v1/orders/missing/complete").await;
    assert_status!(response, StatusCode::NOT_FOUND);

    // Nothing else changed
    let board = fixture.get("/api/v1/orders").await;
    assert_eq!(board.body["counts"]["pending"], 1);
}

#[tokio::test]
async fn test_numbering_continues_after_actions() {
    let fixture = TestFixture::new().await;
    let ids = fixture.seed_orders(2).await;
    fixture
        .post(&format!("/api/v1/orders/{}/complete", ids[0]))
        .await;

    fixture.stream.push_recipe(&fixtures::ramen()).await;

    let response = fixture.get("/api/v1/orders?status=pending").await;
    let numbers: Vec<u64> = response.body["orders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["order_number"].as_u64().unwrap())
        .collect();
    assert_eq!(numbers, vec![102, 103]);
}

// =============================================================================
// Selection
// =============================================================================

#[tokio::test]
async fn test_selection_defaults_to_none() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/api/v1/selection").await;

    assert_status!(response, StatusCode::OK);
    assert!(response.body["selected"].is_null());
}

#[tokio::test]
async fn test_select_and_clear() {
    let fixture = TestFixture::new().await;
    let ids = fixture.seed_orders(2).await;

    let response = fixture
        .put("/api/v1/selection", json!({ "order_id": ids[1] }))
        .await;
    assert_status!(response, StatusCode::NO_CONTENT);

    let response = fixture.get("/api/v1/selection").await;
    assert_eq!(response.body["selected"]["id"], ids[1]);
    assert_eq!(response.body["selected"]["order_label"], "#102");

    let response = fixture.delete("/api/v1/selection").await;
    assert_status!(response, StatusCode::NO_CONTENT);

    let response = fixture.get("/api/v1/selection").await;
    assert!(response.body["selected"].is_null());
}

#[tokio::test]
async fn test_selecting_unknown_id_reads_as_none() {
    let fixture = TestFixture::new().await;
    fixture.seed_orders(1).await;

    let response = fixture
        .put("/api/v1/selection", json!({ "order_id": "ghost" }))
        .await;
    assert_status!(response, StatusCode::NO_CONTENT);

    let response = fixture.get("/api/v1/selection").await;
    assert!(response.body["selected"].is_null());
}

#[tokio::test]
async fn test_malformed_selection_body_is_rejected() {
    let fixture = TestFixture::new().await;

    let response = fixture.put_raw("/api/v1/selection", "{not json").await;

    assert!(response.status.is_client_error());
}

#[tokio::test]
async fn test_completing_selected_order_deselects_after_delay() {
    let fixture = TestFixture::new().await;
    let ids = fixture.seed_orders(1).await;
    let id = &ids[0];

    fixture
        .put("/api/v1/selection", json!({ "order_id": id }))
        .await;
    fixture
        .post(&format!("/api/v1/orders/{}/complete", id))
        .await;

    // Still shown right after completion
    let response = fixture.get("/api/v1/selection").await;
    assert_eq!(response.body["selected"]["status"], "completed");

    tokio::time::sleep(Duration::from_millis(TEST_DESELECT_DELAY_MS * 4)).await;

    let response = fixture.get("/api/v1/selection").await;
    assert!(response.body["selected"].is_null());
}

#[tokio::test]
async fn test_deselect_leaves_newer_selection_alone() {
    let fixture = TestFixture::new().await;
    let ids = fixture.seed_orders(2).await;

    fixture
        .put("/api/v1/selection", json!({ "order_id": ids[0] }))
        .await;
    fixture
        .post(&format!("/api/v1/orders/{}/complete", ids[0]))
        .await;
    // Move the selection before the timer fires
    fixture
        .put("/api/v1/selection", json!({ "order_id": ids[1] }))
        .await;

    tokio::time::sleep(Duration::from_millis(TEST_DESELECT_DELAY_MS * 4)).await;

    let response = fixture.get("/api/v1/selection").await;
    assert_eq!(response.body["selected"]["id"], ids[1]);
}

// =============================================================================
// Live updates
// =============================================================================

#[tokio::test]
async fn test_display_changes_reach_broadcaster() {
    let fixture = TestFixture::new().await;
    let mut rx = fixture.ws_broadcaster.subscribe();

    fixture.stream.push_recipe(&fixtures::panini()).await;
    let board = fixture.get("/api/v1/orders").await;
    let id = board.body["pending"][0]["id"].as_str().unwrap().to_string();
    fixture.post(&format!("/api/v1/orders/{}/start", id)).await;

    let created = serde_json::to_value(rx.recv().await.unwrap()).unwrap();
    assert_eq!(created["type"], "order_created");
    assert_eq!(created["order"]["meal"], "Panini");

    let updated = serde_json::to_value(rx.recv().await.unwrap()).unwrap();
    assert_eq!(updated["type"], "order_updated");
    assert_eq!(updated["order"]["id"], id);
    assert_eq!(updated["to"], "preparing");
}
