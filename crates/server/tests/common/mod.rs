//! Common test utilities for API testing with a mock recipe stream.
//!
//! This module provides a test fixture that creates an in-process server
//! with a running display loop fed by a [`MockRecipeStream`], enabling
//! end-to-end tests of the HTTP surface without a real event source.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use kitchen_core::{
    create_display_system, testing::MockRecipeStream, Config, DisplayConfig, DisplayHandle,
    DisplayUpdate, RecipeHandler, RecipeStream, ServerConfig, StreamConfig, Subscription,
    UpdateCallback,
};
use kitchen_server::api::WsBroadcaster;

/// Re-export fixtures for test convenience
#[allow(unused_imports)]
pub use kitchen_core::testing::fixtures;

/// Deselect delay used by the fixture, short enough to wait out in tests
pub const TEST_DESELECT_DELAY_MS: u64 = 50;

/// Test fixture for API testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_new_order() {
///     let fixture = TestFixture::new().await;
///     fixture.stream.push_recipe(&fixtures::panini()).await;
///
///     let response = fixture.get("/api/v1/orders").await;
///     assert_eq!(response.body["pending"][0]["order_label"], "#101");
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock recipe stream - push payloads to create orders
    pub stream: Arc<MockRecipeStream>,
    /// Handle to the running display loop
    #[allow(dead_code)]
    pub display: DisplayHandle,
    /// Broadcaster fed by the display loop
    #[allow(dead_code)]
    pub ws_broadcaster: WsBroadcaster,
    /// Keeps the mock subscription alive for the fixture's lifetime
    #[allow(dead_code)]
    subscription: Subscription,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture.
    pub async fn new() -> Self {
        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
                dashboard_dir: None,
            },
            stream: StreamConfig {
                url: "http://127.0.0.1:9/stream".to_string(),
                connect_timeout_secs: 1,
            },
            display: DisplayConfig {
                deselect_delay_ms: TEST_DESELECT_DELAY_MS,
                command_buffer: 64,
            },
        };

        let ws_broadcaster = WsBroadcaster::default();
        let broadcaster_for_callback = ws_broadcaster.clone();
        let callback: UpdateCallback = Arc::new(move |update: &DisplayUpdate| {
            broadcaster_for_callback.display_updated(update);
        });

        let (display, display_loop) = create_display_system(&config.display);
        tokio::spawn(display_loop.with_update_callback(callback).run());

        let stream = Arc::new(MockRecipeStream::new());
        let subscription = stream
            .subscribe(Arc::new(RecipeHandler::new(display.clone())))
            .await;

        let state = Arc::new(kitchen_server::state::AppState::new(
            config,
            display.clone(),
            ws_broadcaster.clone(),
        ));
        let router = kitchen_server::api::create_router(state);

        Self {
            router,
            stream,
            display,
            ws_broadcaster,
            subscription,
        }
    }

    /// Push `count` orders through the stream and return their ids in order.
    #[allow(dead_code)]
    pub async fn seed_orders(&self, count: usize) -> Vec<String> {
        for i in 0..count {
            let recipe = fixtures::recipe(&format!("Dish {}", i + 1), &["Cook"]);
            assert!(self.stream.push_recipe(&recipe).await);
        }
        let response = self.get("/api/v1/orders?status=pending").await;
        response.body["orders"]
            .as_array()
            .expect("orders array")
            .iter()
            .map(|o| o["id"].as_str().expect("order id").to_string())
            .collect()
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request without a body.
    #[allow(dead_code)]
    pub async fn post(&self, path: &str) -> TestResponse {
        self.request("POST", path, None).await
    }

    /// Send a PUT request with JSON body.
    #[allow(dead_code)]
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a DELETE request.
    #[allow(dead_code)]
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a PUT request with raw string body (for testing malformed JSON).
    #[allow(dead_code)]
    pub async fn put_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("PUT")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body_bytes).into()))
        };

        TestResponse { status, body }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
