//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use xflow_core::config::AppConfig;
use xflow_core::traits::clock::ManualClock;
use xflow_service::{AdmissionService, TokenIssuer};
use xflow_store::memory::MemoryOrderedSetStore;
use xflow_store::{QueueStore, StoreManager};

/// Test application context backed by the in-memory store.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Admission service shared with the router
    pub admission: Arc<AdmissionService>,
    /// Clock driving arrival timestamps
    pub clock: Arc<ManualClock>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let store = StoreManager::from_provider(Arc::new(MemoryOrderedSetStore::new()));
        let clock = Arc::new(ManualClock::new(1_700_000_000));
        let admission = Arc::new(AdmissionService::new(
            QueueStore::new(Arc::new(store)),
            TokenIssuer::new(&config.token).expect("Failed to build token issuer"),
            clock.clone(),
        ));

        let app_state = xflow_api::AppState {
            config: Arc::new(config.clone()),
            admission: Arc::clone(&admission),
        };

        Self {
            router: xflow_api::build_router(app_state),
            admission,
            clock,
            config,
        }
    }

    /// Send a request with an empty body
    pub async fn request(&self, method: &str, path: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }

    /// Register `user_id` in `queue` and return the reported rank
    pub async fn register(&self, queue: &str, user_id: i64) -> i64 {
        let resp = self
            .request(
                "POST",
                &format!("/api/v1/queue?queue={queue}&user_id={user_id}"),
            )
            .await;
        assert_eq!(resp.status, StatusCode::OK, "register failed: {}", resp.text);
        resp.body["rank"].as_i64().expect("rank missing")
    }
}

/// Test response wrapper
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body, `Null` when the body is not JSON
    pub body: Value,
    /// Raw body text
    pub text: String,
}
