//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use mediahub_api::{AppState, build_app};
use mediahub_core::config::AppConfig;
use mediahub_storage::Stores;
use mediahub_storage::providers::{MemoryCmsMirror, MemoryObjectStore, MemoryRecordStore};

/// Password configured for aircheck writes in tests.
pub const ADMIN_PASSWORD: &str = "test-admin-secret";

/// Test application context over in-memory stores.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    pub records: Arc<MemoryRecordStore>,
    pub objects: Arc<MemoryObjectStore>,
    pub mirror: Arc<MemoryCmsMirror>,
}

impl TestApp {
    /// Empty stores, mirror enabled.
    pub fn new() -> Self {
        Self::with_stores(
            MemoryRecordStore::new(),
            MemoryObjectStore::new(),
            MemoryCmsMirror::new(),
        )
    }

    /// Seeded record store, everything else empty.
    pub fn with_records(records: MemoryRecordStore) -> Self {
        Self::with_stores(records, MemoryObjectStore::new(), MemoryCmsMirror::new())
    }

    /// Explicit stores.
    pub fn with_stores(
        records: MemoryRecordStore,
        objects: MemoryObjectStore,
        mirror: MemoryCmsMirror,
    ) -> Self {
        let mut config = AppConfig::default();
        config.admin.password = Some(ADMIN_PASSWORD.to_string());

        let records = Arc::new(records);
        let objects = Arc::new(objects);
        let mirror = Arc::new(mirror);
        let stores = Stores::new(records.clone(), objects.clone(), mirror.clone());

        Self {
            router: build_app(AppState::new(config, stores)),
            records,
            objects,
            mirror,
        }
    }

    /// Serve the router on an ephemeral local port and return the API base
    /// URL.
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let router = self.router.clone();
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });
        format!("http://{addr}/api")
    }

    /// Send a JSON request.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        self.request_with_headers(method, path, body, &[]).await
    }

    /// Send a request whose body is passed through untouched.
    pub async fn request_raw(&self, method: &str, path: &str, body: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Send a JSON request with extra headers.
    pub async fn request_with_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// `n` media rows with ids `1..=n`.
pub fn media_rows(n: i64) -> Vec<Value> {
    (1..=n)
        .map(|i| {
            serde_json::json!({
                "id": i,
                "title": format!("Spot {i}"),
                "media_url": format!("https://res.cloudinary.com/demo/video/upload/v1/spot{i}.mp4"),
                "folder_path": ""
            })
        })
        .collect()
}
