#![allow(dead_code)]

use anyhow::{anyhow, Result};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use futures::future::BoxFuture;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

use gatera::infra::memory::MemoryStore;
use gatera::infra::store::{KvStore, SharedStore};
use gatera::AppState;

pub const NAMESPACE: &str = "cat-post";
pub const SHARE_REGION: &str = "Patagonia";

// ---------------------------------------------------------------------------
// FlakyStore: in-memory store with switchable failures
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    pub fail_list: AtomicBool,
    pub fail_get: AtomicBool,
    pub fail_set: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl FlakyStore {
    /// Write under an arbitrary key, ignoring injected failures.
    pub async fn set_raw(&self, key: &str, value: &str) {
        self.inner
            .set(key, value.to_string())
            .await
            .expect("raw store write failed");
    }

    fn check(flag: &AtomicBool, op: &str) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            Err(anyhow!("injected {} failure", op))
        } else {
            Ok(())
        }
    }
}

impl KvStore for FlakyStore {
    fn list<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>>> {
        Box::pin(async move {
            Self::check(&self.fail_list, "list")?;
            self.inner.list(prefix).await
        })
    }

    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>>> {
        Box::pin(async move {
            Self::check(&self.fail_get, "get")?;
            self.inner.get(key).await
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            Self::check(&self.fail_set, "set")?;
            self.inner.set(key, value).await
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            Self::check(&self.fail_delete, "delete")?;
            self.inner.delete(key).await
        })
    }

    fn ping(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move { Self::check(&self.fail_get, "ping") })
    }
}

pub fn fail(flag: &AtomicBool, on: bool) {
    flag.store(on, Ordering::SeqCst);
}

// ---------------------------------------------------------------------------
// TestApp: one fresh store and router per test
// ---------------------------------------------------------------------------

pub struct TestApp {
    router: Router,
    pub state: AppState,
    pub store: Arc<FlakyStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    body_bytes: bytes::Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body_bytes).unwrap_or(Value::Null)
    }

    pub fn error_message(&self) -> String {
        self.json()["error"].as_str().unwrap_or("").to_string()
    }
}

pub fn app() -> TestApp {
    let store = Arc::new(FlakyStore::default());
    let shared: SharedStore = store.clone();
    let state = AppState::new(shared, NAMESPACE, SHARE_REGION);
    let router = gatera::http::router(state.clone());

    TestApp {
        router,
        state,
        store,
    }
}

impl TestApp {
    // ------------------------------------------------------------------
    // Low-level request helper
    // ------------------------------------------------------------------
    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder()
            .method(method)
            .uri(path)
            .header("host", "localhost");

        let request = if let Some(body) = body {
            builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap()
        } else {
            builder.body(Body::empty()).unwrap()
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot failed");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to collect body")
            .to_bytes();

        TestResponse { status, body_bytes }
    }

    // ------------------------------------------------------------------
    // Convenience HTTP helpers
    // ------------------------------------------------------------------
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path, None).await
    }

    pub async fn post_json(&self, path: &str, body: Value) -> TestResponse {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request(Method::POST, path, None).await
    }

    pub async fn put_json(&self, path: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Method::DELETE, path, None).await
    }

    // ------------------------------------------------------------------
    // Test data helpers
    // ------------------------------------------------------------------

    /// Publish a post through the API. Returns the created record.
    pub async fn create_post(&self, title: &str, media_type: &str, media_url: &str) -> Value {
        let resp = self
            .post_json(
                "/posts",
                json!({
                    "title": title,
                    "description": "Un gato de la estepa",
                    "location": "Bariloche",
                    "catName": "Mishi",
                    "mediaType": media_type,
                    "mediaUrl": media_url,
                    "tags": "nieve, montaña"
                }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "create failed: {}", resp.error_message());
        resp.json()
    }

    /// Write a raw record straight into the store, bypassing the repository.
    pub async fn put_raw(&self, id: &str, payload: &str) {
        self.store
            .set_raw(&format!("{}:{}", NAMESPACE, id), payload)
            .await;
    }

    pub async fn list_ids(&self) -> Vec<String> {
        let resp = self.get("/posts").await;
        assert_eq!(resp.status, StatusCode::OK);
        resp.json()["items"]
            .as_array()
            .expect("items array")
            .iter()
            .map(|item| item["id"].as_str().unwrap().to_string())
            .collect()
    }
}

/// A stored record in the legacy shape written by earlier clients.
pub fn legacy_record(id: &str, title: &str, media_type: &str, timestamp: i64) -> String {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "location": "El Calafate",
        "catName": "Tigre",
        "mediaType": media_type,
        "mediaUrl": format!("http://x/{}.jpg", id),
        "tags": "",
        "timestamp": timestamp,
        "likes": 0,
        "shares": 0,
        "views": 0,
        "comments": []
    })
    .to_string()
}
