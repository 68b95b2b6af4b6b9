#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use deployments_api::config::ServerConfig;
use deployments_api::router::build_app_router;
use deployments_api::state::AppState;
use deployments_core::image::{ImageFilter, ImageRecord, PersistedImage};
use deployments_core::release::{group_into_releases, Release, ReleaseFilter};
use deployments_core::types::ImageId;
use deployments_db::{ArtifactStore, StoreError};

/// Text carried by every [`FailingStore`] error. Must never appear in a
/// response body.
pub const STORE_FAILURE_DETAIL: &str = "database error: connection to 10.0.0.5:5432 refused";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 1,
    }
}

/// Build the full application router around the given store.
///
/// Uses the same builder as `main.rs`, so tests exercise the production
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery).
pub fn build_test_app(store: Arc<dyn ArtifactStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// In-memory [`ArtifactStore`] holding persisted documents.
///
/// Orders release listings like the Postgres store (name, then modified).
#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<Vec<PersistedImage>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Persist a record the way a handler would.
    pub fn seed(&self, record: &mut ImageRecord) {
        let doc = record.to_persisted_document().unwrap();
        self.docs.lock().unwrap().push(doc);
    }

    pub fn documents(&self) -> Vec<PersistedImage> {
        self.docs.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactStore for MemoryStore {
    async fn get_releases(&self, filter: &ReleaseFilter) -> Result<Vec<Release>, StoreError> {
        let mut records: Vec<ImageRecord> = self
            .documents()
            .into_iter()
            .map(ImageRecord::from)
            .filter(|r| filter.matches(r))
            .collect();
        records.sort_by(|a, b| {
            a.name()
                .cmp(b.name())
                .then_with(|| a.modified().cmp(&b.modified()))
        });
        Ok(group_into_releases(records))
    }

    async fn insert_image(&self, doc: &PersistedImage) -> Result<(), StoreError> {
        let mut docs = self.docs.lock().unwrap();
        if docs.iter().any(|d| d.id == doc.id) {
            return Err(StoreError::Backend(format!("duplicate id {}", doc.id)));
        }
        docs.push(doc.clone());
        Ok(())
    }

    async fn find_image(&self, id: ImageId) -> Result<Option<ImageRecord>, StoreError> {
        Ok(self
            .documents()
            .into_iter()
            .find(|d| d.id == id)
            .map(ImageRecord::from))
    }

    async fn list_images(&self, filter: &ImageFilter) -> Result<Vec<ImageRecord>, StoreError> {
        let mut docs: Vec<_> = self
            .documents()
            .into_iter()
            .filter(|d| filter.matches(d))
            .collect();
        docs.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(docs.into_iter().map(ImageRecord::from).collect())
    }

    async fn update_image(&self, doc: &PersistedImage) -> Result<bool, StoreError> {
        let mut docs = self.docs.lock().unwrap();
        match docs.iter_mut().find(|d| d.id == doc.id) {
            Some(existing) => {
                *existing = doc.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_image(&self, id: ImageId) -> Result<bool, StoreError> {
        let mut docs = self.docs.lock().unwrap();
        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// [`ArtifactStore`] whose every call fails.
pub struct FailingStore;

impl FailingStore {
    fn fail<T>() -> Result<T, StoreError> {
        Err(StoreError::Backend(STORE_FAILURE_DETAIL.to_string()))
    }
}

#[async_trait]
impl ArtifactStore for FailingStore {
    async fn get_releases(&self, _filter: &ReleaseFilter) -> Result<Vec<Release>, StoreError> {
        Self::fail()
    }

    async fn insert_image(&self, _doc: &PersistedImage) -> Result<(), StoreError> {
        Self::fail()
    }

    async fn find_image(&self, _id: ImageId) -> Result<Option<ImageRecord>, StoreError> {
        Self::fail()
    }

    async fn list_images(&self, _filter: &ImageFilter) -> Result<Vec<ImageRecord>, StoreError> {
        Self::fail()
    }

    async fn update_image(&self, _doc: &PersistedImage) -> Result<bool, StoreError> {
        Self::fail()
    }

    async fn delete_image(&self, _id: ImageId) -> Result<bool, StoreError> {
        Self::fail()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Self::fail()
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
