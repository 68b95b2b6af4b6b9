use std::sync::Arc;

use deployments_db::ArtifactStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Artifact persistence. Postgres in production, in-memory in tests.
    pub store: Arc<dyn ArtifactStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
