//! Route definitions for the `/artifacts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::artifacts;
use crate::state::AppState;

/// Routes mounted at `/artifacts`.
///
/// ```text
/// GET    /        -> list_artifacts  (?device_type=)
/// POST   /        -> create_artifact
/// GET    /{id}    -> get_artifact
/// PUT    /{id}    -> update_artifact
/// DELETE /{id}    -> delete_artifact
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(artifacts::list_artifacts).post(artifacts::create_artifact),
        )
        .route(
            "/{id}",
            get(artifacts::get_artifact)
                .put(artifacts::update_artifact)
                .delete(artifacts::delete_artifact),
        )
}
