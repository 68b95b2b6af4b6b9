pub mod artifacts;
pub mod health;
pub mod releases;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /releases                                        list (?name=)
///
/// /artifacts                                       list (?device_type=), create
/// /artifacts/{id}                                  get, update description, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/releases", releases::router())
        .nest("/artifacts", artifacts::router())
}
