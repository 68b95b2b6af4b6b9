//! Route definitions for the `/releases` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::releases;
use crate::state::AppState;

/// Routes mounted at `/releases`.
///
/// ```text
/// GET    /        -> list_releases  (?name=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(releases::list_releases))
}
