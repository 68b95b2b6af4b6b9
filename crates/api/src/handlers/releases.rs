//! Handlers for the `/releases` resource.

use axum::extract::{Query, State};
use axum::Json;
use deployments_core::release::Release;

use crate::error::AppResult;
use crate::query::ReleaseQuery;
use crate::state::AppState;

/// GET /api/v1/releases
///
/// List releases, optionally restricted to one artifact name (`?name=`).
/// Always a JSON array, empty when nothing matches. Store failures surface
/// only as a generic 500.
pub async fn list_releases(
    State(state): State<AppState>,
    Query(params): Query<ReleaseQuery>,
) -> AppResult<Json<Vec<Release>>> {
    let filter = params.into_filter();
    let releases = state.store.get_releases(&filter).await?;

    tracing::debug!(count = releases.len(), name = ?filter.name, "Listed releases");

    Ok(Json(releases))
}
