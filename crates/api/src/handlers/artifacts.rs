//! Handlers for the `/artifacts` resource.
//!
//! Every write goes through `ImageRecord::to_persisted_document` first, so a
//! record that fails validation or dependency indexing never reaches the
//! store.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use deployments_core::error::CoreError;
use deployments_core::image::{ImageDescription, ImageRecord};
use deployments_core::types::ImageId;
use deployments_db::models::image::{CreateImage, UpdateImage};

use crate::error::{AppError, AppResult};
use crate::query::ArtifactQuery;
use crate::state::AppState;

/// GET /api/v1/artifacts
///
/// List artifact records, newest first. `?device_type=` restricts the list
/// to artifacts whose dependency index names that device type.
pub async fn list_artifacts(
    State(state): State<AppState>,
    Query(params): Query<ArtifactQuery>,
) -> AppResult<Json<Vec<ImageRecord>>> {
    let records = state.store.list_images(&params.into_filter()).await?;
    Ok(Json(records))
}

/// POST /api/v1/artifacts
///
/// Create a record from artifact metadata. Returns 400 with every violated
/// rule when validation fails.
pub async fn create_artifact(
    State(state): State<AppState>,
    Json(input): Json<CreateImage>,
) -> AppResult<impl IntoResponse> {
    let mut record = input.into_record();
    let doc = record.to_persisted_document()?;
    state.store.insert_image(&doc).await?;

    tracing::info!(
        artifact_id = %record.id(),
        name = %record.name(),
        size = record.size(),
        "Artifact created",
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/artifacts/{id}
pub async fn get_artifact(
    State(state): State<AppState>,
    Path(id): Path<ImageId>,
) -> AppResult<Json<ImageRecord>> {
    let record = state
        .store
        .find_image(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(record))
}

/// PUT /api/v1/artifacts/{id}
///
/// Replace the user description. The record is re-validated and its
/// modification time stamped before it is written back.
pub async fn update_artifact(
    State(state): State<AppState>,
    Path(id): Path<ImageId>,
    Json(input): Json<UpdateImage>,
) -> AppResult<Json<ImageRecord>> {
    let mut record = state
        .store
        .find_image(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    record.set_description(ImageDescription {
        description: input.description,
    });
    let doc = record.to_persisted_document()?;

    if !state.store.update_image(&doc).await? {
        return Err(not_found(id));
    }

    tracing::info!(artifact_id = %id, "Artifact updated");

    Ok(Json(record))
}

/// DELETE /api/v1/artifacts/{id}
pub async fn delete_artifact(
    State(state): State<AppState>,
    Path(id): Path<ImageId>,
) -> AppResult<StatusCode> {
    if state.store.delete_image(id).await? {
        tracing::info!(artifact_id = %id, "Artifact deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

fn not_found(id: ImageId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Artifact",
        id,
    })
}
