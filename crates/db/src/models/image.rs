//! Row model for the `images` table.

use deployments_core::artifact::{ArtifactMetadata, PersistedArtifact};
use deployments_core::image::{ImageDescription, ImageRecord, PersistedImage};
use deployments_core::types::{ImageId, Timestamp};
use serde::Deserialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `images` table.
#[derive(Debug, Clone, FromRow)]
pub struct ImageRow {
    pub id: ImageId,
    pub meta: Json<ImageDescription>,
    pub meta_artifact: Json<PersistedArtifact>,
    pub size: i64,
    pub modified: Timestamp,
}

impl From<ImageRow> for PersistedImage {
    fn from(row: ImageRow) -> Self {
        Self {
            id: row.id,
            meta: row.meta.0,
            meta_artifact: row.meta_artifact.0,
            size: row.size,
            modified: row.modified,
        }
    }
}

impl From<ImageRow> for ImageRecord {
    fn from(row: ImageRow) -> Self {
        PersistedImage::from(row).into()
    }
}

/// DTO for creating a record from artifact metadata.
///
/// Uses the flat API field names. `id` is generated when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateImage {
    #[serde(default)]
    pub id: Option<ImageId>,
    #[serde(flatten)]
    pub meta: ImageDescription,
    #[serde(flatten)]
    pub meta_artifact: ArtifactMetadata,
    #[serde(default)]
    pub size: i64,
}

impl CreateImage {
    pub fn into_record(self) -> ImageRecord {
        ImageRecord::new(
            self.id.unwrap_or_else(uuid::Uuid::new_v4),
            self.meta,
            self.meta_artifact,
            self.size,
        )
    }
}

/// DTO for editing a record. Only the user description is editable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateImage {
    pub description: Option<String>,
}
