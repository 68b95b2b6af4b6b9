//! The store capability consumed by the HTTP layer.
//!
//! Handlers only see `dyn ArtifactStore`, so tests can substitute an
//! in-memory implementation for the Postgres one.

use async_trait::async_trait;
use deployments_core::image::{ImageFilter, ImageRecord, PersistedImage};
use deployments_core::release::{Release, ReleaseFilter};
use deployments_core::types::ImageId;

use crate::error::StoreError;
use crate::repositories::{ImageRepo, ReleaseRepo};
use crate::DbPool;

/// Persistence operations for artifact records and release listings.
///
/// Writes accept an already-produced [`PersistedImage`]; implementations
/// never validate or index on their own.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Stored records grouped into releases, optionally for one name only.
    async fn get_releases(&self, filter: &ReleaseFilter) -> Result<Vec<Release>, StoreError>;

    async fn insert_image(&self, doc: &PersistedImage) -> Result<(), StoreError>;

    async fn find_image(&self, id: ImageId) -> Result<Option<ImageRecord>, StoreError>;

    /// Records matching `filter`, newest `modified` first.
    async fn list_images(&self, filter: &ImageFilter) -> Result<Vec<ImageRecord>, StoreError>;

    /// Overwrite an existing record. Returns `false` if it does not exist.
    async fn update_image(&self, doc: &PersistedImage) -> Result<bool, StoreError>;

    /// Returns `false` if the record does not exist.
    async fn delete_image(&self, id: ImageId) -> Result<bool, StoreError>;

    /// Confirm the backing store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// [`ArtifactStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgArtifactStore {
    pool: DbPool,
}

impl PgArtifactStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArtifactStore for PgArtifactStore {
    async fn get_releases(&self, filter: &ReleaseFilter) -> Result<Vec<Release>, StoreError> {
        let releases = ReleaseRepo::get_releases(&self.pool, filter).await?;
        tracing::debug!(
            count = releases.len(),
            name = ?filter.name,
            "Loaded releases"
        );
        Ok(releases)
    }

    async fn insert_image(&self, doc: &PersistedImage) -> Result<(), StoreError> {
        ImageRepo::create(&self.pool, doc).await?;
        Ok(())
    }

    async fn find_image(&self, id: ImageId) -> Result<Option<ImageRecord>, StoreError> {
        let row = ImageRepo::find_by_id(&self.pool, id).await?;
        Ok(row.map(ImageRecord::from))
    }

    async fn list_images(&self, filter: &ImageFilter) -> Result<Vec<ImageRecord>, StoreError> {
        let rows = ImageRepo::list(&self.pool, filter).await?;
        Ok(rows.into_iter().map(ImageRecord::from).collect())
    }

    async fn update_image(&self, doc: &PersistedImage) -> Result<bool, StoreError> {
        let row = ImageRepo::replace(&self.pool, doc).await?;
        Ok(row.is_some())
    }

    async fn delete_image(&self, id: ImageId) -> Result<bool, StoreError> {
        Ok(ImageRepo::delete(&self.pool, id).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
