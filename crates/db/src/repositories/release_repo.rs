//! Release listing over the `images` table.

use deployments_core::image::ImageRecord;
use deployments_core::release::{group_into_releases, Release, ReleaseFilter};
use sqlx::PgPool;

use crate::repositories::ImageRepo;

/// Groups stored artifact records into releases.
pub struct ReleaseRepo;

impl ReleaseRepo {
    /// All releases, or only the one named by `filter`.
    ///
    /// Returns an empty list when nothing matches. A query failure is returned
    /// as-is; no partial result is produced.
    pub async fn get_releases(
        pool: &PgPool,
        filter: &ReleaseFilter,
    ) -> Result<Vec<Release>, sqlx::Error> {
        let rows = ImageRepo::list_by_name(pool, filter.name.as_deref()).await?;
        Ok(group_into_releases(rows.into_iter().map(ImageRecord::from)))
    }
}
