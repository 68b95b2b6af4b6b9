//! Repository for the `images` table.

use deployments_core::image::{ImageFilter, PersistedImage};
use deployments_core::types::ImageId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::image::ImageRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, meta, meta_artifact, size, modified";

/// Provides CRUD operations for artifact records.
///
/// Writes take a [`PersistedImage`], so a record has already passed
/// validation and had its dependency index rebuilt before any query runs.
pub struct ImageRepo;

impl ImageRepo {
    /// Insert a new record, returning the created row.
    pub async fn create(pool: &PgPool, doc: &PersistedImage) -> Result<ImageRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO images (id, meta, meta_artifact, size, modified) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ImageRow>(&query)
            .bind(doc.id)
            .bind(Json(&doc.meta))
            .bind(Json(&doc.meta_artifact))
            .bind(doc.size)
            .bind(doc.modified)
            .fetch_one(pool)
            .await
    }

    /// Find a record by id.
    pub async fn find_by_id(pool: &PgPool, id: ImageId) -> Result<Option<ImageRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images WHERE id = $1");
        sqlx::query_as::<_, ImageRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List records matching `filter`, newest first.
    ///
    /// The filter is a containment match against `depends_idx`, served by
    /// the GIN index on that expression.
    pub async fn list(pool: &PgPool, filter: &ImageFilter) -> Result<Vec<ImageRow>, sqlx::Error> {
        let entries = filter.required_entries();
        let containment = (!entries.is_empty()).then(|| Json(entries));

        let query = format!(
            "SELECT {COLUMNS} FROM images \
             WHERE ($1::JSONB IS NULL OR meta_artifact -> 'depends_idx' @> $1::JSONB) \
             ORDER BY modified DESC, id"
        );
        sqlx::query_as::<_, ImageRow>(&query)
            .bind(containment)
            .fetch_all(pool)
            .await
    }

    /// List records, optionally restricted to one artifact name.
    ///
    /// Ordered by artifact name, then modification time, so that grouping the
    /// result by name yields releases in name order.
    pub async fn list_by_name(
        pool: &PgPool,
        name: Option<&str>,
    ) -> Result<Vec<ImageRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM images \
             WHERE ($1::TEXT IS NULL OR meta_artifact ->> 'name' = $1) \
             ORDER BY meta_artifact ->> 'name', modified, id"
        );
        sqlx::query_as::<_, ImageRow>(&query)
            .bind(name)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every stored field of an existing record. The id is immutable.
    ///
    /// Returns `None` if no row with the document's id exists.
    pub async fn replace(
        pool: &PgPool,
        doc: &PersistedImage,
    ) -> Result<Option<ImageRow>, sqlx::Error> {
        let query = format!(
            "UPDATE images SET \
                meta = $2, \
                meta_artifact = $3, \
                size = $4, \
                modified = $5 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ImageRow>(&query)
            .bind(doc.id)
            .bind(Json(&doc.meta))
            .bind(Json(&doc.meta_artifact))
            .bind(doc.size)
            .bind(doc.modified)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a record.
    pub async fn delete(pool: &PgPool, id: ImageId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
