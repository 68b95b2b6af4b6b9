/// Failure reported by an [`ArtifactStore`](crate::ArtifactStore).
///
/// The text of these errors is for logs only and must not reach API callers.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Failure from a store that is not backed by sqlx.
    #[error("Store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether the write collided with an existing record (Postgres 23505).
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StoreError::Database(sqlx::Error::Database(db_err)) => {
                db_err.code().as_deref() == Some("23505")
            }
            _ => false,
        }
    }
}
