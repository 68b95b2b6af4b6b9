use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use deployments_core::error::{ArtifactError, CoreError};
use deployments_db::StoreError;
use serde_json::json;

/// The only message an internal failure ever shows a caller.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `deployments_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure reported by the artifact store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ArtifactError> for AppError {
    fn from(err: ArtifactError) -> Self {
        AppError::Core(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_ERROR_MESSAGE.to_string(),
    )
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - Unique violations (an id that already exists) map to 409.
/// - Everything else is logged and maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    if err.is_unique_violation() {
        return (
            StatusCode::CONFLICT,
            "CONFLICT",
            "An artifact with this id already exists".to_string(),
        );
    }
    tracing::error!(error = %err, "Store error");
    internal()
}
