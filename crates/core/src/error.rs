use crate::dependency::IndexingError;
use crate::types::ImageId;
use crate::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: ImageId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure to produce a persisted document from an artifact record.
///
/// Either variant aborts document production; no partial document exists.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Indexing(#[from] IndexingError),
}

impl From<ArtifactError> for CoreError {
    fn from(err: ArtifactError) -> Self {
        match err {
            ArtifactError::Validation(errors) => CoreError::Validation(errors.to_string()),
            // A dependency map that cannot be indexed is a server-side defect.
            ArtifactError::Indexing(err) => CoreError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{FieldViolation, Rule};
    use assert_matches::assert_matches;

    #[test]
    fn validation_maps_to_core_validation() {
        let errors = ValidationErrors::from(vec![FieldViolation::new("name", Rule::Required)]);
        let core: CoreError = ArtifactError::Validation(errors).into();
        assert_matches!(core, CoreError::Validation(msg) if msg == "name: required");
    }

    #[test]
    fn indexing_maps_to_core_internal() {
        let err = IndexingError::NestedMap {
            key: "os".to_string(),
        };
        let core: CoreError = ArtifactError::Indexing(err).into();
        assert_matches!(core, CoreError::Internal(_));
    }
}
