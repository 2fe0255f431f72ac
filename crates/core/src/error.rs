use crate::types::DbId;

/// Domain error taxonomy.
///
/// Duplicates, missing entities, and ownership rejections are ordinary
/// outcomes the UI renders inline; only transport failures (carried
/// separately by the store layer) warrant a generic error boundary.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Duplicate {field}")]
    Duplicate { field: &'static str },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Code space exhausted for {namespace} after {attempts} attempts")]
    CodeSpaceExhausted {
        namespace: &'static str,
        attempts: u32,
    },
}
