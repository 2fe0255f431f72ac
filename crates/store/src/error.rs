use tally_core::error::CoreError;

/// Error type for store operations.
///
/// Wraps [`CoreError`] for domain failures (duplicates, missing entities,
/// ownership, validation) so callers can render field-level messages, and
/// passes transport failures through as [`sqlx::Error`] for the generic
/// retry path.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain-level error from `tally-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for store return values.
pub type StoreResult<T> = Result<T, StoreError>;
