/// All database primary keys are SQLite 64-bit rowids.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Maximum accepted length (in characters) for display names, activity
/// names, and participant names, after trimming.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum accepted length (in characters) for score reasons, after trimming.
pub const MAX_REASON_LEN: usize = 500;
