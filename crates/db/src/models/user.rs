//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tally_core::types::{DbId, Timestamp};

/// A user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub display_name: String,
    /// Immutable 6-digit credential, unique across all users. This is the
    /// sole token for re-authentication.
    pub access_code: String,
    pub created_at: Timestamp,
}

/// DTO for registering a new user. The access code is allocated by the
/// store, never supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub display_name: String,
}
