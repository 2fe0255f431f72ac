//! User registration and access-code authentication.

use sqlx::SqlitePool;
use tally_core::codes::is_valid_code_format;
use tally_core::error::CoreError;
use tally_core::types::{DbId, MAX_NAME_LEN};
use tally_db::models::user::{CreateUser, User};
use tally_db::repositories::UserRepo;

use crate::codes;
use crate::error::StoreResult;

/// Register a new user. The 6-digit access code is allocated here and is
/// immutable afterwards; it is the user's sole credential.
pub async fn register(pool: &SqlitePool, input: &CreateUser) -> StoreResult<User> {
    let display_name = input.display_name.trim();
    if display_name.is_empty() {
        return Err(CoreError::Validation("display name is required".to_string()).into());
    }
    if display_name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "display name exceeds {MAX_NAME_LEN} characters"
        ))
        .into());
    }

    let access_code = codes::allocate_access_code(pool).await?;
    let user = UserRepo::insert(pool, display_name, &access_code).await?;
    tracing::info!(user_id = user.id, "registered user");
    Ok(user)
}

/// Resolve an access code to its user. Returns `Ok(None)` when no user
/// holds the code; a malformed code is a validation error before any
/// lookup.
pub async fn authenticate(pool: &SqlitePool, access_code: &str) -> StoreResult<Option<User>> {
    let access_code = access_code.trim();
    if !is_valid_code_format(access_code) {
        return Err(
            CoreError::Validation("access code must be 6 digits".to_string()).into(),
        );
    }
    Ok(UserRepo::find_by_access_code(pool, access_code).await?)
}

/// Fetch a user by ID.
pub async fn get(pool: &SqlitePool, id: DbId) -> StoreResult<Option<User>> {
    Ok(UserRepo::find_by_id(pool, id).await?)
}
