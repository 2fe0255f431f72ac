//! Allocation of unique join PINs and user access codes.
//!
//! The generator in `tally-core::codes` guarantees shape (6 digits,
//! non-trivial); this module adds uniqueness against the live namespace:
//! draw, check, redraw on collision, bounded by a retry budget.

use sqlx::SqlitePool;
use tally_core::codes::generate_code;
use tally_core::error::CoreError;
use tally_db::repositories::{ActivityRepo, UserRepo};

use crate::error::StoreResult;

/// Redraw budget before declaring a namespace exhausted. A safety valve:
/// with roughly 900,000 usable codes per namespace this does not trigger at
/// realistic scale.
pub const MAX_CODE_ATTEMPTS: u32 = 100;

/// Allocate a join PIN no activity uses, hidden activities included.
pub async fn allocate_pin(pool: &SqlitePool) -> StoreResult<String> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = {
            let mut rng = rand::rng();
            generate_code(&mut rng)
        };
        if !ActivityRepo::pin_exists(pool, &code).await? {
            return Ok(code);
        }
    }
    Err(CoreError::CodeSpaceExhausted {
        namespace: "activity pin",
        attempts: MAX_CODE_ATTEMPTS,
    }
    .into())
}

/// Allocate an access code no user holds.
pub async fn allocate_access_code(pool: &SqlitePool) -> StoreResult<String> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = {
            let mut rng = rand::rng();
            generate_code(&mut rng)
        };
        if !UserRepo::access_code_exists(pool, &code).await? {
            return Ok(code);
        }
    }
    Err(CoreError::CodeSpaceExhausted {
        namespace: "user access code",
        attempts: MAX_CODE_ATTEMPTS,
    }
    .into())
}
