//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for creates/updates where callers submit data

pub mod activity;
pub mod membership;
pub mod participant;
pub mod score;
pub mod user;
