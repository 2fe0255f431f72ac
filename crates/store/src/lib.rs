//! Validated entity operations over the tallyboard database.
//!
//! This is the layer front ends call. Every mutation validates its inputs,
//! enforces uniqueness and ownership before writing, and returns typed
//! errors the UI can render inline. Reads that may legitimately miss
//! (PIN lookup, access-code authentication) return `Ok(None)` instead of
//! erroring.

pub mod activities;
pub mod codes;
pub mod error;
pub mod guard;
pub mod memberships;
pub mod participants;
pub mod reports;
pub mod scoreboard;
pub mod scores;
pub mod users;

pub use error::{StoreError, StoreResult};
