//! Dependency-light domain logic shared across the tallyboard crates.
//!
//! Shared types, the error taxonomy, join-code generation, timestamp
//! rendering, and the CSV roster/report rules. Nothing in here touches the
//! database; the `tally-store` crate wires these pieces to persistence.

pub mod codes;
pub mod csv;
pub mod error;
pub mod timefmt;
pub mod types;
