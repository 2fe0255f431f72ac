//! Fixed human-readable timestamp rendering.
//!
//! Every report and the detail views use the same zero-padded format so
//! exported files line up with what the UI shows.

use crate::types::Timestamp;

/// `YYYY年MM月DD日 HH:MM`.
pub fn format_datetime(at: Timestamp) -> String {
    at.format("%Y年%m月%d日 %H:%M").to_string()
}

/// `YYYY年MM月DD日`.
pub fn format_date(at: Timestamp) -> String {
    at.format("%Y年%m月%d日").to_string()
}
