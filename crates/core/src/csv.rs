//! CSV roster parsing and the three score report formatters.
//!
//! The rules here are deliberately narrow. Import reads only the first
//! column of each line and tolerates quoted values containing the
//! delimiter. Exports quote only fields that may themselves contain the
//! delimiter: timestamps and free-text reasons are always double-quoted,
//! names and numbers are written bare. Rows are joined with `\n` and no
//! trailing newline is emitted.

use crate::timefmt::format_datetime;
use crate::types::Timestamp;

/// Substrings that mark the first non-blank line as a header row.
const HEADER_MARKERS: [&str; 3] = ["name", "姓名", "名稱"];

/// Placeholder reason emitted for a participant with no recorded scores.
pub const NO_RECORDS_PLACEHOLDER: &str = "尚無分數記錄";

/// Fallback display name when a record's participant cannot be resolved.
pub const UNKNOWN_PARTICIPANT: &str = "未知";

/// UTF-8 byte-order mark expected by spreadsheet imports.
pub const UTF8_BOM: &str = "\u{FEFF}";

/// The report formats offered for download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    ScoreList,
    ParticipantDetail,
    TimeSequence,
}

impl ReportKind {
    /// Label used in the download filename.
    pub fn label(self) -> &'static str {
        match self {
            ReportKind::ScoreList => "分數名單表",
            ReportKind::ParticipantDetail => "個人明細表",
            ReportKind::TimeSequence => "時間序計分表",
        }
    }
}

// ── Import ───────────────────────────────────────────────────────────

/// Parse raw roster text into participant names, in input order.
///
/// Blank lines are skipped. The first surviving line is dropped when it
/// looks like a header. Each remaining line contributes its first field;
/// blank results are dropped silently. Duplicate handling is the batch
/// create operation's job, not the parser's.
pub fn parse_roster(text: &str) -> Vec<String> {
    let mut names = Vec::new();
    for (index, line) in text.lines().filter(|l| !l.trim().is_empty()).enumerate() {
        if index == 0 && is_header_line(line) {
            continue;
        }
        if let Some(name) = leading_field(line) {
            names.push(name);
        }
    }
    names
}

fn is_header_line(line: &str) -> bool {
    let lowered = line.to_lowercase();
    HEADER_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Extract the first CSV field of `line`: either a quoted run (embedded
/// commas allowed) or the run up to the first comma. Surrounding quotes and
/// whitespace are stripped; an empty result is `None`.
fn leading_field(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let raw = match trimmed.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let rest = &trimmed[quote.len_utf8()..];
            match rest.find(quote) {
                Some(end) => &rest[..end],
                // Unterminated quote: take the remainder as-is.
                None => rest,
            }
        }
        _ => trimmed.split(',').next().unwrap_or(""),
    };
    let name = strip_quotes(raw).trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Strip at most one leading and one trailing quote character.
fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix(['"', '\'']).unwrap_or(value);
    value.strip_suffix(['"', '\'']).unwrap_or(value)
}

// ── Export ───────────────────────────────────────────────────────────

/// One participant row of the score-list report.
#[derive(Debug, Clone)]
pub struct ScoreListRow {
    pub name: String,
    pub total: i64,
}

/// One score entry in a participant's history.
#[derive(Debug, Clone)]
pub struct ScoreEntry {
    pub at: Timestamp,
    pub points: i64,
    pub reason: String,
}

/// One resolved row of the time-sequence report.
#[derive(Debug, Clone)]
pub struct SequenceRow {
    pub at: Timestamp,
    pub participant: String,
    pub points: i64,
    pub reason: String,
}

/// Score-list report: `參加者,總分`, one row per participant, sorted by
/// total descending. The sort is stable: ties keep input order.
pub fn score_list_csv(rows: &[ScoreListRow]) -> String {
    let mut sorted: Vec<&ScoreListRow> = rows.iter().collect();
    sorted.sort_by(|a, b| b.total.cmp(&a.total));

    let mut out = String::from("參加者,總分");
    for row in sorted {
        out.push('\n');
        out.push_str(&format!("{},{}", row.name, row.total));
    }
    out
}

/// Participant-detail report: `參加者,時間,分數,原因`, one row per score
/// record for each given participant, in the given record order. A
/// participant with no records still emits exactly one row with an empty
/// timestamp, zero points, and the no-records placeholder.
pub fn participant_detail_csv(entries: &[(String, Vec<ScoreEntry>)]) -> String {
    let mut out = String::from("參加者,時間,分數,原因");
    for (name, records) in entries {
        if records.is_empty() {
            out.push('\n');
            out.push_str(&format!("{name},\"\",0,\"{NO_RECORDS_PLACEHOLDER}\""));
            continue;
        }
        for record in records {
            out.push('\n');
            out.push_str(&format!(
                "{},\"{}\",{},\"{}\"",
                name,
                format_datetime(record.at),
                record.points,
                record.reason
            ));
        }
    }
    out
}

/// Time-sequence report: `時間,參加者,分數,原因`, one row per score record,
/// sorted by timestamp ascending. The sort is stable: ties keep input order.
pub fn time_sequence_csv(rows: &[SequenceRow]) -> String {
    let mut sorted: Vec<&SequenceRow> = rows.iter().collect();
    sorted.sort_by_key(|row| row.at);

    let mut out = String::from("時間,參加者,分數,原因");
    for row in sorted {
        out.push('\n');
        out.push_str(&format!(
            "\"{}\",{},{},\"{}\"",
            format_datetime(row.at),
            row.participant,
            row.points,
            row.reason
        ));
    }
    out
}

/// Prefix export content with the UTF-8 BOM for spreadsheet compatibility.
pub fn with_bom(content: &str) -> String {
    format!("{UTF8_BOM}{content}")
}

/// Download filename: `{activity}_{label}_{YYYY-MM-DD}.csv`.
pub fn export_filename(activity_name: &str, kind: ReportKind, date: Timestamp) -> String {
    format!(
        "{}_{}_{}.csv",
        activity_name,
        kind.label(),
        date.format("%Y-%m-%d")
    )
}
