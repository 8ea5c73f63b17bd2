//! Trade journal presentation
//!
//! Entries and screenshots are stored by the backend. The worker shortens
//! notes for the list view and orders entries newest first.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{DeskError, Result};
use crate::types::{NewTradeEntry, TradeEntry};

/// Journal row sent to the page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalRow {
    #[serde(flatten)]
    pub entry: TradeEntry,
    pub note_preview: String,
}

/// First `max_chars` characters of `note`, with `...` when cut
pub fn preview(note: &str, max_chars: usize) -> String {
    match note.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &note[..cut]),
        None => note.to_string(),
    }
}

fn parsed_date(entry: &TradeEntry) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&entry.date)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Build list rows, newest first; undated entries sink to the bottom
pub fn rows(mut entries: Vec<TradeEntry>, max_chars: usize) -> Vec<JournalRow> {
    entries.sort_by_key(|e| std::cmp::Reverse(parsed_date(e)));

    entries
        .into_iter()
        .map(|entry| JournalRow {
            note_preview: preview(&entry.note, max_chars),
            entry,
        })
        .collect()
}

/// Check a JSON submission and stamp it with `now` when undated
pub fn prepare_entry(mut entry: NewTradeEntry, now: DateTime<Utc>) -> Result<NewTradeEntry> {
    if entry.note.trim().is_empty() {
        return Err(DeskError::Validation("Trade note is required".into()));
    }

    match entry.date.as_deref() {
        None => entry.date = Some(now.to_rfc3339()),
        Some(date) if DateTime::parse_from_rfc3339(date).is_err() => {
            return Err(DeskError::Validation(format!("Invalid date {date}")));
        }
        Some(_) => {}
    }

    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(id: u32, note: &str, date: &str) -> TradeEntry {
        TradeEntry {
            id: serde_json::json!(id),
            note: note.to_string(),
            date: date.to_string(),
            screenshot_url: None,
        }
    }

    #[test]
    fn test_preview_truncates_long_notes() {
        let long = "a".repeat(150);
        let short = preview(&long, 100);
        assert_eq!(short.len(), 103);
        assert!(short.ends_with("..."));

        assert_eq!(preview("Took EUR/USD long at London open", 100), "Took EUR/USD long at London open");
        assert_eq!(preview(&"b".repeat(100), 100), "b".repeat(100));
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let note = "€".repeat(5);
        assert_eq!(preview(&note, 3), "€€€...");
    }

    #[test]
    fn test_rows_newest_first() {
        let rows = rows(
            vec![
                entry(1, "first", "2024-01-02T08:00:00Z"),
                entry(2, "undated", "yesterday"),
                entry(3, "latest", "2024-03-05T14:30:00+01:00"),
            ],
            100,
        );
        let ids: Vec<_> = rows.iter().map(|r| r.entry.id.clone()).collect();
        assert_eq!(ids, vec![serde_json::json!(3), serde_json::json!(1), serde_json::json!(2)]);
    }

    #[test]
    fn test_row_wire_format() {
        let rows = rows(vec![entry(9, "note", "2024-01-02T08:00:00Z")], 100);
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["notePreview"], "note");
        assert_eq!(json["id"], 9);
        assert!(json.get("screenshotUrl").is_none());
    }

    #[test]
    fn test_prepare_entry() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let stamped = prepare_entry(NewTradeEntry { note: "Faded the spike".into(), date: None }, now).unwrap();
        assert_eq!(stamped.date.as_deref(), Some("2024-05-01T12:00:00+00:00"));

        assert!(prepare_entry(NewTradeEntry { note: "  ".into(), date: None }, now).is_err());
        assert!(prepare_entry(NewTradeEntry { note: "x".into(), date: Some("soon".into()) }, now).is_err());
    }
}
