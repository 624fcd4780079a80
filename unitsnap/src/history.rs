//! Conversion history, newest first

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Entries kept before the oldest is dropped
pub const MAX_HISTORY: usize = 10;

const CSV_HEADER: &str = "Converter,From,To,Time";

/// One recorded conversion, stored as display text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Converter title without " Converter"
    pub converter: String,
    /// `"{input} {unit key}"`
    pub from: String,
    /// `"{result} {unit key}"`
    pub to: String,
    /// Wall-clock time as `hh:mm AM`
    pub time: String,
}

impl HistoryEntry {
    pub fn new(
        converter: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        time: NaiveTime,
    ) -> Self {
        Self {
            converter: converter.into(),
            from: from.into(),
            to: to.into(),
            time: time.format("%I:%M %p").to_string(),
        }
    }

    fn csv_row(&self) -> String {
        [&self.converter, &self.from, &self.to, &self.time]
            .iter()
            .map(|field| csv_field(field))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Always quoted; embedded quotes are doubled
fn csv_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Bounded list of recent conversions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from stored entries, newest first; extras beyond the cap
    /// are dropped
    pub fn from_entries(entries: impl IntoIterator<Item = HistoryEntry>) -> Self {
        Self { entries: entries.into_iter().take(MAX_HISTORY).collect() }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(MAX_HISTORY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// CSV with a header row, one line per entry, newest first
    pub fn to_csv(&self) -> String {
        std::iter::once(CSV_HEADER.to_string())
            .chain(self.entries.iter().map(HistoryEntry::csv_row))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
