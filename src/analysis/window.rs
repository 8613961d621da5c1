use super::growth::AnalyzedEntry;
use chrono::{Duration, NaiveDate};

/// Entries whose date falls on or after `today - window_days`, in their
/// original order. Purely a presentation view: the full series is already
/// persisted and analyzed by the time this runs, and the input is never
/// mutated.
pub fn trailing(entries: &[AnalyzedEntry], today: NaiveDate, window_days: u32) -> Vec<AnalyzedEntry> {
    let cutoff = today - Duration::days(i64::from(window_days));
    entries.iter().filter(|entry| entry.date() >= cutoff).cloned().collect()
}

/// Most-recent-first copy for report tables.
pub fn reversed(entries: &[AnalyzedEntry]) -> Vec<AnalyzedEntry> {
    entries.iter().rev().cloned().collect()
}
