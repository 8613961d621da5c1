use crate::error::HistoryError;
use crate::models::sample::Sample;
use crate::models::series::{Entry, Series};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Recorded histories for every tracked filesystem, keyed by mount path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    series: BTreeMap<String, Series>,
}

impl History {
    pub fn series_mut(&mut self, filesystem: &str) -> &mut Series {
        self.series
            .entry(filesystem.to_string())
            .or_insert_with(|| Series::new(filesystem))
    }

    pub fn get(&self, filesystem: &str) -> Option<&Series> {
        self.series.get(filesystem)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Series)> {
        self.series.iter()
    }
}

/// One filesystem-day in the stored table. Gap days keep their numeric
/// columns null; a gap is a marker, not a zero observation.
#[derive(Debug, Serialize, Deserialize)]
struct Row {
    filesystem: String,
    date:       NaiveDate,
    total:      Option<u64>,
    used:       Option<u64>,
    free:       Option<u64>,
    pct:        Option<u8>,
    delta:      Option<i64>,
    #[serde(default)]
    gap:        bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Persisted {
    rows: Vec<Row>,
}

/// Read the history table. A missing file is the normal first-run state
/// and loads as an empty history; anything unparsable is corrupt and
/// aborts the run before any write happens.
pub fn load(path: &Path) -> Result<History, HistoryError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(History::default()),
        Err(err) => {
            return Err(HistoryError::Read { path: path.to_path_buf(), source: err })
        }
    };

    let persisted: Persisted =
        serde_json::from_str(&text).map_err(|err| corrupt(path, err.to_string()))?;

    let mut grouped: BTreeMap<String, Vec<Entry>> = BTreeMap::new();
    for row in persisted.rows {
        let (filesystem, entry) = entry_from_row(row).map_err(|reason| corrupt(path, reason))?;
        grouped.entry(filesystem).or_default().push(entry);
    }

    let mut series = BTreeMap::new();
    for (filesystem, entries) in grouped {
        let rebuilt = Series::from_entries(&filesystem, entries).map_err(|date| {
            corrupt(path, format!("{filesystem}: more than one row for {date}"))
        })?;
        series.insert(filesystem, rebuilt);
    }
    Ok(History { series })
}

/// Write the whole table through a temp file and rename, so a crash
/// mid-write never destroys the previous valid history.
pub fn persist(history: &History, path: &Path) -> Result<(), HistoryError> {
    let mut rows = Vec::new();
    for (filesystem, series) in history.iter() {
        for entry in series.entries() {
            rows.push(row_from_entry(filesystem, entry));
        }
    }

    let json = serde_json::to_string_pretty(&Persisted { rows }).map_err(|err| {
        write_error(path, std::io::Error::new(ErrorKind::Other, err))
    })?;

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json).map_err(|err| write_error(path, err))?;
    fs::rename(&tmp, path).map_err(|err| write_error(path, err))
}

fn entry_from_row(row: Row) -> Result<(String, Entry), String> {
    if row.gap {
        return Ok((row.filesystem, Entry::Gap(row.date)));
    }
    match (row.total, row.used, row.free, row.pct) {
        (Some(total), Some(used), Some(free), Some(pct)) => {
            let filesystem = row.filesystem.clone();
            let sample = Sample {
                date: row.date,
                filesystem: row.filesystem,
                total,
                used,
                free,
                pct,
                delta: row.delta.unwrap_or(0),
            };
            Ok((filesystem, Entry::Present(sample)))
        }
        _ => Err(format!(
            "{} {}: sample row with missing columns",
            row.filesystem, row.date
        )),
    }
}

fn row_from_entry(filesystem: &str, entry: &Entry) -> Row {
    match entry {
        Entry::Present(sample) => Row {
            filesystem: filesystem.to_string(),
            date:  sample.date,
            total: Some(sample.total),
            used:  Some(sample.used),
            free:  Some(sample.free),
            pct:   Some(sample.pct),
            delta: Some(sample.delta),
            gap:   false,
        },
        Entry::Gap(date) => Row {
            filesystem: filesystem.to_string(),
            date:  *date,
            total: None,
            used:  None,
            free:  None,
            pct:   None,
            delta: None,
            gap:   true,
        },
    }
}

fn corrupt(path: &Path, reason: String) -> HistoryError {
    HistoryError::Corrupt { path: path.to_path_buf(), reason }
}

fn write_error(path: &Path, source: std::io::Error) -> HistoryError {
    HistoryError::Write { path: path.to_path_buf(), source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalize::normalize;
    use crate::models::sample::pct_used;
    use tempfile::TempDir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn sample(filesystem: &str, d: u32, used: u64) -> Sample {
        Sample {
            date: day(d),
            filesystem: filesystem.into(),
            total: 1000,
            used,
            free: 1000 - used,
            pct: pct_used(used, 1000),
            delta: 0,
        }
    }

    #[test]
    fn missing_file_loads_as_empty_history() {
        let tmp = TempDir::new().expect("tempdir");
        let history = load(&tmp.path().join("history.json")).unwrap();
        assert_eq!(history, History::default());
    }

    #[test]
    fn round_trips_samples_and_gaps_exactly() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("history.json");

        let mut history = History::default();
        let series = history.series_mut("/data");
        series.merge(sample("/data", 1, 100));
        series.merge(sample("/data", 4, 160));
        *series = normalize(series);
        history.series_mut("/srv").merge(sample("/srv", 2, 30));

        persist(&history, &path).unwrap();
        let reloaded = load(&path).unwrap();
        assert_eq!(reloaded, history);
        assert_eq!(reloaded.get("/data").unwrap().entries().len(), 4);
    }

    #[test]
    fn unparsable_file_is_corrupt() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("history.json");
        fs::write(&path, "this is not a history table").unwrap();
        match load(&path) {
            Err(HistoryError::Corrupt { .. }) => {}
            other => panic!("expected corrupt history, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_days_are_corrupt() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("history.json");
        let row = r#"{"filesystem":"/data","date":"2026-08-01","total":10,"used":5,"free":5,"pct":50,"delta":0,"gap":false}"#;
        fs::write(&path, format!(r#"{{"rows":[{row},{row}]}}"#)).unwrap();
        match load(&path) {
            Err(HistoryError::Corrupt { reason, .. }) => {
                assert!(reason.contains("2026-08-01"));
            }
            other => panic!("expected corrupt history, got {other:?}"),
        }
    }

    #[test]
    fn sample_row_without_numbers_is_corrupt() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("history.json");
        let row = r#"{"filesystem":"/data","date":"2026-08-01","total":null,"used":null,"free":null,"pct":null,"delta":null,"gap":false}"#;
        fs::write(&path, format!(r#"{{"rows":[{row}]}}"#)).unwrap();
        assert!(matches!(load(&path), Err(HistoryError::Corrupt { .. })));
    }

    #[test]
    fn persist_creates_parents_and_leaves_no_temp_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("nested").join("dir").join("history.json");

        let mut history = History::default();
        history.series_mut("/data").merge(sample("/data", 1, 100));
        persist(&history, &path).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
        assert_eq!(load(&path).unwrap(), history);
    }

    #[test]
    fn persist_replaces_the_previous_table() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("history.json");

        let mut history = History::default();
        history.series_mut("/data").merge(sample("/data", 1, 100));
        persist(&history, &path).unwrap();

        history.series_mut("/data").merge(sample("/data", 2, 130));
        persist(&history, &path).unwrap();

        assert_eq!(load(&path).unwrap().get("/data").unwrap().entries().len(), 2);
    }
}
