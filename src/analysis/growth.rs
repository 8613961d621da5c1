use crate::models::sample::Sample;
use crate::models::series::{Entry, Series};
use chrono::{Datelike, NaiveDate, Weekday};

/// How many consecutive days feed one rolling-average point.
pub const ROLLING_WINDOW: usize = 7;

/// A normalized entry plus its derived, per-run statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedEntry {
    pub entry: Entry,
    /// Smoothed free space: the value for day d is the mean of `free`
    /// over d..=d+6, the week centered on d+3. None wherever that window
    /// runs off the series or touches a gap.
    pub rolling_avg: Option<f64>,
    pub is_weekend: bool,
}

impl AnalyzedEntry {
    pub fn date(&self) -> NaiveDate { self.entry.date() }
    pub fn sample(&self) -> Option<&Sample> { self.entry.sample() }
    pub fn is_gap(&self) -> bool { self.entry.is_gap() }
}

/// Per-day statistics over a daily-normalized series: day-over-day delta
/// in `used`, the rolling free-space average, and the weekend flag.
pub fn analyze(series: &Series) -> Vec<AnalyzedEntry> {
    let mut entries: Vec<Entry> = series.entries().to_vec();

    // Delta spans gaps: each sample is compared against the last recorded
    // one. The first sample has no baseline and stays at 0.
    let mut prev_used: Option<u64> = None;
    for entry in &mut entries {
        if let Entry::Present(sample) = entry {
            sample.delta = match prev_used {
                Some(prev) => sample.used as i64 - prev as i64,
                None => 0,
            };
            prev_used = Some(sample.used);
        }
    }

    let rolling = rolling_free_avg(&entries);
    entries
        .into_iter()
        .zip(rolling)
        .map(|(entry, rolling_avg)| AnalyzedEntry {
            is_weekend: is_weekend(entry.date()),
            rolling_avg,
            entry,
        })
        .collect()
}

/// Rolling mean of `free`, published at the first day of each 7-day
/// window. Windows cut short by the end of the series or overlapping a
/// gap yield None, never a partial or zero-padded average.
fn rolling_free_avg(entries: &[Entry]) -> Vec<Option<f64>> {
    (0..entries.len())
        .map(|start| {
            let window = entries.get(start..start + ROLLING_WINDOW)?;
            let mut sum = 0u64;
            for entry in window {
                sum += entry.sample()?.free;
            }
            Some(sum as f64 / ROLLING_WINDOW as f64)
        })
        .collect()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalize::normalize;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn sample(d: u32, used: u64, free: u64) -> Sample {
        Sample {
            date: day(d),
            filesystem: "/data".into(),
            total: used + free,
            used,
            free,
            pct: 0,
            delta: 0,
        }
    }

    fn series(samples: Vec<Sample>) -> Series {
        let mut series = Series::new("/data");
        for s in samples {
            series.merge(s);
        }
        series
    }

    #[test]
    fn delta_between_consecutive_days() {
        let analyzed = analyze(&series(vec![sample(1, 100, 900), sample(2, 130, 870)]));
        assert_eq!(analyzed[0].sample().unwrap().delta, 0);
        assert_eq!(analyzed[1].sample().unwrap().delta, 30);
    }

    #[test]
    fn delta_spans_gap_days() {
        let s = normalize(&series(vec![
            sample(1, 100, 900),
            sample(2, 110, 890),
            sample(4, 150, 850),
        ]));
        let analyzed = analyze(&s);
        assert!(analyzed[2].is_gap());
        assert_eq!(analyzed[3].sample().unwrap().delta, 40);
    }

    #[test]
    fn rolling_avg_covers_the_week_ahead() {
        // free runs 10, 20, ..., 100 over ten consecutive days
        let s = series((1..=10).map(|d| sample(d, 0, d as u64 * 10)).collect());
        let analyzed = analyze(&s);

        // value at day 1 averages days 1..=7, at day 4 days 4..=10
        assert_eq!(analyzed[0].rolling_avg, Some(40.0));
        assert_eq!(analyzed[3].rolling_avg, Some(70.0));
        // the last six days have no complete window
        for entry in &analyzed[4..] {
            assert_eq!(entry.rolling_avg, None);
        }
    }

    #[test]
    fn rolling_avg_is_absent_over_gaps() {
        // day 2 missing out of fourteen days
        let s = normalize(&series(
            (1..=14).filter(|d| *d != 2).map(|d| sample(d, 0, 70)).collect(),
        ));
        let analyzed = analyze(&s);

        assert_eq!(analyzed[0].rolling_avg, None); // window covers the gap
        assert_eq!(analyzed[1].rolling_avg, None); // gap day itself
        assert_eq!(analyzed[2].rolling_avg, Some(70.0)); // days 3..=9 are complete
        assert_eq!(analyzed[7].rolling_avg, Some(70.0)); // days 8..=14
        assert_eq!(analyzed[8].rolling_avg, None); // runs off the end
    }

    #[test]
    fn weekends_are_flagged() {
        assert!(!is_weekend(day(7))); // Friday
        assert!(is_weekend(day(8))); // Saturday
        assert!(is_weekend(day(9))); // Sunday
        assert!(!is_weekend(day(10))); // Monday
    }
}
