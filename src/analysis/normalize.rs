use crate::models::series::{Entry, Series};
use chrono::Duration;
use tracing::warn;

/// Reindex a series to a strict daily cadence over its full date range.
///
/// Every day between the first and last recorded date gets exactly one
/// entry; days with no sample become explicit `Entry::Gap` markers, each
/// reported as a warning when first detected. A gap never turns into a
/// zero row.
pub fn normalize(series: &Series) -> Series {
    let (first, last) = match (series.first_date(), series.last_date()) {
        (Some(first), Some(last)) => (first, last),
        _ => return series.clone(),
    };

    let mut days = Vec::with_capacity((last - first).num_days() as usize + 1);
    let mut recorded = series.entries().iter().peekable();
    let mut day = first;
    while day <= last {
        match recorded.next_if(|entry| entry.date() == day) {
            Some(entry) => days.push(entry.clone()),
            None => {
                warn!("{}: no sample recorded for {}", series.filesystem(), day);
                days.push(Entry::Gap(day));
            }
        }
        day += Duration::days(1);
    }

    Series::from_sorted(series.filesystem().to_string(), days)
}
