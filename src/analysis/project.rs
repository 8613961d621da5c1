use super::growth::AnalyzedEntry;

/// Growth statistics reduced from a report window.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthStats {
    /// Mean of every recorded day-over-day delta in the window.
    pub mean_delta: Option<f64>,
    /// Mean of the non-negative deltas only; None when the window holds
    /// no non-negative delta at all.
    pub mean_positive_delta: Option<f64>,
    pub days_to_exhaustion: Exhaustion,
}

/// Projected time until free space reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exhaustion {
    /// Full in this many days at the mean positive growth rate.
    Days(u64),
    /// Not filling: no positive growth observed in the window.
    Never,
}

/// Reduce a windowed analyzed series (ascending date order) to growth
/// statistics. Gap days stay out of every mean; an empty or all-shrinking
/// window projects `Exhaustion::Never` rather than dividing by anything.
pub fn project(entries: &[AnalyzedEntry]) -> GrowthStats {
    let deltas: Vec<i64> = entries
        .iter()
        .filter_map(AnalyzedEntry::sample)
        .map(|sample| sample.delta)
        .collect();
    let positive: Vec<i64> = deltas.iter().copied().filter(|delta| *delta >= 0).collect();

    let mean_delta = mean(&deltas);
    let mean_positive_delta = mean(&positive);

    let latest_free = entries
        .iter()
        .rev()
        .find_map(AnalyzedEntry::sample)
        .map(|sample| sample.free);

    let days_to_exhaustion = match (latest_free, mean_positive_delta) {
        (Some(free), Some(rate)) if rate > 0.0 => {
            Exhaustion::Days((free as f64 / rate).floor() as u64)
        }
        _ => Exhaustion::Never,
    };

    GrowthStats { mean_delta, mean_positive_delta, days_to_exhaustion }
}

fn mean(values: &[i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<i64>() as f64 / values.len() as f64)
}
