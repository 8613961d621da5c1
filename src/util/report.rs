use crate::analysis::growth::AnalyzedEntry;
use crate::analysis::project::{Exhaustion, GrowthStats};
use chrono::{Duration, NaiveDate};

/// Shared header above every filesystem section.
pub fn banner(today: NaiveDate) -> String {
    let mut out = String::new();
    out.push_str("═══════════════════════════════════════════════════════════════\n");
    out.push_str(&format!("  Filesystem growth report — {}\n", today));
    out.push_str("═══════════════════════════════════════════════════════════════\n\n");
    out
}

/// Render one filesystem's section: recent days (newest first, weekends
/// starred) and the growth summary underneath. All capacities are GiB.
pub fn generate(
    filesystem: &str,
    entries: &[AnalyzedEntry],
    stats: &GrowthStats,
    today: NaiveDate,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("── {} ───────────────────────────────────────────\n", filesystem));
    out.push_str(&format!(
        "  {:<10} {:<3} {:>7} {:>7} {:>7} {:>5} {:>7} {:>8}\n",
        "Date", "Day", "Total", "Used", "Free", "Pct", "Delta", "7d avg"
    ));
    for entry in entries {
        let weekday = entry.date().format("%a").to_string();
        match entry.sample() {
            Some(s) => {
                let avg = entry
                    .rolling_avg
                    .map(|a| format!("{a:.1}"))
                    .unwrap_or_else(|| "-".to_string());
                out.push_str(&format!(
                    "  {:<10} {:<3} {:>7} {:>7} {:>7} {:>4}% {:>+7} {:>8}{}\n",
                    s.date.to_string(),
                    weekday,
                    s.total,
                    s.used,
                    s.free,
                    s.pct,
                    s.delta,
                    avg,
                    if entry.is_weekend { "  *" } else { "" },
                ));
            }
            None => {
                out.push_str(&format!(
                    "  {:<10} {:<3} {:>7} {:>7} {:>7} {:>5} {:>7} {:>8}  (no sample)\n",
                    entry.date().to_string(),
                    weekday,
                    "-", "-", "-", "-", "-", "-",
                ));
            }
        }
    }

    out.push('\n');
    out.push_str(&format!("  Mean daily delta:  {}\n", fmt_rate(stats.mean_delta)));
    out.push_str(&format!("  Mean growth rate:  {}\n", fmt_rate(stats.mean_positive_delta)));
    match stats.days_to_exhaustion {
        Exhaustion::Days(days) => {
            let when = today + Duration::days(days as i64);
            out.push_str(&format!("  Projected full:    in {} day(s), around {}\n", days, when));
        }
        Exhaustion::Never => {
            out.push_str("  Projected full:    never at the current growth rate\n");
        }
    }
    out
}

fn fmt_rate(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:+.1} GiB/day"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{growth, normalize, project, window};
    use crate::models::sample::Sample;
    use crate::models::series::Series;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    #[test]
    fn section_shows_gaps_and_the_projection() {
        let mut series = Series::new("/data");
        for (d, used) in [(1, 100), (2, 105), (4, 115)] {
            let mut sample = Sample {
                date: day(d),
                filesystem: "/data".into(),
                total: 1000,
                used,
                free: 1000 - used,
                pct: 0,
                delta: 0,
            };
            sample.delta = series.delta_for(sample.date, sample.used);
            series.merge(sample);
        }
        let analyzed = growth::analyze(&normalize::normalize(&series));
        let recent = window::reversed(&analyzed);
        let stats = project::project(&analyzed);

        let section = generate("/data", &recent, &stats, day(4));
        assert!(section.contains("/data"));
        assert!(section.contains("(no sample)"));
        assert!(section.contains("Projected full:"));
        // newest row first
        let first_row = section.lines().nth(2).unwrap();
        assert!(first_row.contains("2026-08-04"));
    }

    #[test]
    fn never_sentinel_renders_without_numbers() {
        let stats = GrowthStats {
            mean_delta: Some(-2.0),
            mean_positive_delta: None,
            days_to_exhaustion: Exhaustion::Never,
        };
        let section = generate("/data", &[], &stats, day(1));
        assert!(section.contains("never at the current growth rate"));
        assert!(section.contains("Mean growth rate:  -"));
    }
}
