use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const GIB: f64 = 1_073_741_824.0;

/// One day's usage observation for a single filesystem.
/// Capacity fields are whole gibibytes, rounded from raw byte counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub date:       NaiveDate,
    pub filesystem: String,
    pub total:      u64,
    pub used:       u64,
    pub free:       u64,
    pub pct:        u8,
    /// Change in `used` since the previous recorded day; 0 for the first
    /// entry of a series.
    pub delta:      i64,
}

impl Sample {
    /// Build a sample from raw byte counts, applying the whole-GiB
    /// reduction and the integer percentage policy.
    pub fn from_bytes(
        date: NaiveDate,
        filesystem: &str,
        total_bytes: u64,
        used_bytes: u64,
        free_bytes: u64,
    ) -> Self {
        let total = round_gib(total_bytes);
        let used  = round_gib(used_bytes);
        let free  = round_gib(free_bytes);
        Sample {
            date,
            filesystem: filesystem.to_string(),
            total,
            used,
            free,
            pct: pct_used(used, total),
            delta: 0,
        }
    }
}

/// Round a byte count to whole gibibytes.
pub fn round_gib(bytes: u64) -> u64 {
    (bytes as f64 / GIB).round() as u64
}

/// Integer percentage of capacity in use. 0 for a zero-sized filesystem.
pub fn pct_used(used: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    ((used as f64 / total as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_round_to_nearest_gib() {
        assert_eq!(round_gib(0), 0);
        assert_eq!(round_gib(1 << 30), 1);
        assert_eq!(round_gib((1 << 30) + (1 << 29)), 2);
        assert_eq!(round_gib((1 << 29) - 1), 0);
    }

    #[test]
    fn zero_sized_filesystem_has_zero_pct() {
        assert_eq!(pct_used(0, 0), 0);
        assert_eq!(pct_used(5, 0), 0);
    }

    #[test]
    fn pct_rounds_to_nearest_integer() {
        assert_eq!(pct_used(1, 3), 33);
        assert_eq!(pct_used(2, 3), 67);
        assert_eq!(pct_used(600, 1000), 60);
    }

    #[test]
    fn from_bytes_reduces_to_gib() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let s = Sample::from_bytes(date, "/data", 100 << 30, 60 << 30, 40 << 30);
        assert_eq!((s.total, s.used, s.free, s.pct), (100, 60, 40, 60));
        assert_eq!(s.delta, 0);
    }
}
