use super::sample::Sample;
use chrono::NaiveDate;

/// One day in a series: either a recorded sample or a marker for a day the
/// collector never ran. A gap carries no numbers and must stay out of
/// every aggregate.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Present(Sample),
    Gap(NaiveDate),
}

impl Entry {
    pub fn date(&self) -> NaiveDate {
        match self {
            Entry::Present(sample) => sample.date,
            Entry::Gap(date) => *date,
        }
    }

    pub fn sample(&self) -> Option<&Sample> {
        match self {
            Entry::Present(sample) => Some(sample),
            Entry::Gap(_) => None,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, Entry::Gap(_))
    }
}

/// Date-ordered history for one filesystem: strictly increasing dates, at
/// most one entry per calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    filesystem: String,
    entries: Vec<Entry>,
}

impl Series {
    pub fn new(filesystem: &str) -> Self {
        Series { filesystem: filesystem.to_string(), entries: Vec::new() }
    }

    /// Rebuild from stored rows. Rows are reordered by date; a duplicated
    /// date is returned as the error.
    pub fn from_entries(filesystem: &str, mut entries: Vec<Entry>) -> Result<Self, NaiveDate> {
        entries.sort_by_key(Entry::date);
        for pair in entries.windows(2) {
            if pair[0].date() == pair[1].date() {
                return Err(pair[0].date());
            }
        }
        Ok(Series { filesystem: filesystem.to_string(), entries })
    }

    /// Entries must already be date-sorted and distinct.
    pub(crate) fn from_sorted(filesystem: String, entries: Vec<Entry>) -> Self {
        Series { filesystem, entries }
    }

    /// Insert `sample` keeping dates sorted. An entry already recorded for
    /// that day, sample or gap, is replaced rather than duplicated.
    pub fn merge(&mut self, sample: Sample) {
        match self.entries.binary_search_by_key(&sample.date, Entry::date) {
            Ok(at) => self.entries[at] = Entry::Present(sample),
            Err(at) => self.entries.insert(at, Entry::Present(sample)),
        }
    }

    /// Change in `used` a sample for `date` would carry, measured against
    /// the last recorded day before it. 0 when there is no earlier sample.
    pub fn delta_for(&self, date: NaiveDate, used: u64) -> i64 {
        match self.last_before(date) {
            Some(prev) => used as i64 - prev.used as i64,
            None => 0,
        }
    }

    /// Most recent non-gap entry strictly before `date`.
    pub fn last_before(&self, date: NaiveDate) -> Option<&Sample> {
        self.entries
            .iter()
            .rev()
            .filter_map(Entry::sample)
            .find(|sample| sample.date < date)
    }

    pub fn filesystem(&self) -> &str { &self.filesystem }
    pub fn entries(&self) -> &[Entry] { &self.entries }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn first_date(&self) -> Option<NaiveDate> { self.entries.first().map(Entry::date) }
    pub fn last_date(&self) -> Option<NaiveDate> { self.entries.last().map(Entry::date) }
}
