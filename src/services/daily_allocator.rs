//! Splits one user's day of work into regular and overtime hours.
//!
//! The day's capacity is a single pool consumed in start-time order: the
//! earliest entries are regular until the pool is empty, everything after
//! that is overtime, whichever entry happens to cross the threshold.

use crate::services::entry_normalizer::NormalizedEntry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourSplit {
    pub regular: f64,
    pub overtime: f64,
}

impl HourSplit {
    /// Splits `entry_hours` given the hours already worked earlier that day.
    pub fn allocate(entry_hours: f64, accumulated: f64, capacity: f64) -> Self {
        let remaining_capacity = (capacity - accumulated).max(0.0);
        let regular = entry_hours.min(remaining_capacity);
        let overtime = (entry_hours - regular).max(0.0);
        Self { regular, overtime }
    }

    pub fn total(&self) -> f64 {
        self.regular + self.overtime
    }
}

/// Cost of one entry. Base pays every hour at the plain rate; the premium is
/// the extra `rate * (multiplier - 1)` paid on overtime hours only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryCost {
    pub ot_rate: f64,
    pub base: f64,
    pub premium: f64,
    pub total: f64,
}

impl EntryCost {
    pub fn compute(split: HourSplit, rate: f64, multiplier: f64) -> Self {
        let base = split.total() * rate;
        let premium = split.overtime * rate * (multiplier - 1.0);
        Self {
            ot_rate: rate * multiplier,
            base,
            premium,
            total: base + premium,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AllocatedEntry<'a> {
    pub entry: NormalizedEntry<'a>,
    pub split: HourSplit,
}

#[derive(Debug, Clone, Default)]
pub struct DayAllocation<'a> {
    /// Allocated entries in start-time order.
    pub allocated: Vec<AllocatedEntry<'a>>,
    /// Entries of the day that had no hours to allocate.
    pub skipped: Vec<NormalizedEntry<'a>>,
}

/// Allocates one day of one user's entries against `capacity` hours.
///
/// Entries are walked in ascending start time; entries without a start time
/// count as starting at the epoch and therefore go first.
pub fn allocate_day<'a>(mut entries: Vec<NormalizedEntry<'a>>, capacity: f64) -> DayAllocation<'a> {
    entries.sort_by_key(|entry| entry.start_millis());

    let mut day = DayAllocation::default();
    let mut accumulated = 0.0;
    for entry in entries {
        if entry.hours <= 0.0 {
            day.skipped.push(entry);
            continue;
        }

        let split = HourSplit::allocate(entry.hours, accumulated, capacity);
        accumulated += entry.hours;
        day.allocated.push(AllocatedEntry { entry, split });
    }
    day
}
