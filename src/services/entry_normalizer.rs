//! Turns the provider's loosely typed entries into hours, rates and dates.
//!
//! Nothing here fails: whatever cannot be resolved becomes zero (duration,
//! rate) or `None` (date), and callers decide how to account for it.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::domain::entry::{HourlyRate, RawEntry};

const SECONDS_PER_HOUR: f64 = 3600.0;
const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const MINOR_UNITS_PER_MAJOR: f64 = 100.0;

static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("duration pattern is valid")
});

/// An entry with its derived values, ready for allocation.
#[derive(Debug, Clone)]
pub struct NormalizedEntry<'a> {
    pub raw: &'a RawEntry,
    pub date: NaiveDate,
    pub start: Option<DateTime<FixedOffset>>,
    pub hours: f64,
    pub rate: f64,
}

impl<'a> NormalizedEntry<'a> {
    /// Start instant in epoch milliseconds; entries without one sort first.
    pub fn start_millis(&self) -> i64 {
        self.start.map(|start| start.timestamp_millis()).unwrap_or(0)
    }
}

/// Normalizes `entry`, or returns `None` when it has no usable date key.
pub fn normalize(entry: &RawEntry) -> Option<NormalizedEntry<'_>> {
    let date = date_key(entry)?;
    Some(NormalizedEntry {
        raw: entry,
        date,
        start: entry.start().and_then(parse_timestamp),
        hours: duration_hours(entry),
        rate: hourly_rate(entry),
    })
}

/// Duration in hours, resolved from (in order) the numeric seconds field, the
/// ISO-8601 duration string, or the start/end pair.
pub fn duration_hours(entry: &RawEntry) -> f64 {
    if let Some(seconds) = entry.duration {
        return non_negative(seconds / SECONDS_PER_HOUR);
    }

    let Some(interval) = entry.time_interval.as_ref() else {
        return 0.0;
    };

    if let Some(text) = interval.duration.as_deref().filter(|text| !text.is_empty()) {
        if let Some(hours) = parse_iso_duration(text) {
            return hours;
        }
    }

    match (interval.start.as_deref(), interval.end.as_deref()) {
        (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => {
            match (parse_timestamp(start), parse_timestamp(end)) {
                (Some(start), Some(end)) => {
                    let millis = (end - start).num_milliseconds() as f64;
                    non_negative(millis / MILLIS_PER_HOUR)
                }
                _ => 0.0,
            }
        }
        _ => 0.0,
    }
}

/// Hourly rate in major currency units: the entry's own rate, else the
/// project's, else zero. A zero entry rate is a real rate and is kept.
pub fn hourly_rate(entry: &RawEntry) -> f64 {
    if let Some(amount) = entry.hourly_rate.as_ref().and_then(|rate| rate.amount) {
        return to_major_units(amount);
    }

    entry
        .project
        .as_ref()
        .and_then(|project| project.hourly_rate.as_ref())
        .and_then(|rate: &HourlyRate| rate.amount)
        .filter(|amount| *amount != 0.0)
        .map(to_major_units)
        .unwrap_or(0.0)
}

/// The calendar day of the entry: the first ten characters of its start
/// timestamp, taken literally (no time zone conversion).
pub fn date_key(entry: &RawEntry) -> Option<NaiveDate> {
    let start = entry.start()?;
    let prefix = start.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Parses `PT[nH][nM][nS]` into fractional hours. Missing parts count as zero.
pub fn parse_iso_duration(text: &str) -> Option<f64> {
    let captures = ISO_DURATION.captures(text)?;
    let part = |index: usize| {
        captures
            .get(index)
            .and_then(|value| value.as_str().parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    Some(non_negative(part(1) + part(2) / 60.0 + part(3) / SECONDS_PER_HOUR))
}

/// RFC 3339, `+hhmm` offsets, or no offset at all (read as UTC).
pub fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc().fixed_offset())
        })
}

fn to_major_units(amount: f64) -> f64 {
    non_negative(amount / MINOR_UNITS_PER_MAJOR)
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
