use chrono::{Datelike, Duration, NaiveDate, Weekday};
use clap::ValueEnum;
use thiserror::Error;

/// Returns the ISO-8601 week label (`YYYY-Www`) of `date`.
///
/// The year is the one of the Thursday in the same Monday-based week, so early
/// January days can belong to the previous year's last week and late December
/// days to week 1 of the next year.
pub fn iso_week_key(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("{:04}-W{:02}", week.year(), week.week())
}

/// Monday and Sunday of the week named by an [`iso_week_key`] label.
pub fn iso_week_bounds(week_key: &str) -> Option<(NaiveDate, NaiveDate)> {
    let (year, week) = week_key.split_once("-W")?;
    let year: i32 = year.parse().ok()?;
    let week: u32 = week.parse().ok()?;
    let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)?;
    Some((monday, monday + Duration::days(6)))
}

/// Human label of an ISO week, e.g. `Dec 1 - Dec 7`.
pub fn format_week_range(week_key: &str) -> Option<String> {
    let (monday, sunday) = iso_week_bounds(week_key)?;
    Some(format!(
        "{} - {}",
        monday.format("%b %-d"),
        sunday.format("%b %-d")
    ))
}

#[derive(Error, Debug, PartialEq)]
pub enum DateRangeError {
    #[error("invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("start date {start} must not be after end date {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
}

/// Inclusive date range of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// The default report window: the 30 days before `today`, up to `today`.
    pub fn last_30_days(today: NaiveDate) -> Self {
        Self {
            start: today - Duration::days(30),
            end: today,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RangePreset {
    Today,
    ThisWeek,
    LastMonth,
}

impl RangePreset {
    pub fn resolve(self, today: NaiveDate) -> DateRange {
        match self {
            RangePreset::Today => DateRange {
                start: today,
                end: today,
            },
            RangePreset::ThisWeek => {
                let days_since_monday = today.weekday().num_days_from_monday() as i64;
                DateRange {
                    start: today - Duration::days(days_since_monday),
                    end: today,
                }
            }
            RangePreset::LastMonth => {
                let first_of_this_month = today.with_day(1).unwrap_or(today);
                let end = first_of_this_month - Duration::days(1);
                let start = end.with_day(1).unwrap_or(end);
                DateRange { start, end }
            }
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, DateRangeError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| DateRangeError::InvalidDate(value.to_string()))
}
