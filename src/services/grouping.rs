//! Re-slices finished per-entry results along other dimensions.
//!
//! Every dimension but `user` goes through the same fold: key each entry,
//! sum its rounded regular hours, overtime hours and amount into a bucket,
//! sort the buckets, then append a totals row. Allocation is never re-run.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use crate::domain::analysis::{AnalysisResult, EntryResult, UserResult};
use crate::domain::calendar::iso_week_key;
use crate::domain::grouping::{GroupBy, GroupedSummary, SummaryRow, UserRowDetails};

pub const NO_CLIENT_LABEL: &str = "(No Client)";
pub const NO_PROJECT_LABEL: &str = "(No Project)";
pub const NO_TASK_LABEL: &str = "(No Task)";
pub const TOTALS_LABEL: &str = "Total";

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Bucket {
    regular_hours: f64,
    overtime_hours: f64,
    total_amount: f64,
}

impl Bucket {
    fn add(&mut self, entry: &EntryResult) {
        self.regular_hours += entry.regular_hours;
        self.overtime_hours += entry.overtime_hours;
        self.total_amount += entry.total_amount;
    }
}

/// Builds the grouped view of `analysis` for one dimension.
pub fn group_analysis(analysis: &AnalysisResult, group_by: GroupBy) -> GroupedSummary {
    let entries = analysis.entries().map(|(_, entry)| entry);
    let rows = match group_by {
        GroupBy::User => return group_by_user(&analysis.users),
        GroupBy::Client => fold_rows(entries, |entry| label_or(&entry.client_name, NO_CLIENT_LABEL)),
        GroupBy::Project => fold_rows(entries, |entry| label_or(&entry.project.name, NO_PROJECT_LABEL)),
        GroupBy::Task => fold_rows(entries, |entry| label_or(&entry.task_name, NO_TASK_LABEL)),
        GroupBy::Date => fold_rows(entries, |entry| entry.date.format("%Y-%m-%d").to_string()),
        GroupBy::Week => fold_rows(entries, |entry| iso_week_key(entry.date)),
    };

    match group_by {
        GroupBy::Date | GroupBy::Week => finish(group_by, rows, latest_label_first),
        _ => finish(group_by, rows, largest_amount_first),
    }
}

// `YYYY-MM-DD` and `YYYY-Www` labels sort chronologically as plain strings.
fn latest_label_first(a: &SummaryRow, b: &SummaryRow) -> Ordering {
    b.label.cmp(&a.label)
}

fn largest_amount_first(a: &SummaryRow, b: &SummaryRow) -> Ordering {
    b.total_amount.total_cmp(&a.total_amount)
}

/// Users sorted by total hours, each row carrying the user's capacity over
/// the days they worked and their cost split.
fn group_by_user(users: &[UserResult]) -> GroupedSummary {
    let rows = users
        .iter()
        .map(|user| {
            SummaryRow::new(
                user.user_name.clone(),
                user.regular_hours,
                user.overtime_hours,
                user.total_cost,
            )
            .with_user_details(UserRowDetails {
                capacity_hours: user.capacity * user.days_worked as f64,
                daily_capacity: user.capacity,
                base_amount: user.base_cost,
                premium_amount: user.ot_premium,
            })
        })
        .collect();
    finish(GroupBy::User, rows, |a, b| b.total_hours.total_cmp(&a.total_hours))
}

/// Folds entries into one row per key, in the order keys are first seen.
fn fold_rows<'a, K, I, F>(entries: I, key_of: F) -> Vec<SummaryRow>
where
    K: Eq + Hash + Clone + Into<String>,
    I: IntoIterator<Item = &'a EntryResult>,
    F: Fn(&EntryResult) -> K,
{
    let mut buckets: Vec<(K, Bucket)> = Vec::new();
    let mut positions: HashMap<K, usize> = HashMap::new();

    for entry in entries {
        let key = key_of(entry);
        let position = *positions.entry(key.clone()).or_insert_with(|| {
            buckets.push((key, Bucket::default()));
            buckets.len() - 1
        });
        buckets[position].1.add(entry);
    }

    buckets
        .into_iter()
        .map(|(key, bucket)| {
            SummaryRow::new(key, bucket.regular_hours, bucket.overtime_hours, bucket.total_amount)
        })
        .collect()
}

/// Sorts the rows and appends the totals row.
fn finish<F>(group_by: GroupBy, mut rows: Vec<SummaryRow>, order: F) -> GroupedSummary
where
    F: FnMut(&SummaryRow, &SummaryRow) -> Ordering,
{
    rows.sort_by(order);
    let totals = totals_row(&rows);
    GroupedSummary {
        group_by,
        rows,
        totals,
    }
}

fn totals_row(rows: &[SummaryRow]) -> SummaryRow {
    let totals = SummaryRow::new(
        TOTALS_LABEL,
        rows.iter().map(|row| row.regular_hours).sum(),
        rows.iter().map(|row| row.overtime_hours).sum(),
        rows.iter().map(|row| row.total_amount).sum(),
    );

    let details: Option<Vec<UserRowDetails>> = rows.iter().map(|row| row.user).collect();
    match details {
        Some(details) if !details.is_empty() => totals.with_user_details(UserRowDetails {
            capacity_hours: details.iter().map(|detail| detail.capacity_hours).sum(),
            daily_capacity: 0.0,
            base_amount: details.iter().map(|detail| detail.base_amount).sum(),
            premium_amount: details.iter().map(|detail| detail.premium_amount).sum(),
        }),
        _ => totals,
    }
}

fn label_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
