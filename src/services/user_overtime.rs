use std::collections::HashMap;

use chrono::{NaiveDate, SecondsFormat, TimeDelta, Utc};

use crate::domain::analysis::{
    EntryResult, ExcludedEntry, ExclusionReason, ProjectLabel, UserResult, round2,
};
use crate::domain::config::{OvertimeConfig, UserOverrides};
use crate::domain::entry::RawEntry;
use crate::services::daily_allocator::{AllocatedEntry, EntryCost, allocate_day};
use crate::services::entry_normalizer::{NormalizedEntry, normalize, parse_timestamp};

pub const DEFAULT_PROJECT_NAME: &str = "No Project";
pub const DEFAULT_PROJECT_COLOR: &str = "#999999";

/// All raw entries of one user, in input order.
#[derive(Debug, Clone)]
pub struct UserEntries<'a> {
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub entries: Vec<&'a RawEntry>,
}

#[derive(Debug, Clone)]
pub struct UserOutcome {
    pub result: UserResult,
    pub excluded: Vec<ExcludedEntry>,
}

/// Allocates every day of one user independently and totals the result.
///
/// The user's capacity and multiplier are resolved once and apply to all of
/// their days; nothing carries over from one day to the next.
pub fn calculate_user_overtime(
    user: &UserEntries<'_>,
    config: &OvertimeConfig,
    overrides: &UserOverrides,
) -> UserOutcome {
    let capacity = overrides.effective_capacity(&user.user_id, config);
    let multiplier = overrides.effective_multiplier(&user.user_id, config);

    let mut excluded = Vec::new();
    let days = partition_by_day(user, &mut excluded);
    let days_worked = days.len();

    let mut entries = Vec::new();
    let mut total_hours = 0.0;
    let mut overtime_hours = 0.0;
    let mut base_cost = 0.0;
    let mut ot_premium = 0.0;

    for (date, day_entries) in days {
        let day = allocate_day(day_entries, capacity);
        for skipped in day.skipped {
            excluded.push(excluded_entry(user, skipped.raw, ExclusionReason::ZeroDuration));
        }

        for allocated in day.allocated {
            let cost = EntryCost::compute(allocated.split, allocated.entry.rate, multiplier);
            total_hours += allocated.entry.hours;
            overtime_hours += allocated.split.overtime;
            base_cost += cost.base;
            ot_premium += cost.premium;

            let fallback_id = format!("{}-{}-{}", user.user_id, date, entries.len());
            entries.push(entry_result(&allocated, cost, fallback_id));
        }
    }

    UserOutcome {
        result: UserResult {
            user_id: user.user_id.clone(),
            user_name: user.user_name.clone(),
            user_email: user.user_email.clone(),
            multiplier,
            capacity,
            total_hours: round2(total_hours),
            regular_hours: round2(total_hours - overtime_hours),
            overtime_hours: round2(overtime_hours),
            base_cost: round2(base_cost),
            ot_premium: round2(ot_premium),
            total_cost: round2(base_cost + ot_premium),
            entries: newest_first(entries),
            days_worked,
        },
        excluded,
    }
}

// Groups entries by date key in first-seen order; undatable entries are excluded.
fn partition_by_day<'a>(
    user: &UserEntries<'a>,
    excluded: &mut Vec<ExcludedEntry>,
) -> Vec<(NaiveDate, Vec<NormalizedEntry<'a>>)> {
    let mut days: Vec<(NaiveDate, Vec<NormalizedEntry<'a>>)> = Vec::new();
    let mut positions: HashMap<NaiveDate, usize> = HashMap::new();

    for raw in user.entries.iter().copied() {
        let Some(entry) = normalize(raw) else {
            excluded.push(excluded_entry(user, raw, ExclusionReason::UnresolvedDate));
            continue;
        };
        let position = *positions.entry(entry.date).or_insert_with(|| {
            days.push((entry.date, Vec::new()));
            days.len() - 1
        });
        days[position].1.push(entry);
    }
    days
}

fn excluded_entry(user: &UserEntries<'_>, raw: &RawEntry, reason: ExclusionReason) -> ExcludedEntry {
    ExcludedEntry {
        entry_id: raw.entry_id().map(str::to_string),
        user_id: user.user_id.clone(),
        reason,
    }
}

fn entry_result(allocated: &AllocatedEntry<'_>, cost: EntryCost, fallback_id: String) -> EntryResult {
    let entry = &allocated.entry;
    let raw = entry.raw;

    EntryResult {
        entry_id: raw.entry_id().map(str::to_string).unwrap_or(fallback_id),
        date: entry.date,
        start: raw.start().map(str::to_string),
        end: end_timestamp(entry),
        description: raw.description.clone().unwrap_or_default(),
        project: project_label(raw),
        client_name: client_name(raw),
        task_name: task_name(raw),
        tags: tag_names(raw),
        billable: raw.billable.unwrap_or(false),
        duration_hours: round2(entry.hours),
        regular_hours: round2(allocated.split.regular),
        overtime_hours: round2(allocated.split.overtime),
        hourly_rate: round2(entry.rate),
        ot_rate: round2(cost.ot_rate),
        base_amount: round2(cost.base),
        premium_amount: round2(cost.premium),
        total_amount: round2(cost.total),
    }
}

// The provider's end timestamp, or one synthesized from start plus duration.
fn end_timestamp(entry: &NormalizedEntry<'_>) -> Option<String> {
    if let Some(end) = entry.raw.end().filter(|end| !end.is_empty()) {
        return Some(end.to_string());
    }
    let start = entry.start?;
    let millis = (entry.hours * 3_600_000.0).round() as i64;
    let end = start.checked_add_signed(TimeDelta::try_milliseconds(millis)?)?;
    Some(end.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn project_label(raw: &RawEntry) -> ProjectLabel {
    let project = raw.project.as_ref();
    ProjectLabel {
        name: first_non_empty([project.and_then(|project| project.name.as_deref())])
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
        color: first_non_empty([project.and_then(|project| project.color.as_deref())])
            .unwrap_or_else(|| DEFAULT_PROJECT_COLOR.to_string()),
    }
}

fn client_name(raw: &RawEntry) -> String {
    first_non_empty([
        raw.project
            .as_ref()
            .and_then(|project| project.client_name.as_deref()),
        raw.client_name.as_deref(),
        raw.client.as_ref().and_then(|client| client.name.as_deref()),
    ])
    .unwrap_or_default()
}

fn task_name(raw: &RawEntry) -> String {
    first_non_empty([
        raw.task.as_ref().and_then(|task| task.name.as_deref()),
        raw.task_name.as_deref(),
    ])
    .unwrap_or_default()
}

fn tag_names(raw: &RawEntry) -> Vec<String> {
    raw.tags
        .iter()
        .flatten()
        .filter_map(|tag| tag.name.clone())
        .filter(|name| !name.is_empty())
        .collect()
}

fn first_non_empty<const N: usize>(candidates: [Option<&str>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

// Display order: latest start first; entries without a parsable start use
// midnight of their date.
fn newest_first(entries: Vec<EntryResult>) -> Vec<EntryResult> {
    let mut keyed: Vec<(i64, EntryResult)> = entries
        .into_iter()
        .map(|entry| (display_instant(&entry), entry))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
    keyed.into_iter().map(|(_, entry)| entry).collect()
}

fn display_instant(entry: &EntryResult) -> i64 {
    entry
        .start
        .as_deref()
        .and_then(parse_timestamp)
        .map(|start| start.timestamp_millis())
        .unwrap_or_else(|| {
            entry
                .date
                .and_hms_opt(0, 0, 0)
                .map(|midnight| midnight.and_utc().timestamp_millis())
                .unwrap_or(0)
        })
}
