use std::io;
use std::path::Path;

use thiserror::Error;

use crate::domain::analysis::AnalysisResult;
use crate::domain::calendar::{DateRange, format_week_range};
use crate::domain::config::DEFAULT_DAILY_THRESHOLD;
use crate::domain::grouping::{GroupBy, GroupedSummary};
use crate::services::entry_normalizer::parse_timestamp;
use crate::services::grouping::group_analysis;

#[derive(Error, Debug)]
pub enum CsvExportError {
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write csv: {0}")]
    Io(#[from] io::Error),
}

/// What one CSV file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvLayout {
    /// One row per group of the given dimension.
    Summary(GroupBy),
    /// One row per time entry.
    Detailed,
}

const USER_SUMMARY_HEADERS: [&str; 9] = [
    "User Name",
    "Capacity (hrs)",
    "Regular Hours",
    "Overtime Hours",
    "Total Hours",
    "Utilization %",
    "Base Amount",
    "OT Premium",
    "Total Amount",
];

const DETAILED_HEADERS: [&str; 17] = [
    "User Name",
    "Date",
    "Start Time",
    "End Time",
    "Project",
    "Client",
    "Task",
    "Tags",
    "Description",
    "Duration (hrs)",
    "Regular Hours",
    "Overtime Hours",
    "Hourly Rate",
    "OT Rate",
    "Base Amount",
    "OT Premium",
    "Total Amount",
];

pub fn default_file_name(range: &DateRange) -> String {
    format!(
        "Overtime_Report_{}_to_{}.csv",
        range.start.format("%Y-%m-%d"),
        range.end.format("%Y-%m-%d")
    )
}

pub fn export_csv_file<P: AsRef<Path>>(
    path: P,
    analysis: &AnalysisResult,
    layout: CsvLayout,
) -> Result<(), CsvExportError> {
    let file = std::fs::File::create(path)?;
    write_csv(file, analysis, layout)
}

pub fn write_csv<W: io::Write>(writer: W, analysis: &AnalysisResult, layout: CsvLayout) -> Result<(), CsvExportError> {
    match layout {
        CsvLayout::Summary(GroupBy::User) => write_user_summary_csv(writer, analysis),
        CsvLayout::Summary(group_by) => write_grouped_csv(writer, &group_analysis(analysis, group_by)),
        CsvLayout::Detailed => write_detailed_csv(writer, analysis),
    }
}

/// Writes one row per user, in report order, with hours and amounts summed
/// from the user's entries and utilization taken against one day's capacity.
pub fn write_user_summary_csv<W: io::Write>(writer: W, analysis: &AnalysisResult) -> Result<(), CsvExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(USER_SUMMARY_HEADERS)?;

    for user in &analysis.users {
        let capacity = if user.capacity > 0.0 {
            user.capacity
        } else {
            DEFAULT_DAILY_THRESHOLD
        };
        let regular: f64 = user.entries.iter().map(|entry| entry.regular_hours).sum();
        let overtime: f64 = user.entries.iter().map(|entry| entry.overtime_hours).sum();
        let base: f64 = user.entries.iter().map(|entry| entry.base_amount).sum();
        let premium: f64 = user.entries.iter().map(|entry| entry.premium_amount).sum();
        let amount: f64 = user.entries.iter().map(|entry| entry.total_amount).sum();
        let total = regular + overtime;
        let utilization = (total / capacity * 100.0).round();

        wtr.write_record([
            user.user_name.clone(),
            capacity.to_string(),
            fixed2(regular),
            fixed2(overtime),
            fixed2(total),
            utilization.to_string(),
            fixed2(base),
            fixed2(premium),
            fixed2(amount),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the rows of a non-user dimension; week rows gain a date range column.
pub fn write_grouped_csv<W: io::Write>(writer: W, summary: &GroupedSummary) -> Result<(), CsvExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    let is_week = summary.group_by == GroupBy::Week;

    let mut headers = vec![summary.group_by.heading()];
    if is_week {
        headers.push("Date Range");
    }
    headers.extend(["Regular Hours", "Overtime Hours", "Total Hours", "Total Amount"]);
    wtr.write_record(&headers)?;

    for row in &summary.rows {
        let mut record = vec![row.label.clone()];
        if is_week {
            record.push(format_week_range(&row.label).unwrap_or_default());
        }
        record.extend([
            fixed2(row.regular_hours),
            fixed2(row.overtime_hours),
            fixed2(row.total_hours),
            fixed2(row.total_amount),
        ]);
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_detailed_csv<W: io::Write>(writer: W, analysis: &AnalysisResult) -> Result<(), CsvExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(DETAILED_HEADERS)?;

    for (user, entry) in analysis.entries() {
        wtr.write_record([
            user.user_name.clone(),
            entry.date.format("%Y-%m-%d").to_string(),
            clock_time(entry.start.as_deref()),
            clock_time(entry.end.as_deref()),
            entry.project.name.clone(),
            entry.client_name.clone(),
            entry.task_name.clone(),
            entry.tags.join("; "),
            entry.description.clone(),
            entry.duration_hours.to_string(),
            entry.regular_hours.to_string(),
            entry.overtime_hours.to_string(),
            entry.hourly_rate.to_string(),
            entry.ot_rate.to_string(),
            entry.base_amount.to_string(),
            entry.premium_amount.to_string(),
            entry.total_amount.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn fixed2(value: f64) -> String {
    format!("{value:.2}")
}

// 24-hour `HH:MM` in the timestamp's own offset; blank when absent or unparsable.
fn clock_time(timestamp: Option<&str>) -> String {
    timestamp
        .and_then(parse_timestamp)
        .map(|time| time.format("%H:%M").to_string())
        .unwrap_or_default()
}
