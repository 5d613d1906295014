use crate::domain::analysis::{AnalysisResult, ExclusionReason};
use crate::domain::grouping::{GroupBy, GroupedSummary, SummaryRow};

/// `8h`, `8h 30m`: whole hours plus rounded minutes.
pub fn format_hours(hours: f64) -> String {
    if !hours.is_finite() {
        return "0h".to_string();
    }
    let total_minutes = (hours * 60.0).round() as i64;
    let (whole_hours, minutes) = (total_minutes / 60, total_minutes % 60);
    if minutes == 0 {
        format!("{whole_hours}h")
    } else {
        format!("{whole_hours}h {minutes}m")
    }
}

/// `$1,234.56`
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::new();
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

pub fn format_analysis_report(analysis: &AnalysisResult) -> String {
    let summary = &analysis.summary;
    let config = &analysis.config;

    let mut lines = Vec::new();
    lines.push("Overtime Report".to_string());
    lines.push(format!(
        "Daily threshold: {} | Weekly threshold: {} | Overtime multiplier: {}x",
        format_hours(config.daily_threshold),
        format_hours(config.weekly_threshold),
        config.overtime_multiplier
    ));
    lines.push(format!("Users: {}", summary.user_count));
    lines.push(format!(
        "Total hours: {} | Regular: {} | Overtime: {}",
        format_hours(summary.total_hours),
        format_hours(summary.regular_hours),
        format_hours(summary.overtime_hours)
    ));
    lines.push(format!(
        "Base cost: {} | OT premium: {} | Total cost: {} ({})",
        format_currency(summary.costs.base_cost),
        format_currency(summary.costs.ot_premium),
        format_currency(summary.costs.total_cost),
        summary.costs.currency
    ));

    if analysis.users.is_empty() {
        lines.push(String::new());
        lines.push("No time entries in this period.".to_string());
        return lines.join("\n");
    }

    lines.push(String::new());
    lines.push("User | Capacity | Multiplier | Regular | Overtime | Total | Days | Total Cost".to_string());
    lines.push("-----|----------|------------|---------|----------|-------|------|-----------".to_string());
    for user in &analysis.users {
        lines.push(format!(
            "{} | {} | {}x | {} | {} | {} | {} | {}",
            user.user_name,
            format_hours(user.capacity),
            user.multiplier,
            format_hours(user.regular_hours),
            format_hours(user.overtime_hours),
            format_hours(user.total_hours),
            user.days_worked,
            format_currency(user.total_cost)
        ));
    }

    if !analysis.excluded.is_empty() {
        let count = |reason: ExclusionReason| {
            analysis
                .excluded
                .iter()
                .filter(|entry| entry.reason == reason)
                .count()
        };
        lines.push(String::new());
        lines.push(format!(
            "Excluded entries: {} ({}: {}, {}: {})",
            analysis.excluded.len(),
            ExclusionReason::UnresolvedDate,
            count(ExclusionReason::UnresolvedDate),
            ExclusionReason::ZeroDuration,
            count(ExclusionReason::ZeroDuration)
        ));
    }

    lines.join("\n")
}

pub fn format_grouped_summary(summary: &GroupedSummary) -> String {
    let with_capacity = summary.group_by == GroupBy::User;

    let mut lines = Vec::new();
    lines.push(format!(
        "Summary by {} ({} {})",
        summary.group_by.heading(),
        summary.rows.len(),
        summary.group_by.plural()
    ));

    let mut header = vec![summary.group_by.heading()];
    if with_capacity {
        header.push("Capacity");
    }
    header.extend(["Regular", "Overtime", "Total", "Regular %", "Overtime %", "Amount"]);
    lines.push(header.join(" | "));
    lines.push(
        header
            .iter()
            .map(|column| "-".repeat(column.len()))
            .collect::<Vec<_>>()
            .join("|"),
    );

    for row in &summary.rows {
        lines.push(format_summary_row(row, with_capacity));
    }
    lines.push(format_summary_row(&summary.totals, with_capacity));

    if summary.rows.iter().any(|row| row.high_overtime) {
        lines.push(String::new());
        lines.push("* more than 30% overtime".to_string());
    }
    lines.join("\n")
}

fn format_summary_row(row: &SummaryRow, with_capacity: bool) -> String {
    let marker = if row.high_overtime { " *" } else { "" };
    let mut cells = vec![format!("{}{marker}", row.label)];
    if with_capacity {
        let capacity = row.user.map(|user| user.capacity_hours).unwrap_or(0.0);
        cells.push(format_hours(capacity));
    }
    cells.extend([
        format_hours(row.regular_hours),
        format_hours(row.overtime_hours),
        format_hours(row.total_hours),
        format!("{:.0}%", row.regular_pct),
        format!("{:.0}%", row.overtime_pct),
        format_currency(row.total_amount),
    ]);
    cells.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{ExcludedEntry, TeamSummary};
    use crate::domain::config::{OvertimeConfig, UserOverrides};
    use crate::services::grouping::group_analysis;
    use crate::services::overtime_analysis::analyze;
    use crate::test_support::build_user_entry;

    fn build_analysis() -> AnalysisResult {
        let entries = vec![
            build_user_entry("ada", "a1", "2026-02-16T08:00:00Z", 10.0, 2000.0),
            build_user_entry("bob", "b1", "2026-02-16T08:00:00Z", 6.5, 150_000.0),
        ];
        analyze(&entries, &OvertimeConfig::default(), &UserOverrides::new())
    }

    #[test]
    fn hours_are_shown_as_hours_and_minutes() {
        assert_eq!(format_hours(8.0), "8h");
        assert_eq!(format_hours(8.5), "8h 30m");
        assert_eq!(format_hours(0.25), "0h 15m");
        assert_eq!(format_hours(7.999), "8h");
    }

    #[test]
    fn currency_uses_dollars_with_thousands_separators() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(220.0), "$220.00");
        assert_eq!(format_currency(9750.5), "$9,750.50");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
    }

    #[test]
    fn report_includes_summary_and_user_table() {
        let output = format_analysis_report(&build_analysis());

        assert!(output.contains("Overtime Report"));
        assert!(output.contains("Daily threshold: 8h | Weekly threshold: 40h | Overtime multiplier: 1.5x"));
        assert!(output.contains("Users: 2"));
        assert!(output.contains("Total hours: 16h 30m | Regular: 14h 30m | Overtime: 2h"));
        assert!(output.contains("Total cost: $9,970.00 (USD)"));
        assert!(output.contains("User ada | 8h | 1.5x | 8h | 2h | 10h | 1 | $220.00"));
        assert!(output.contains("User bob | 8h | 1.5x | 6h 30m | 0h | 6h 30m | 1 | $9,750.00"));
        assert!(!output.contains("Excluded entries"));
    }

    #[test]
    fn report_mentions_excluded_entries() {
        let mut analysis = AnalysisResult::empty(OvertimeConfig::default());
        analysis.summary = TeamSummary::empty();
        analysis.excluded.push(ExcludedEntry {
            entry_id: Some("e1".to_string()),
            user_id: "u1".to_string(),
            reason: ExclusionReason::ZeroDuration,
        });
        let output = format_analysis_report(&analysis);
        assert!(output.contains("No time entries in this period."));

        let mut analysis = build_analysis();
        analysis.excluded.push(ExcludedEntry {
            entry_id: None,
            user_id: "ada".to_string(),
            reason: ExclusionReason::UnresolvedDate,
        });
        let output = format_analysis_report(&analysis);
        assert!(output.contains(
            "Excluded entries: 1 (no usable start date: 1, zero or unknown duration: 0)"
        ));
    }

    #[test]
    fn grouped_summary_lists_rows_and_totals() {
        let summary = group_analysis(&build_analysis(), GroupBy::User);
        let output = format_grouped_summary(&summary);

        assert!(output.contains("Summary by User (2 users)"));
        assert!(output.contains("User | Capacity | Regular | Overtime | Total | Regular % | Overtime % | Amount"));
        assert!(output.contains("User ada | 8h | 8h | 2h | 10h | 80% | 20% | $220.00"));
        assert!(output.contains("Total | 16h | 14h 30m | 2h | 16h 30m | 88% | 12% | $9,970.00"));
        assert!(!output.contains("more than 30% overtime"));
    }

    #[test]
    fn high_overtime_rows_are_marked() {
        let entries = vec![build_user_entry("ada", "a1", "2026-02-16T08:00:00Z", 12.0, 0.0)];
        let analysis = analyze(&entries, &OvertimeConfig::default(), &UserOverrides::new());
        let output = format_grouped_summary(&group_analysis(&analysis, GroupBy::Date));

        assert!(output.contains("Date | Regular | Overtime"));
        assert!(output.contains("2026-02-16 * | 8h | 4h | 12h | 67% | 33% | $0.00"));
        assert!(output.contains("* more than 30% overtime"));
    }
}
