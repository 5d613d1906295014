use std::process::ExitCode;

use chrono::Local;

use crate::commands::analysis_input::analyze_entries_file;
use crate::commands::base_commands::Commands;
use crate::domain::analysis::AnalysisResult;
use crate::domain::calendar::DateRange;
use crate::services::csv_export::{CsvLayout, default_file_name, export_csv_file};

pub async fn export_command(cmd: Commands) -> ExitCode {
    if let Commands::Export {
        input,
        output,
        group_by,
        detailed,
        settings,
    } = cmd
    {
        let analysis = match analyze_entries_file(&input, &settings).await {
            Ok(analysis) => analysis,
            Err(e) => {
                eprintln!("Failed to analyze time entries: {e}");
                return ExitCode::FAILURE;
            }
        };

        let layout = if detailed {
            CsvLayout::Detailed
        } else {
            CsvLayout::Summary(group_by)
        };
        let output = output.unwrap_or_else(|| default_file_name(&report_period(&analysis)));

        let result = tokio::task::spawn_blocking({
            let output = output.clone();
            move || export_csv_file(&output, &analysis, layout)
        })
        .await;
        match result {
            Ok(Ok(())) => println!("CSV report written to {output}"),
            Ok(Err(e)) => {
                eprintln!("Failed to export CSV: {e}");
                return ExitCode::FAILURE;
            }
            Err(e) => {
                eprintln!("Failed to export CSV: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

/// First and last day with an analyzed entry; today when there is none.
pub fn report_period(analysis: &AnalysisResult) -> DateRange {
    let dates = analysis.entries().map(|(_, entry)| entry.date);
    let (start, end) = dates.fold(None, |range, date| match range {
        None => Some((date, date)),
        Some((start, end)) => Some((date.min(start), date.max(end))),
    })
    .unwrap_or_else(|| {
        let today = Local::now().date_naive();
        (today, today)
    });
    DateRange { start, end }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{OvertimeConfig, UserOverrides};
    use crate::services::overtime_analysis::analyze;
    use crate::test_support::{build_user_entry, on_date};

    #[test]
    fn period_spans_the_first_and_last_entry_dates() {
        let entries = vec![
            build_user_entry("ada", "a1", "2026-02-16T08:00:00Z", 2.0, 0.0),
            build_user_entry("bob", "b1", "2026-02-24T08:00:00Z", 2.0, 0.0),
            build_user_entry("ada", "a2", "2026-02-03T08:00:00Z", 2.0, 0.0),
        ];
        let analysis = analyze(&entries, &OvertimeConfig::default(), &UserOverrides::new());

        let period = report_period(&analysis);
        assert_eq!(period.start, on_date(2026, 2, 3));
        assert_eq!(period.end, on_date(2026, 2, 24));
    }
}
