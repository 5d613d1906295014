use std::process::ExitCode;

use chrono::{Local, NaiveDate};

use crate::commands::base_commands::Commands;
use crate::domain::calendar::{DateRange, DateRangeError, RangePreset};
use crate::services::clockify_api::{AddonToken, ClockifyApiClient, ClockifyWorkspace};
use crate::services::entries_json::serialize_entries_to_json;
use crate::services::time_entry_source::fetch_all_users_entries;

pub async fn fetch_entries_command(cmd: Commands) -> ExitCode {
    if let Commands::FetchEntries {
        config,
        output,
        start_date,
        end_date,
        range,
    } = cmd
    {
        let today = Local::now().date_naive();
        let range = match resolve_range(range, start_date.as_deref(), end_date.as_deref(), today) {
            Ok(range) => range,
            Err(e) => {
                eprintln!("Failed to resolve report period: {e}");
                return ExitCode::FAILURE;
            }
        };

        let workspace = match ClockifyWorkspace::from_yaml_file(&config) {
            Ok(workspace) => workspace,
            Err(e) => {
                eprintln!("Failed to parse Clockify config: {e}");
                return ExitCode::FAILURE;
            }
        };
        let token = match AddonToken::from_env() {
            Ok(token) => token,
            Err(e) => {
                eprintln!("Failed to load Clockify token: {e}");
                return ExitCode::FAILURE;
            }
        };
        let client = match ClockifyApiClient::new(workspace, token) {
            Ok(client) => client,
            Err(e) => {
                eprintln!("Failed to create Clockify client: {e}");
                return ExitCode::FAILURE;
            }
        };

        let entries = match fetch_all_users_entries(&client, range.start, range.end).await {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!("Failed to fetch time entries: {e}");
                return ExitCode::FAILURE;
            }
        };

        let mut buffer = Vec::new();
        if let Err(e) = serialize_entries_to_json(&mut buffer, &entries) {
            eprintln!("Failed to serialize time entries: {e}");
            return ExitCode::FAILURE;
        }
        if let Err(e) = tokio::fs::write(&output, buffer).await {
            eprintln!("Failed to write output file: {e}");
            return ExitCode::FAILURE;
        }
        println!(
            "{} time entries from {} to {} written to {output}",
            entries.len(),
            range.start,
            range.end
        );
    }
    ExitCode::SUCCESS
}

/// A preset wins; otherwise missing dates default to the last 30 days.
pub fn resolve_range(
    preset: Option<RangePreset>,
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> Result<DateRange, DateRangeError> {
    if let Some(preset) = preset {
        return Ok(preset.resolve(today));
    }
    let fallback = DateRange::last_30_days(today);
    let start = start.map(String::from).unwrap_or_else(|| fallback.start.to_string());
    let end = end.map(String::from).unwrap_or_else(|| fallback.end.to_string());
    DateRange::parse(&start, &end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::on_date;

    #[test]
    fn missing_dates_default_to_the_last_30_days() {
        let range = resolve_range(None, None, None, on_date(2026, 3, 31)).unwrap();
        assert_eq!(range.start, on_date(2026, 3, 1));
        assert_eq!(range.end, on_date(2026, 3, 31));
    }

    #[test]
    fn explicit_dates_are_used_as_given() {
        let range = resolve_range(None, Some("2026-02-01"), Some("2026-02-28"), on_date(2026, 3, 31)).unwrap();
        assert_eq!(range.start, on_date(2026, 2, 1));
        assert_eq!(range.end, on_date(2026, 2, 28));
    }

    #[test]
    fn start_alone_runs_until_today() {
        let range = resolve_range(None, Some("2026-03-20"), None, on_date(2026, 3, 31)).unwrap();
        assert_eq!(range.start, on_date(2026, 3, 20));
        assert_eq!(range.end, on_date(2026, 3, 31));
    }

    #[test]
    fn preset_resolves_against_today() {
        let range = resolve_range(Some(RangePreset::LastMonth), None, None, on_date(2026, 3, 15)).unwrap();
        assert_eq!(range.start, on_date(2026, 2, 1));
        assert_eq!(range.end, on_date(2026, 2, 28));
    }

    #[test]
    fn rejects_a_start_after_the_end() {
        let result = resolve_range(None, Some("2026-03-02"), Some("2026-03-01"), on_date(2026, 3, 31));
        assert!(matches!(result, Err(DateRangeError::StartAfterEnd { .. })));
    }
}
