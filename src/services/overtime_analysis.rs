use std::collections::HashMap;

use tracing::{debug, info};

use crate::domain::analysis::AnalysisResult;
use crate::domain::config::{OvertimeConfig, UserOverrides};
use crate::domain::entry::RawEntry;
use crate::services::team_aggregator::summarize_team;
use crate::services::user_overtime::{UserEntries, calculate_user_overtime};

pub const UNKNOWN_USER_ID: &str = "unknown";
pub const UNKNOWN_USER_NAME: &str = "Unknown User";

/// Runs the whole pipeline over one report's raw entries.
///
/// Users appear in order of overtime hours, most first; users with equal
/// overtime keep the order in which they first appear in `entries`.
pub fn analyze(entries: &[RawEntry], config: &OvertimeConfig, overrides: &UserOverrides) -> AnalysisResult {
    if entries.is_empty() {
        return AnalysisResult::empty(*config);
    }

    let mut users = Vec::new();
    let mut excluded = Vec::new();
    for user in group_by_user(entries) {
        let outcome = calculate_user_overtime(&user, config, overrides);
        users.push(outcome.result);
        excluded.extend(outcome.excluded);
    }
    users.sort_by(|a, b| b.overtime_hours.total_cmp(&a.overtime_hours));

    for entry in &excluded {
        debug!(
            entry_id = entry.entry_id.as_deref().unwrap_or("-"),
            user_id = %entry.user_id,
            reason = %entry.reason,
            "excluded time entry"
        );
    }

    let summary = summarize_team(&users);
    info!(
        users = summary.user_count,
        total_hours = summary.total_hours,
        overtime_hours = summary.overtime_hours,
        excluded = excluded.len(),
        "analysis complete"
    );

    AnalysisResult {
        users,
        summary,
        config: *config,
        excluded,
    }
}

// The first entry seen for a user decides the name and email shown for them.
fn group_by_user(entries: &[RawEntry]) -> Vec<UserEntries<'_>> {
    let mut users: Vec<UserEntries<'_>> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        // Entries without a user id fall back to their legacy `_id` as the key.
        let user_id = [entry.user_id.as_deref(), entry.legacy_id.as_deref()]
            .into_iter()
            .flatten()
            .find(|id| !id.is_empty())
            .unwrap_or(UNKNOWN_USER_ID);
        let position = *positions.entry(user_id).or_insert_with(|| {
            users.push(UserEntries {
                user_id: user_id.to_string(),
                user_name: entry
                    .user_name
                    .clone()
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| UNKNOWN_USER_NAME.to_string()),
                user_email: entry.user_email.clone().unwrap_or_default(),
                entries: Vec::new(),
            });
            users.len() - 1
        });
        users[position].entries.push(entry);
    }
    users
}
