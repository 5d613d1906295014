use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::config::OvertimeConfig;

pub const REPORT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLabel {
    pub name: String,
    pub color: String,
}

/// Allocation and cost of one time entry.
///
/// Hours and amounts are rounded to two decimals for display; user totals
/// are summed from the unrounded values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResult {
    pub entry_id: String,
    pub date: NaiveDate,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: String,
    pub project: ProjectLabel,
    pub client_name: String,
    pub task_name: String,
    pub tags: Vec<String>,
    pub billable: bool,
    pub duration_hours: f64,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub hourly_rate: f64,
    pub ot_rate: f64,
    pub base_amount: f64,
    pub premium_amount: f64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResult {
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub multiplier: f64,
    pub capacity: f64,
    pub total_hours: f64,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub base_cost: f64,
    pub ot_premium: f64,
    pub total_cost: f64,
    pub entries: Vec<EntryResult>,
    pub days_worked: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    pub base_cost: f64,
    pub ot_premium: f64,
    pub total_cost: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub total_hours: f64,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub user_count: usize,
    pub costs: CostSummary,
}

impl TeamSummary {
    pub fn empty() -> Self {
        Self {
            total_hours: 0.0,
            regular_hours: 0.0,
            overtime_hours: 0.0,
            user_count: 0,
            costs: CostSummary {
                base_cost: 0.0,
                ot_premium: 0.0,
                total_cost: 0.0,
                currency: REPORT_CURRENCY.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// No start timestamp, or one whose first ten characters are not a date.
    UnresolvedDate,
    /// Duration could not be resolved or was zero.
    ZeroDuration,
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExclusionReason::UnresolvedDate => write!(f, "no usable start date"),
            ExclusionReason::ZeroDuration => write!(f, "zero or unknown duration"),
        }
    }
}

/// A raw entry that contributed nothing to the totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcludedEntry {
    pub entry_id: Option<String>,
    pub user_id: String,
    pub reason: ExclusionReason,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Sorted by overtime hours, most first.
    pub users: Vec<UserResult>,
    pub summary: TeamSummary,
    pub config: OvertimeConfig,
    pub excluded: Vec<ExcludedEntry>,
}

impl AnalysisResult {
    pub fn empty(config: OvertimeConfig) -> Self {
        Self {
            users: Vec::new(),
            summary: TeamSummary::empty(),
            config,
            excluded: Vec::new(),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&UserResult, &EntryResult)> {
        self.users
            .iter()
            .flat_map(|user| user.entries.iter().map(move |entry| (user, entry)))
    }
}

/// Rounds to cents, the precision every displayed amount and hour uses.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
