use clap::ValueEnum;
use serde::Serialize;

/// The dimensions a finished analysis can be re-sliced along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    User,
    Client,
    Project,
    Task,
    Date,
    Week,
}

impl GroupBy {
    /// Column heading for the row labels of this dimension.
    pub fn heading(self) -> &'static str {
        match self {
            GroupBy::User => "User",
            GroupBy::Client => "Client",
            GroupBy::Project => "Project",
            GroupBy::Task => "Task",
            GroupBy::Date => "Date",
            GroupBy::Week => "Week",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            GroupBy::User => "users",
            GroupBy::Client => "clients",
            GroupBy::Project => "projects",
            GroupBy::Task => "tasks",
            GroupBy::Date => "days",
            GroupBy::Week => "weeks",
        }
    }
}

/// Share of overtime above which a row is highlighted.
pub const HIGH_OVERTIME_RATIO: f64 = 0.30;

/// Cost split carried only by per-user rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRowDetails {
    /// Daily capacity times days worked.
    pub capacity_hours: f64,
    pub daily_capacity: f64,
    pub base_amount: f64,
    pub premium_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub label: String,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub total_amount: f64,
    pub total_hours: f64,
    pub regular_pct: f64,
    pub overtime_pct: f64,
    pub high_overtime: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRowDetails>,
}

impl SummaryRow {
    /// Builds a row and derives its display-only fields from the hour split.
    pub fn new(label: impl Into<String>, regular_hours: f64, overtime_hours: f64, total_amount: f64) -> Self {
        let total_hours = regular_hours + overtime_hours;
        let (regular_pct, overtime_pct) = if total_hours > 0.0 {
            (
                regular_hours / total_hours * 100.0,
                overtime_hours / total_hours * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            label: label.into(),
            regular_hours,
            overtime_hours,
            total_amount,
            total_hours,
            regular_pct,
            overtime_pct,
            high_overtime: total_hours > 0.0 && overtime_hours / total_hours > HIGH_OVERTIME_RATIO,
            user: None,
        }
    }

    pub fn with_user_details(mut self, details: UserRowDetails) -> Self {
        self.user = Some(details);
        self
    }
}

/// One dimension's rows, already sorted, plus the synthetic totals row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedSummary {
    pub group_by: GroupBy,
    pub rows: Vec<SummaryRow>,
    pub totals: SummaryRow,
}
