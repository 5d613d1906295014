use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::entry::{HourlyRate, ProjectRef, RawEntry, TimeInterval, WorkspaceUser};
use crate::services::time_entry_source::{TimeEntrySource, TimeEntrySourceError};

pub fn on_date(year: i32, month: u32, day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// An entry starting at `start` lasting `hours`, billed at `rate_cents` per hour.
pub fn build_entry(id: &str, start: &str, hours: f64, rate_cents: f64) -> RawEntry {
    let mut entry = RawEntry::new();
    entry.id = Some(id.to_string());
    entry.time_interval = Some(TimeInterval {
        start: Some(start.to_string()),
        end: None,
        duration: None,
    });
    entry.duration = Some(hours * 3600.0);
    entry.hourly_rate = Some(HourlyRate {
        amount: Some(rate_cents),
        currency: Some("USD".to_string()),
    });
    entry
}

pub fn build_user_entry(user_id: &str, id: &str, start: &str, hours: f64, rate_cents: f64) -> RawEntry {
    let mut entry = build_entry(id, start, hours, rate_cents);
    entry.user_id = Some(user_id.to_string());
    entry.user_name = Some(format!("User {user_id}"));
    entry
}

pub fn with_project(mut entry: RawEntry, project: &str, client: Option<&str>) -> RawEntry {
    entry.project = Some(ProjectRef {
        name: Some(project.to_string()),
        color: Some("#3366ff".to_string()),
        client_name: client.map(str::to_string),
        hourly_rate: None,
    });
    entry
}

pub fn build_user(id: &str, name: &str) -> WorkspaceUser {
    WorkspaceUser {
        id: id.to_string(),
        name: name.to_string(),
        email: Some(format!("{id}@example.com")),
    }
}

// A mock TimeEntrySource serving canned entries; users listed in `failing` error out
pub struct MockEntrySource {
    pub users: Vec<WorkspaceUser>,
    pub entries: HashMap<String, Vec<RawEntry>>,
    pub failing: Vec<String>,
}

impl MockEntrySource {
    pub fn new(users: Vec<WorkspaceUser>) -> Self {
        Self {
            users,
            entries: HashMap::new(),
            failing: Vec::new(),
        }
    }
}

impl TimeEntrySource for MockEntrySource {
    async fn get_users(&self) -> Result<Vec<WorkspaceUser>, TimeEntrySourceError> {
        Ok(self.users.clone())
    }

    async fn get_user_entries(
        &self,
        user_id: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<RawEntry>, TimeEntrySourceError> {
        if self.failing.iter().any(|failing| failing == user_id) {
            return Err(TimeEntrySourceError::Connection);
        }
        Ok(self.entries.get(user_id).cloned().unwrap_or_default())
    }
}
