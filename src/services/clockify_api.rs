use std::env;
use std::fs;

use chrono::{NaiveDate, NaiveTime};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::entry::{RawEntry, WorkspaceUser};
use crate::services::time_entry_source::{TimeEntrySource, TimeEntrySourceError};

pub const TOKEN_ENV_VAR: &str = "CLOCKIFY_ADDON_TOKEN";
const TOKEN_HEADER: &str = "X-Addon-Token";
const PAGE_SIZE: &str = "500";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClockifyWorkspace {
    pub base_url: String,
    pub workspace_id: String,
}

impl ClockifyWorkspace {
    pub fn from_yaml_file(filepath: &str) -> Result<Self, TimeEntrySourceError> {
        let contents = fs::read_to_string(filepath)
            .map_err(|err| TimeEntrySourceError::Other(format!("failed to read config: {err}")))?;
        let workspace: ClockifyWorkspace =
            serde_yaml::from_str(&contents).map_err(|_| TimeEntrySourceError::Parse)?;
        Ok(workspace)
    }
}

#[derive(Debug, Clone)]
pub struct AddonToken(String);

impl AddonToken {
    pub fn from_env() -> Result<Self, TimeEntrySourceError> {
        match env::var(TOKEN_ENV_VAR) {
            Ok(token) if !token.is_empty() => Ok(Self(token)),
            _ => Err(TimeEntrySourceError::Unauthorized),
        }
    }
}

pub struct ClockifyApiClient {
    workspace: ClockifyWorkspace,
    token: AddonToken,
    client: Client,
}

impl ClockifyApiClient {
    pub fn new(workspace: ClockifyWorkspace, token: AddonToken) -> Result<Self, TimeEntrySourceError> {
        if workspace.base_url.is_empty() || workspace.workspace_id.is_empty() {
            return Err(TimeEntrySourceError::Other(
                "clockify config is missing base_url or workspace_id".to_string(),
            ));
        }

        Ok(Self {
            workspace,
            token,
            client: Client::new(),
        })
    }

    fn workspace_url(&self, path: &str) -> String {
        format!(
            "{}/v1/workspaces/{}/{path}",
            self.workspace.base_url.trim_end_matches('/'),
            self.workspace.workspace_id
        )
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, TimeEntrySourceError> {
        let response = request
            .header(TOKEN_HEADER, self.token.0.as_str())
            .send()
            .await
            .map_err(|_| TimeEntrySourceError::Connection)?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(TimeEntrySourceError::Unauthorized);
            }
            StatusCode::NOT_FOUND => return Err(TimeEntrySourceError::NotFound),
            status if !status.is_success() => {
                return Err(TimeEntrySourceError::Status(status.as_u16()));
            }
            _ => {}
        }

        response
            .json::<T>()
            .await
            .map_err(|_| TimeEntrySourceError::Parse)
    }
}

impl TimeEntrySource for ClockifyApiClient {
    async fn get_users(&self) -> Result<Vec<WorkspaceUser>, TimeEntrySourceError> {
        let url = self.workspace_url("users");
        debug!(%url, "listing workspace users");
        self.fetch_json(self.client.get(url.as_str())).await
    }

    async fn get_user_entries(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawEntry>, TimeEntrySourceError> {
        let url = self.workspace_url(&format!("user/{user_id}/time-entries"));
        let (start, end) = query_bounds(start, end);
        debug!(%url, %start, %end, "fetching time entries");

        let request = self.client.get(url.as_str()).query(&[
            ("start", start.as_str()),
            ("end", end.as_str()),
            ("page-size", PAGE_SIZE),
            ("hydrated", "true"),
        ]);
        self.fetch_json(request).await
    }
}

/// First instant of `start` and last millisecond of `end`, in UTC.
pub fn query_bounds(start: NaiveDate, end: NaiveDate) -> (String, String) {
    let first = start.and_time(NaiveTime::MIN).and_utc();
    let last = end
        .and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| end.and_time(NaiveTime::MIN))
        .and_utc();
    (
        first.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        last.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::on_date;

    #[test]
    fn query_covers_whole_days_in_utc() {
        let (start, end) = query_bounds(on_date(2026, 2, 1), on_date(2026, 2, 28));
        assert_eq!(start, "2026-02-01T00:00:00.000Z");
        assert_eq!(end, "2026-02-28T23:59:59.999Z");
    }

    #[test]
    fn client_requires_base_url_and_workspace() {
        let result = ClockifyApiClient::new(
            ClockifyWorkspace {
                base_url: "https://api.clockify.me/api".to_string(),
                workspace_id: String::new(),
            },
            AddonToken("token".to_string()),
        );
        assert!(matches!(result, Err(TimeEntrySourceError::Other(_))));
    }

    #[test]
    fn workspace_urls_ignore_a_trailing_slash() {
        let client = ClockifyApiClient::new(
            ClockifyWorkspace {
                base_url: "https://api.clockify.me/api/".to_string(),
                workspace_id: "ws1".to_string(),
            },
            AddonToken("token".to_string()),
        )
        .unwrap();
        assert_eq!(
            client.workspace_url("users"),
            "https://api.clockify.me/api/v1/workspaces/ws1/users"
        );
    }
}
