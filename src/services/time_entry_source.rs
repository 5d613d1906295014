use chrono::NaiveDate;
use futures::future::join_all;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::entry::{RawEntry, WorkspaceUser};

/// Users whose entries are requested at the same time.
pub const FETCH_BATCH_SIZE: usize = 5;

#[derive(Error, Debug)]
pub enum TimeEntrySourceError {
    #[error("resource not found")]
    NotFound,
    #[error("connection error")]
    Connection,
    #[error("parse error")]
    Parse,
    #[error("unauthorized")]
    Unauthorized,
    #[error("unexpected response status {0}")]
    Status(u16),
    #[error("{0}")]
    Other(String),
}

/// Describes an interface for retrieving workspace users and their time entries.
pub trait TimeEntrySource {
    async fn get_users(&self) -> Result<Vec<WorkspaceUser>, TimeEntrySourceError>;

    async fn get_user_entries(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawEntry>, TimeEntrySourceError>;
}

/// Fetches the entries of every workspace user between `start` and `end`.
///
/// Failing to list users fails the whole fetch. A user whose entries cannot
/// be fetched contributes no entries and the fetch carries on.
pub async fn fetch_all_users_entries<S: TimeEntrySource>(
    source: &S,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<RawEntry>, TimeEntrySourceError> {
    let users = source.get_users().await?;
    info!(users = users.len(), "found workspace users");

    let mut all_entries = Vec::new();
    for (batch_index, batch) in users.chunks(FETCH_BATCH_SIZE).enumerate() {
        let first = batch_index * FETCH_BATCH_SIZE + 1;
        info!(
            "fetching entries for users {}-{} of {}",
            first,
            first + batch.len() - 1,
            users.len()
        );

        let results = join_all(
            batch
                .iter()
                .map(|user| fetch_user_entries(source, user, start, end)),
        )
        .await;
        for entries in results {
            all_entries.extend(entries);
        }
    }

    info!(entries = all_entries.len(), "fetched time entries");
    Ok(all_entries)
}

async fn fetch_user_entries<S: TimeEntrySource>(
    source: &S,
    user: &WorkspaceUser,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<RawEntry> {
    match source.get_user_entries(&user.id, start, end).await {
        Ok(entries) => entries
            .into_iter()
            .map(|entry| tag_with_user(entry, user))
            .collect(),
        Err(error) => {
            warn!(user_id = %user.id, user_name = %user.name, %error, "failed to fetch entries for user");
            Vec::new()
        }
    }
}

fn tag_with_user(mut entry: RawEntry, user: &WorkspaceUser) -> RawEntry {
    entry.user_id = Some(user.id.clone());
    entry.user_name = Some(user.name.clone());
    entry.user_email = Some(user.email.clone().unwrap_or_default());
    entry
}
