use std::io::Write;

use thiserror::Error;

use crate::domain::entry::RawEntry;

#[derive(Error, Debug)]
pub enum EntriesJsonError {
    #[error("failed to read entries file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse entries json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to write entries: {0}")]
    Write(#[from] std::io::Error),
}

pub fn deserialize_entries_from_json_str(input: &str) -> Result<Vec<RawEntry>, EntriesJsonError> {
    Ok(serde_json::from_str(input)?)
}

pub fn serialize_entries_to_json<W: Write>(writer: &mut W, entries: &[RawEntry]) -> Result<(), EntriesJsonError> {
    serde_json::to_writer_pretty(&mut *writer, entries)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Loads a JSON array of provider entries, as written by `fetch-entries`.
pub async fn load_entries_from_json_file(path: &str) -> Result<Vec<RawEntry>, EntriesJsonError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| EntriesJsonError::Read {
            path: path.to_string(),
            source,
        })?;
    deserialize_entries_from_json_str(&contents)
}
