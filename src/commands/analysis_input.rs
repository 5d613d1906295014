use thiserror::Error;

use crate::commands::base_commands::SettingsArgs;
use crate::domain::analysis::AnalysisResult;
use crate::services::entries_json::{EntriesJsonError, load_entries_from_json_file};
use crate::services::overtime_analysis::analyze;
use crate::services::settings_yaml::SettingsYamlError;

#[derive(Error, Debug)]
pub enum AnalysisInputError {
    #[error(transparent)]
    Settings(#[from] SettingsYamlError),
    #[error(transparent)]
    Entries(#[from] EntriesJsonError),
}

/// Loads an entries file and runs the analysis with the resolved settings.
pub async fn analyze_entries_file(input: &str, settings: &SettingsArgs) -> Result<AnalysisResult, AnalysisInputError> {
    let (config, overrides) = settings.resolve()?;
    let entries = load_entries_from_json_file(input).await?;
    Ok(analyze(&entries, &config, &overrides))
}
