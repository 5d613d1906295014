use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;

use crate::domain::config::{OvertimeConfig, UserOverride, UserOverrides};

#[derive(Error, Debug)]
pub enum SettingsYamlError {
    #[error("failed to read settings file {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("failed to serialize overrides: {0}")]
    Serialize(#[from] serde_yaml::Error),
    #[error("failed to write settings file {path}: {source}")]
    WriteFile { path: PathBuf, source: io::Error },
}

#[derive(Debug, Default, Deserialize)]
struct ConfigRecord {
    daily_threshold: Option<Value>,
    weekly_threshold: Option<Value>,
    overtime_multiplier: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OverrideRecord {
    /// Older files stored only a multiplier per user.
    LegacyMultiplier(f64),
    Fields(UserOverride),
}

impl From<OverrideRecord> for UserOverride {
    fn from(record: OverrideRecord) -> Self {
        match record {
            OverrideRecord::LegacyMultiplier(multiplier) => UserOverride {
                capacity: None,
                multiplier: Some(multiplier),
            },
            OverrideRecord::Fields(value) => value,
        }
    }
}

/// Loads the global overtime settings.
///
/// Each field falls back to its default on its own when it is missing, not a
/// number, or not greater than zero. Numbers written as strings are accepted.
pub fn load_config_from_yaml_file<P: AsRef<Path>>(path: P) -> Result<OvertimeConfig, SettingsYamlError> {
    let path = path.as_ref();
    let contents = read_file(path)?;
    deserialize_config_from_yaml_str(&contents, path)
}

pub fn deserialize_config_from_yaml_str(
    input: &str,
    origin_path: &Path,
) -> Result<OvertimeConfig, SettingsYamlError> {
    let record: Option<ConfigRecord> = serde_yaml::from_str(input).map_err(|source| {
        SettingsYamlError::Parse {
            path: origin_path.to_path_buf(),
            source,
        }
    })?;
    let record = record.unwrap_or_default();
    let defaults = OvertimeConfig::default();

    Ok(OvertimeConfig {
        daily_threshold: positive_or(record.daily_threshold, defaults.daily_threshold),
        weekly_threshold: positive_or(record.weekly_threshold, defaults.weekly_threshold),
        overtime_multiplier: positive_or(record.overtime_multiplier, defaults.overtime_multiplier),
    })
}

/// Loads per-user overrides; a file that does not exist yet holds none.
pub fn load_overrides_from_yaml_file<P: AsRef<Path>>(path: P) -> Result<UserOverrides, SettingsYamlError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(UserOverrides::new());
    }
    let contents = read_file(path)?;
    deserialize_overrides_from_yaml_str(&contents, path)
}

pub fn deserialize_overrides_from_yaml_str(
    input: &str,
    origin_path: &Path,
) -> Result<UserOverrides, SettingsYamlError> {
    let records: Option<std::collections::BTreeMap<String, OverrideRecord>> =
        serde_yaml::from_str(input).map_err(|source| SettingsYamlError::Parse {
            path: origin_path.to_path_buf(),
            source,
        })?;

    let mut overrides = UserOverrides::new();
    for (user_id, record) in records.unwrap_or_default() {
        overrides.insert(user_id, record.into());
    }
    Ok(overrides)
}

pub fn serialize_overrides_to_yaml(overrides: &UserOverrides) -> Result<String, SettingsYamlError> {
    Ok(serde_yaml::to_string(overrides)?)
}

pub fn save_overrides_to_yaml_file<P: AsRef<Path>>(
    path: P,
    overrides: &UserOverrides,
) -> Result<(), SettingsYamlError> {
    let path = path.as_ref();
    let yaml = serialize_overrides_to_yaml(overrides)?;
    std::fs::write(path, yaml).map_err(|source| SettingsYamlError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

fn read_file(path: &Path) -> Result<String, SettingsYamlError> {
    std::fs::read_to_string(path).map_err(|source| SettingsYamlError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

fn positive_or(value: Option<Value>, default: f64) -> f64 {
    let number = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number
        .filter(|number| number.is_finite() && *number > 0.0)
        .unwrap_or(default)
}
