use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_DAILY_THRESHOLD: f64 = 8.0;
pub const DEFAULT_WEEKLY_THRESHOLD: f64 = 40.0;
pub const DEFAULT_OVERTIME_MULTIPLIER: f64 = 1.5;

/// Overrides closer than this to the global default are treated as "no override".
const DEFAULT_MATCH_TOLERANCE: f64 = 0.01;
const MIN_OVERRIDE_VALUE: f64 = 1.0;

/// Global overtime settings for one report.
///
/// `weekly_threshold` is carried along for display and export but does not
/// influence the regular/overtime split; only the daily threshold does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeConfig {
    pub daily_threshold: f64,
    pub weekly_threshold: f64,
    pub overtime_multiplier: f64,
}

impl Default for OvertimeConfig {
    fn default() -> Self {
        Self {
            daily_threshold: DEFAULT_DAILY_THRESHOLD,
            weekly_threshold: DEFAULT_WEEKLY_THRESHOLD,
            overtime_multiplier: DEFAULT_OVERTIME_MULTIPLIER,
        }
    }
}

/// Per-user replacement for the global capacity and/or multiplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UserOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
}

impl UserOverride {
    pub fn is_empty(&self) -> bool {
        self.capacity.is_none() && self.multiplier.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideField {
    Capacity,
    Multiplier,
}

impl OverrideField {
    fn default_value(self, config: &OvertimeConfig) -> f64 {
        match self {
            OverrideField::Capacity => config.daily_threshold,
            OverrideField::Multiplier => config.overtime_multiplier,
        }
    }

    fn slot(self, value: &mut UserOverride) -> &mut Option<f64> {
        match self {
            OverrideField::Capacity => &mut value.capacity,
            OverrideField::Multiplier => &mut value.multiplier,
        }
    }
}

impl std::fmt::Display for OverrideField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverrideField::Capacity => write!(f, "capacity"),
            OverrideField::Multiplier => write!(f, "multiplier"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum OverrideEditError {
    #[error("{field} override for user {user_id} must be a number of at least 1, got {value}")]
    InvalidValue {
        user_id: String,
        field: OverrideField,
        value: f64,
    },
}

/// Overrides keyed by user id. Never contains an empty [`UserOverride`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserOverrides {
    entries: BTreeMap<String, UserOverride>,
}

impl UserOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: &str) -> Option<&UserOverride> {
        self.entries.get(user_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &UserOverride)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stores `value` as-is, dropping it when it carries no field.
    pub fn insert(&mut self, user_id: impl Into<String>, value: UserOverride) {
        let user_id = user_id.into();
        if value.is_empty() {
            self.entries.remove(&user_id);
        } else {
            self.entries.insert(user_id, value);
        }
    }

    pub fn effective_capacity(&self, user_id: &str, config: &OvertimeConfig) -> f64 {
        self.get(user_id)
            .and_then(|value| value.capacity)
            .unwrap_or(config.daily_threshold)
    }

    pub fn effective_multiplier(&self, user_id: &str, config: &OvertimeConfig) -> f64 {
        self.get(user_id)
            .and_then(|value| value.multiplier)
            .unwrap_or(config.overtime_multiplier)
    }

    /// Applies one edited value the way the overrides table does: values that
    /// match the global default clear the field, and a user left without any
    /// field is removed entirely.
    pub fn apply_edit(
        &mut self,
        user_id: &str,
        field: OverrideField,
        value: f64,
        config: &OvertimeConfig,
    ) -> Result<(), OverrideEditError> {
        if !value.is_finite() || value < MIN_OVERRIDE_VALUE {
            return Err(OverrideEditError::InvalidValue {
                user_id: user_id.to_string(),
                field,
                value,
            });
        }

        let mut current = self.get(user_id).copied().unwrap_or_default();
        let default_value = field.default_value(config);
        *field.slot(&mut current) = if (value - default_value).abs() < DEFAULT_MATCH_TOLERANCE {
            None
        } else {
            Some(value)
        };
        self.insert(user_id, current);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }
}
