use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::calendar::RangePreset;
use crate::domain::config::{OvertimeConfig, UserOverrides};
use crate::domain::grouping::GroupBy;
use crate::services::settings_yaml::{
    SettingsYamlError, load_config_from_yaml_file, load_overrides_from_yaml_file,
};

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

/// Global overtime settings. Flags win over the settings file, the file over
/// the built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Settings YAML (daily_threshold, weekly_threshold, overtime_multiplier)
    #[arg(long)]
    pub settings: Option<String>,
    /// Hours per day before overtime starts
    #[arg(long)]
    pub daily_threshold: Option<f64>,
    /// Hours per week (recorded with the report, not used for the split)
    #[arg(long)]
    pub weekly_threshold: Option<f64>,
    /// Overtime rate multiplier
    #[arg(long)]
    pub multiplier: Option<f64>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Per-user overrides YAML
    #[arg(long)]
    pub overrides: Option<String>,
}

impl ConfigArgs {
    pub fn resolve(&self) -> Result<OvertimeConfig, SettingsYamlError> {
        let mut config = match &self.settings {
            Some(path) => load_config_from_yaml_file(path)?,
            None => OvertimeConfig::default(),
        };
        apply_flag(&mut config.daily_threshold, self.daily_threshold);
        apply_flag(&mut config.weekly_threshold, self.weekly_threshold);
        apply_flag(&mut config.overtime_multiplier, self.multiplier);
        Ok(config)
    }
}

impl SettingsArgs {
    pub fn resolve(&self) -> Result<(OvertimeConfig, UserOverrides), SettingsYamlError> {
        let config = self.config.resolve()?;
        let overrides = match &self.overrides {
            Some(path) => load_overrides_from_yaml_file(path)?,
            None => UserOverrides::new(),
        };
        Ok((config, overrides))
    }
}

// Same leniency as the settings file: only positive numbers replace a value.
fn apply_flag(target: &mut f64, flag: Option<f64>) {
    if let Some(value) = flag.filter(|value| value.is_finite() && *value > 0.0) {
        *target = value;
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch every workspace user's time entries from Clockify into JSON
    FetchEntries {
        /// Path to Clockify config YAML
        #[arg(short, long)]
        config: String,
        /// Output JSON file
        #[arg(short, long)]
        output: String,
        /// First day of the report (YYYY-MM-DD), defaults to 30 days ago
        #[arg(short, long)]
        start_date: Option<String>,
        /// Last day of the report (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        end_date: Option<String>,
        /// Use a preset period instead of explicit dates
        #[arg(long, value_enum, conflicts_with_all = ["start_date", "end_date"])]
        range: Option<RangePreset>,
    },
    /// Split hours into regular and overtime and print the report
    Analyze {
        /// Entries JSON file
        #[arg(short, long)]
        input: String,
        /// Also write the analysis to this file (.json, otherwise YAML)
        #[arg(short, long)]
        output: Option<String>,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Print the report grouped by one dimension
    Summary {
        /// Entries JSON file
        #[arg(short, long)]
        input: String,
        /// Dimension to group by
        #[arg(short, long, value_enum, default_value_t = GroupBy::User)]
        group_by: GroupBy,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Export the report as CSV
    Export {
        /// Entries JSON file
        #[arg(short, long)]
        input: String,
        /// Output CSV file, defaults to Overtime_Report_<start>_to_<end>.csv
        #[arg(short, long)]
        output: Option<String>,
        /// Dimension of the summary export
        #[arg(short, long, value_enum, default_value_t = GroupBy::User)]
        group_by: GroupBy,
        /// Export one row per time entry instead of a summary
        #[arg(long, conflicts_with = "group_by")]
        detailed: bool,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Set a user's capacity and/or multiplier override
    SetOverride {
        /// Overrides YAML file (created when missing)
        #[arg(short, long)]
        file: String,
        /// User id
        #[arg(short, long)]
        user: String,
        /// Daily capacity in hours for this user
        #[arg(long)]
        capacity: Option<f64>,
        /// Overtime multiplier for this user
        #[arg(long)]
        multiplier: Option<f64>,
        /// Settings YAML holding the global defaults the override is compared to
        #[arg(long)]
        settings: Option<String>,
    },
    /// Remove every user override
    ResetOverrides {
        /// Overrides YAML file
        #[arg(short, long)]
        file: String,
    },
    /// Plot the users with the most overtime into a PNG chart
    PlotOvertime {
        /// Entries JSON file
        #[arg(short, long)]
        input: String,
        /// Output PNG file
        #[arg(short, long)]
        output: String,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
