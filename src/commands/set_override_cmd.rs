use std::process::ExitCode;

use crate::commands::base_commands::Commands;
use crate::domain::config::{OverrideField, OvertimeConfig};
use crate::services::settings_yaml::{
    load_config_from_yaml_file, load_overrides_from_yaml_file, save_overrides_to_yaml_file,
};

pub async fn set_override_command(cmd: Commands) -> ExitCode {
    if let Commands::SetOverride {
        file,
        user,
        capacity,
        multiplier,
        settings,
    } = cmd
    {
        let edits: Vec<(OverrideField, f64)> = [
            (OverrideField::Capacity, capacity),
            (OverrideField::Multiplier, multiplier),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| (field, value)))
        .collect();
        if edits.is_empty() {
            eprintln!("Failed to set override: pass --capacity and/or --multiplier");
            return ExitCode::FAILURE;
        }

        let config = match settings {
            Some(path) => match load_config_from_yaml_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Failed to load settings: {e}");
                    return ExitCode::FAILURE;
                }
            },
            None => OvertimeConfig::default(),
        };
        let mut overrides = match load_overrides_from_yaml_file(&file) {
            Ok(overrides) => overrides,
            Err(e) => {
                eprintln!("Failed to load overrides: {e}");
                return ExitCode::FAILURE;
            }
        };

        for (field, value) in edits {
            if let Err(e) = overrides.apply_edit(&user, field, value, &config) {
                eprintln!("Failed to set override: {e}");
                return ExitCode::FAILURE;
            }
        }

        if let Err(e) = save_overrides_to_yaml_file(&file, &overrides) {
            eprintln!("Failed to save overrides: {e}");
            return ExitCode::FAILURE;
        }
        match overrides.get(&user) {
            Some(value) => println!(
                "Override for {user}: capacity {}, multiplier {}",
                describe(value.capacity),
                describe(value.multiplier)
            ),
            None => println!("{user} uses the global defaults"),
        }
    }
    ExitCode::SUCCESS
}

fn describe(value: Option<f64>) -> String {
    value.map_or_else(|| "default".to_string(), |value| value.to_string())
}
