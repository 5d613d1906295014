use std::process::ExitCode;

use crate::commands::base_commands::Commands;
use crate::services::settings_yaml::{load_overrides_from_yaml_file, save_overrides_to_yaml_file};

pub async fn reset_overrides_command(cmd: Commands) -> ExitCode {
    if let Commands::ResetOverrides { file } = cmd {
        let mut overrides = match load_overrides_from_yaml_file(&file) {
            Ok(overrides) => overrides,
            Err(e) => {
                eprintln!("Failed to load overrides: {e}");
                return ExitCode::FAILURE;
            }
        };
        let removed = overrides.len();
        overrides.reset();

        if let Err(e) = save_overrides_to_yaml_file(&file, &overrides) {
            eprintln!("Failed to save overrides: {e}");
            return ExitCode::FAILURE;
        }
        println!("Removed {removed} user overrides from {file}");
    }
    ExitCode::SUCCESS
}
