use std::io;
use std::process::ExitCode;

use clap::CommandFactory;
use clap_complete::generate;

use crate::commands::base_commands::{CliArgs, Commands};

pub const BIN_NAME: &str = "overtime";

pub fn completions_command(cmd: Commands) -> ExitCode {
    if let Commands::Completions { shell } = cmd {
        let mut command = CliArgs::command();
        generate(shell, &mut command, BIN_NAME, &mut io::stdout());
    }
    ExitCode::SUCCESS
}
