use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use overtime::commands::analyze_cmd::analyze_command;
use overtime::commands::base_commands::{CliArgs, Commands};
use overtime::commands::completions_cmd::completions_command;
use overtime::commands::export_cmd::export_command;
use overtime::commands::fetch_entries_cmd::fetch_entries_command;
use overtime::commands::plot_overtime_cmd::plot_overtime_command;
use overtime::commands::reset_overrides_cmd::reset_overrides_command;
use overtime::commands::set_override_cmd::set_override_command;
use overtime::commands::summary_cmd::summary_command;

#[tokio::main]
async fn main() -> ExitCode {
    // stdout is reserved for reports and completion scripts.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    match args.command {
        cmd @ Commands::FetchEntries { .. } => fetch_entries_command(cmd).await,
        cmd @ Commands::Analyze { .. } => analyze_command(cmd).await,
        cmd @ Commands::Summary { .. } => summary_command(cmd).await,
        cmd @ Commands::Export { .. } => export_command(cmd).await,
        cmd @ Commands::SetOverride { .. } => set_override_command(cmd).await,
        cmd @ Commands::ResetOverrides { .. } => reset_overrides_command(cmd).await,
        cmd @ Commands::PlotOvertime { .. } => plot_overtime_command(cmd).await,
        cmd @ Commands::Completions { .. } => completions_command(cmd),
    }
}
