use std::process::ExitCode;

use crate::commands::analysis_input::analyze_entries_file;
use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_grouped_summary;
use crate::services::grouping::group_analysis;

pub async fn summary_command(cmd: Commands) -> ExitCode {
    if let Commands::Summary {
        input,
        group_by,
        settings,
    } = cmd
    {
        let analysis = match analyze_entries_file(&input, &settings).await {
            Ok(analysis) => analysis,
            Err(e) => {
                eprintln!("Failed to analyze time entries: {e}");
                return ExitCode::FAILURE;
            }
        };
        println!("{}", format_grouped_summary(&group_analysis(&analysis, group_by)));
    }
    ExitCode::SUCCESS
}
