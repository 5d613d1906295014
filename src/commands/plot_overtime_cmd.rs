use std::process::ExitCode;

use crate::commands::analysis_input::analyze_entries_file;
use crate::commands::base_commands::Commands;
use crate::services::overtime_plot::plot_overtime_chart;

pub async fn plot_overtime_command(cmd: Commands) -> ExitCode {
    if let Commands::PlotOvertime {
        input,
        output,
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

        if let Err(e) = plot_overtime_chart(&analysis, &output).await {
            eprintln!("Failed to plot overtime: {e}");
            return ExitCode::FAILURE;
        }
        println!("Overtime chart written to {output}");
    }
    ExitCode::SUCCESS
}
