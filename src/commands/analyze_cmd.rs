use std::path::Path;
use std::process::ExitCode;

use thiserror::Error;

use crate::commands::analysis_input::analyze_entries_file;
use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_analysis_report;
use crate::domain::analysis::AnalysisResult;

#[derive(Error, Debug)]
pub enum AnalysisOutputError {
    #[error("failed to serialize analysis as json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to serialize analysis as yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub async fn analyze_command(cmd: Commands) -> ExitCode {
    if let Commands::Analyze {
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

        println!("{}", format_analysis_report(&analysis));

        if let Some(output) = output {
            let contents = match serialize_analysis(&analysis, &output) {
                Ok(contents) => contents,
                Err(e) => {
                    eprintln!("Failed to serialize analysis: {e}");
                    return ExitCode::FAILURE;
                }
            };
            if let Err(e) = tokio::fs::write(&output, contents).await {
                eprintln!("Failed to write analysis output: {e}");
                return ExitCode::FAILURE;
            }
            println!("Analysis written to {output}");
        }
    }
    ExitCode::SUCCESS
}

// JSON for `.json` files, YAML for anything else.
pub fn serialize_analysis(analysis: &AnalysisResult, output: &str) -> Result<String, AnalysisOutputError> {
    let is_json = Path::new(output)
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(serde_json::to_string_pretty(analysis)? + "\n")
    } else {
        Ok(serde_yaml::to_string(analysis)?)
    }
}
