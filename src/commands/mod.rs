pub mod analysis_input;
pub mod analyze_cmd;
pub mod base_commands;
pub mod completions_cmd;
pub mod export_cmd;
pub mod fetch_entries_cmd;
pub mod plot_overtime_cmd;
pub mod report_format;
pub mod reset_overrides_cmd;
pub mod set_override_cmd;
pub mod summary_cmd;
