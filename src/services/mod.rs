pub mod clockify_api;
pub mod csv_export;
pub mod daily_allocator;
pub mod entries_json;
pub mod entry_normalizer;
pub mod grouping;
pub mod overtime_analysis;
pub mod overtime_plot;
pub mod settings_yaml;
pub mod team_aggregator;
pub mod time_entry_source;
pub mod user_overtime;
