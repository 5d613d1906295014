pub mod analysis;
pub mod calendar;
pub mod config;
pub mod entry;
pub mod grouping;
