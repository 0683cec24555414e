pub mod config;
pub mod error;
pub mod format;
pub mod import;
pub mod portfolio;
pub mod roi;
pub mod telemetry;
