pub mod config;
pub mod error;
pub mod import;
pub mod pts;
pub mod telemetry;
pub mod valuation;
