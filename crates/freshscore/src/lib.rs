pub mod config;
pub mod error;
pub mod freshness;
pub mod telemetry;
