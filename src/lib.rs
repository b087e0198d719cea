pub mod config;
pub mod lineup;
pub mod output;
pub mod scoring;
pub mod summary;
pub mod telemetry;
