pub mod config;
pub mod error;
pub mod listings;
pub mod scoring;
pub mod seed;
pub mod telemetry;
