//! fim-core: errors, configuration, events, tracing and constants shared by
//! the fim integrity engine and its CLI.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;
