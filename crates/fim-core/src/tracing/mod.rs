//! Observability for fim.
//! `tracing` crate with `EnvFilter`, logs on stderr.

pub mod setup;

pub use setup::{init_tracing, init_tracing_verbose};
