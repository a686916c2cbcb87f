//! Event system for fim.
//! `FimEventHandler` trait with no-op defaults, synchronous dispatch.

pub mod handler;
pub mod types;

pub use handler::{FimEventHandler, NoOpHandler};
pub use types::*;
