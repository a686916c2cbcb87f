//! Shared collection types.

pub mod collections;

pub use collections::FxHashSet;
