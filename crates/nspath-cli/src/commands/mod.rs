//! Command implementations for the nspath CLI tool

pub mod flatten;

pub use flatten::{cmd_count, cmd_flatten};
