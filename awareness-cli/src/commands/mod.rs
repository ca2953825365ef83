//! CLI command implementations.

pub mod common;
pub mod config;
pub mod rank;
pub mod search;
pub mod usage;
