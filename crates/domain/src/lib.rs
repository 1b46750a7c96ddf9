//! Shared types for the session-logger crates: error kinds, configuration,
//! structured trace events and the static tool manifest.

pub mod config;
pub mod error;
pub mod tool;
pub mod trace;
