//! Top-level command orchestration.
pub mod clean;

/// Log file name and tracing command label for a cleanup run.
pub const CLEAN_COMMAND: &str = "clean";
