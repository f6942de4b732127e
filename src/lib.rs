//! Home directory cleanup.
//!
//! Scans the immediate children of the invoking user's home directory,
//! shows every entry that is neither allow-listed nor a version-controlled
//! project, and deletes them once the operator answers `y`.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: the removal policy (allow-lists and the VCS marker)
//! - **[`home`]**: locate the home directory and check it is usable
//! - **[`resources`]**: filesystem entries, the marker probe, and the removal seam
//! - **[`sweep`]**: classifier, confirmation gate, and deleter
//! - **[`commands`]**: the end-to-end cleanup run
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod home;
pub mod logging;
pub mod resources;
pub mod sweep;
