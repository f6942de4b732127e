//! Domain-specific error types for the home sweeper.
//!
//! Library modules return the typed errors below; the command layer and
//! `main` convert them to [`anyhow::Error`] via `?` where convenient.
//!
//! # Error hierarchy
//!
//! ```text
//! SweepError                          fatal, raised before anything is deleted
//! ├── Precondition(PreconditionError) home directory unusable
//! └── Inspection(InspectionError)     home directory cannot be listed
//!
//! ConfigError                         built-in policy document is malformed
//! DeletionError                       one entry could not be removed (never fatal)
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::resources::EntryKind;

/// Fatal errors raised while building the removal plan.
///
/// Either variant stops the run before any filesystem change is made.
#[derive(Error, Debug)]
pub enum SweepError {
    /// The home directory could not be resolved or is not a directory.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// The children of the home directory could not be enumerated.
    #[error(transparent)]
    Inspection(#[from] InspectionError),
}

/// The home directory is missing, unresolvable, or not a directory.
#[derive(Error, Debug)]
pub enum PreconditionError {
    /// Neither `HOME` nor `USERPROFILE` is set.
    #[error("home directory not found or not a directory: neither HOME nor USERPROFILE is set")]
    Unresolved,

    /// The resolved path does not exist.
    #[error("home directory not found or not a directory: {} does not exist", path.display())]
    NotFound {
        /// Resolved home directory path.
        path: PathBuf,
    },

    /// The resolved path exists but is not a directory.
    #[error("home directory not found or not a directory: {} is not a directory", path.display())]
    NotADirectory {
        /// Resolved home directory path.
        path: PathBuf,
    },
}

/// Listing the children of the home directory failed.
#[derive(Error, Debug)]
#[error("failed to inspect home directory {}", path.display())]
pub struct InspectionError {
    /// Directory whose listing failed.
    pub path: PathBuf,
    /// Underlying I/O error.
    #[source]
    pub source: std::io::Error,
}

/// A single planned entry could not be removed.
#[derive(Error, Debug)]
#[error("failed to remove {kind} {name}: {source}")]
pub struct DeletionError {
    /// Display name of the entry (its basename).
    pub name: String,
    /// Whether the entry was planned as a file or a directory.
    pub kind: EntryKind,
    /// Underlying I/O error.
    #[source]
    pub source: std::io::Error,
}

/// The embedded removal policy could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The policy document is not valid TOML or has the wrong shape.
    #[error("invalid policy document: {0}")]
    Parse(#[from] toml::de::Error),

    /// A listed name can never match a basename.
    #[error("invalid {list} entry '{name}': {reason}")]
    InvalidName {
        /// Which list the name came from (`files`, `directories`, `vcs_marker`).
        list: &'static str,
        /// Offending name.
        name: String,
        /// Human-readable explanation.
        reason: &'static str,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::io;

    // -----------------------------------------------------------------------
    // PreconditionError
    // -----------------------------------------------------------------------

    #[test]
    fn precondition_not_found_display() {
        let e = PreconditionError::NotFound {
            path: PathBuf::from("/home/nobody"),
        };
        assert_eq!(
            e.to_string(),
            "home directory not found or not a directory: /home/nobody does not exist"
        );
    }

    #[test]
    fn precondition_not_a_directory_display() {
        let e = PreconditionError::NotADirectory {
            path: PathBuf::from("/tmp/file"),
        };
        assert!(e.to_string().contains("/tmp/file is not a directory"));
    }

    #[test]
    fn precondition_unresolved_mentions_env_vars() {
        let msg = PreconditionError::Unresolved.to_string();
        assert!(msg.contains("HOME"));
        assert!(msg.contains("USERPROFILE"));
    }

    // -----------------------------------------------------------------------
    // InspectionError
    // -----------------------------------------------------------------------

    #[test]
    fn inspection_error_display_and_source() {
        let e = InspectionError {
            path: PathBuf::from("/home/user"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert_eq!(e.to_string(), "failed to inspect home directory /home/user");
        assert!(e.source().is_some());
    }

    #[test]
    fn inspection_error_chain_names_cause_once() {
        let e: SweepError = InspectionError {
            path: PathBuf::from("/home/user"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        }
        .into();
        let rendered = format!("{:#}", anyhow::Error::from(e));
        assert_eq!(
            rendered,
            "failed to inspect home directory /home/user: permission denied"
        );
    }

    // -----------------------------------------------------------------------
    // DeletionError
    // -----------------------------------------------------------------------

    #[test]
    fn deletion_error_display() {
        let e = DeletionError {
            name: "junk".to_string(),
            kind: EntryKind::Directory,
            source: io::Error::new(io::ErrorKind::NotFound, "no such file or directory"),
        };
        assert_eq!(
            e.to_string(),
            "failed to remove directory junk: no such file or directory"
        );
    }

    #[test]
    fn deletion_error_file_display() {
        let e = DeletionError {
            name: "notes.txt".to_string(),
            kind: EntryKind::File,
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.to_string().starts_with("failed to remove file notes.txt"));
    }

    // -----------------------------------------------------------------------
    // ConfigError
    // -----------------------------------------------------------------------

    #[test]
    fn config_invalid_name_display() {
        let e = ConfigError::InvalidName {
            list: "files",
            name: "a/b".to_string(),
            reason: "contains a path separator",
        };
        assert_eq!(
            e.to_string(),
            "invalid files entry 'a/b': contains a path separator"
        );
    }

    #[test]
    fn config_parse_error_wraps_toml() {
        let toml_err = toml::from_str::<toml::Table>("= nope").unwrap_err();
        let e: ConfigError = toml_err.into();
        assert!(e.to_string().starts_with("invalid policy document"));
    }

    // -----------------------------------------------------------------------
    // SweepError conversions
    // -----------------------------------------------------------------------

    #[test]
    fn sweep_error_is_transparent_over_precondition() {
        let inner = PreconditionError::Unresolved;
        let expected = inner.to_string();
        let e: SweepError = inner.into();
        assert_eq!(e.to_string(), expected);
    }

    #[test]
    fn sweep_error_from_inspection() {
        let e: SweepError = InspectionError {
            path: PathBuf::from("/home/user"),
            source: io::Error::other("boom"),
        }
        .into();
        assert!(matches!(e, SweepError::Inspection(_)));
    }

    #[test]
    fn sweep_error_converts_to_anyhow() {
        let e: SweepError = PreconditionError::Unresolved.into();
        let _anyhow_err: anyhow::Error = e.into();
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<SweepError>();
        assert_send_sync::<PreconditionError>();
        assert_send_sync::<InspectionError>();
        assert_send_sync::<DeletionError>();
        assert_send_sync::<ConfigError>();
    }
}
