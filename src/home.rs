//! Home directory resolution and precondition checks.
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::PreconditionError;

/// Resolve the invoking user's home directory from the environment.
///
/// Reads `HOME`, then `USERPROFILE`. Empty values are treated as unset.
///
/// # Errors
///
/// Returns [`PreconditionError::Unresolved`] if neither variable is set.
pub fn resolve() -> Result<PathBuf, PreconditionError> {
    resolve_from(|key| std::env::var_os(key))
}

/// Resolve the home directory using a custom environment lookup.
///
/// # Errors
///
/// Returns [`PreconditionError::Unresolved`] if the lookup yields nothing
/// usable for either variable.
pub fn resolve_from(
    lookup: impl Fn(&str) -> Option<OsString>,
) -> Result<PathBuf, PreconditionError> {
    ["HOME", "USERPROFILE"]
        .into_iter()
        .filter_map(&lookup)
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
        .ok_or(PreconditionError::Unresolved)
}

/// Verify that `path` exists and is a directory.
///
/// Symlinks are followed, so a home directory reached through a link is
/// accepted.
///
/// # Errors
///
/// Returns [`PreconditionError::NotFound`] if nothing exists at `path`, or
/// [`PreconditionError::NotADirectory`] if it is something else.
pub fn verify(path: &Path) -> Result<(), PreconditionError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PreconditionError::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(_) => Err(PreconditionError::NotFound {
            path: path.to_path_buf(),
        }),
    }
}
