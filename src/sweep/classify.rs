//! Classifier: decide which immediate children of the home directory to remove.
use std::path::Path;

use super::{Protection, RemovalPlan, Verdict};
use crate::config::Policy;
use crate::error::{InspectionError, SweepError};
use crate::logging::Log;
use crate::resources::{Entry, EntryKind, probe_marker};

/// Classify a single entry against `policy`.
///
/// Files are removable unless allow-listed. Directories are removable unless
/// allow-listed or holding a directory named by the policy's VCS marker.
/// Everything else is ignored.
#[must_use]
pub fn verdict(entry: &Entry, policy: &Policy) -> Verdict {
    match entry.kind {
        EntryKind::File if policy.is_allowed_file(&entry.name) => {
            Verdict::Protected(Protection::AllowListed)
        }
        EntryKind::File => Verdict::Remove,
        EntryKind::Directory if policy.is_allowed_dir(&entry.name) => {
            Verdict::Protected(Protection::AllowListed)
        }
        EntryKind::Directory if probe_marker(&entry.path, policy.vcs_marker()).protects() => {
            Verdict::Protected(Protection::VcsMarker)
        }
        EntryKind::Directory => Verdict::Remove,
        EntryKind::Other => Verdict::Ignored,
    }
}

/// Build the removal plan for `home`.
///
/// Only immediate children are inspected and nothing is modified. Both
/// groups of the returned plan are sorted by name.
///
/// # Errors
///
/// Returns [`SweepError::Precondition`] if `home` is missing or not a
/// directory, and [`SweepError::Inspection`] if its children cannot be
/// listed.
pub fn classify(home: &Path, policy: &Policy, log: &dyn Log) -> Result<RemovalPlan, SweepError> {
    crate::home::verify(home)?;

    let inspection_error = |source| InspectionError {
        path: home.to_path_buf(),
        source,
    };

    let mut plan = RemovalPlan::new();
    for dir_entry in std::fs::read_dir(home).map_err(inspection_error)? {
        let dir_entry = dir_entry.map_err(inspection_error)?;
        let path = dir_entry.path();
        let kind = EntryKind::probe(&path);
        let entry = Entry::new(path, kind);

        match verdict(&entry, policy) {
            Verdict::Remove => {
                log.debug(&format!("remove {kind} {}", entry.name));
                plan.push(entry);
            }
            Verdict::Protected(reason) => {
                log.debug(&format!("keep {kind} {}: {reason}", entry.name));
            }
            Verdict::Ignored => {
                log.debug(&format!(
                    "ignore {}: not a regular file or directory",
                    entry.name
                ));
            }
        }
    }

    plan.sort();
    Ok(plan)
}
