//! Deleter: best-effort removal of every planned entry.
use super::RemovalPlan;
use crate::error::DeletionError;
use crate::logging::Log;
use crate::resources::{Entry, EntryKind, Remover};

/// Outcome of a deletion pass.
#[derive(Debug, Default)]
pub struct DeletionReport {
    /// Number of files removed.
    pub removed_files: usize,
    /// Number of directories removed.
    pub removed_dirs: usize,
    /// Entries that could not be removed, in the order they were attempted.
    pub failures: Vec<DeletionError>,
}

impl DeletionReport {
    /// Total number of removal attempts.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.removed_files + self.removed_dirs + self.failures.len()
    }

    /// Return `true` if any entry could not be removed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// One-line summary of what was removed.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Removed total {} directories and {} files",
            self.removed_dirs, self.removed_files
        )
    }
}

/// Remove one entry according to the kind it was planned with.
fn remove_entry(entry: &Entry, remover: &dyn Remover) -> Result<(), DeletionError> {
    let result = match entry.kind {
        EntryKind::Directory => remover.remove_dir_all(&entry.path),
        EntryKind::File | EntryKind::Other => remover.remove_file(&entry.path),
    };
    result.map_err(|source| DeletionError {
        name: entry.name.clone(),
        kind: entry.kind,
        source,
    })
}

/// Attempt to remove every entry in `plan`, files first, then directories.
///
/// Each entry is attempted exactly once. A failure is logged immediately,
/// recorded in the report, and never stops the remaining removals.
pub fn delete(plan: &RemovalPlan, remover: &dyn Remover, log: &dyn Log) -> DeletionReport {
    let mut report = DeletionReport::default();

    for entry in plan.files().iter().chain(plan.dirs()) {
        match remove_entry(entry, remover) {
            Ok(()) => {
                log.debug(&format!("removed {} {}", entry.kind, entry.name));
                match entry.kind {
                    EntryKind::Directory => report.removed_dirs += 1,
                    EntryKind::File | EntryKind::Other => report.removed_files += 1,
                }
            }
            Err(e) => {
                log.error(&e.to_string());
                report.failures.push(e);
            }
        }
    }

    report
}
