//! Classification, confirmation, and deletion of home-directory entries.
//!
//! A run flows through three steps:
//!
//! - **[`classify()`]**: list the home directory and build a [`RemovalPlan`]
//! - **[`confirm()`]**: show the plan and ask the operator for a `y`
//! - **[`delete()`]**: remove every planned entry, collecting a [`DeletionReport`]
pub mod classify;
pub mod confirm;
pub mod delete;

use std::fmt;

use crate::resources::{Entry, EntryKind};

pub use classify::{classify, verdict};
pub use confirm::{Decision, confirm, is_affirmative, render_prompt};
pub use delete::{DeletionReport, delete};

/// Why an entry was kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    /// The basename is on the file or directory allow-list.
    AllowListed,
    /// The directory contains a VCS marker directory.
    VcsMarker,
    /// The entry holds the log file of the current run.
    ActiveLog,
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AllowListed => "allow-listed",
            Self::VcsMarker => "contains a version-control directory",
            Self::ActiveLog => "holds the active log file",
        })
    }
}

/// Classification result for a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Offer the entry for removal.
    Remove,
    /// Keep the entry.
    Protected(Protection),
    /// Neither a file nor a directory; never touched.
    Ignored,
}

/// Entries slated for removal, split by kind and sorted by name.
///
/// Built once by [`classify()`] and consumed by [`delete()`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalPlan {
    files: Vec<Entry>,
    dirs: Vec<Entry>,
}

impl RemovalPlan {
    /// Create an empty plan.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            files: Vec::new(),
            dirs: Vec::new(),
        }
    }

    /// Add an entry to the group matching its kind.
    ///
    /// Entries of kind [`EntryKind::Other`] are never planned and are dropped.
    pub fn push(&mut self, entry: Entry) {
        match entry.kind {
            EntryKind::File => self.files.push(entry),
            EntryKind::Directory => self.dirs.push(entry),
            EntryKind::Other => {}
        }
    }

    /// Take the entry named `name` out of the plan, whichever group holds it.
    pub fn withdraw(&mut self, name: &str) -> Option<Entry> {
        for group in [&mut self.files, &mut self.dirs] {
            if let Some(index) = group.iter().position(|e| e.name == name) {
                return Some(group.remove(index));
            }
        }
        None
    }

    /// Order both groups by name.
    pub fn sort(&mut self) {
        self.files.sort_by(|a, b| a.name.cmp(&b.name));
        self.dirs.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Files to remove.
    #[must_use]
    pub fn files(&self) -> &[Entry] {
        &self.files
    }

    /// Directories to remove.
    #[must_use]
    pub fn dirs(&self) -> &[Entry] {
        &self.dirs
    }

    /// Return `true` if there is nothing to remove.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }

    /// Total number of planned entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len() + self.dirs.len()
    }
}
