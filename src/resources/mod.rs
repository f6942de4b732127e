//! Filesystem primitives: home-directory entries, kind and marker probes,
//! and the removal seam.
pub mod remover;

use std::fmt;
use std::path::{Path, PathBuf};

pub use remover::{Remover, SystemRemover};

/// Kind of an immediate child of the home directory.
///
/// Determined with [`std::fs::metadata`], so symlinks are followed: a link to
/// a regular file is a [`File`](Self::File), a link to a directory is a
/// [`Directory`](Self::Directory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// Anything else: dangling symlinks, sockets, devices, FIFOs, or an entry
    /// whose metadata could not be read.
    Other,
}

impl EntryKind {
    /// Probe the kind of the entry at `path`.
    ///
    /// Never fails: an entry whose metadata cannot be read (dangling link,
    /// concurrent removal, permission error) is reported as [`Other`](Self::Other).
    #[must_use]
    pub fn probe(path: &Path) -> Self {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => Self::File,
            Ok(meta) if meta.is_dir() => Self::Directory,
            Ok(_) | Err(_) => Self::Other,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Other => "other",
        })
    }
}

/// An immediate child of the home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Full path to the entry.
    pub path: PathBuf,
    /// Basename, lossily converted to UTF-8 for display and matching.
    pub name: String,
    /// Kind observed at classification time.
    pub kind: EntryKind,
}

impl Entry {
    /// Create an entry for `path` with a known kind.
    #[must_use]
    pub fn new(path: PathBuf, kind: EntryKind) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name, kind }
    }
}

/// Result of looking for a VCS marker inside a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerProbe {
    /// The marker exists and is a directory.
    Directory,
    /// Something with the marker's name exists but it is not a directory.
    NotDirectory,
    /// Nothing with the marker's name exists, or its kind could not be
    /// determined.
    Absent,
}

impl MarkerProbe {
    /// Return `true` only when the marker protects its parent.
    #[must_use]
    pub const fn protects(self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// Look for a child named `marker` inside `dir`.
///
/// Symlinks are followed. Any error while reading the marker's metadata
/// collapses to [`MarkerProbe::Absent`]; the allow-list, not this probe, is
/// the authoritative protection.
#[must_use]
pub fn probe_marker(dir: &Path, marker: &str) -> MarkerProbe {
    match std::fs::metadata(dir.join(marker)) {
        Ok(meta) if meta.is_dir() => MarkerProbe::Directory,
        Ok(_) => MarkerProbe::NotDirectory,
        Err(_) => MarkerProbe::Absent,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn probe_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "x").unwrap();
        assert_eq!(EntryKind::probe(&file), EntryKind::File);
    }

    #[test]
    fn probe_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(EntryKind::probe(dir.path()), EntryKind::Directory);
    }

    #[test]
    fn probe_missing_is_other() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            EntryKind::probe(&dir.path().join("gone")),
            EntryKind::Other
        );
    }

    #[cfg(unix)]
    #[test]
    fn probe_dangling_symlink_is_other() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("dangling");
        std::os::unix::fs::symlink("/nonexistent/target", &link).unwrap();
        assert_eq!(EntryKind::probe(&link), EntryKind::Other);
    }

    #[cfg(unix)]
    #[test]
    fn probe_follows_symlink_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real");
        fs::create_dir(&real).unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();
        assert_eq!(EntryKind::probe(&link), EntryKind::Directory);
    }

    #[test]
    fn entry_name_is_basename() {
        let entry = Entry::new(PathBuf::from("/home/user/junk"), EntryKind::Directory);
        assert_eq!(entry.name, "junk");
    }

    #[test]
    fn kind_display() {
        assert_eq!(EntryKind::File.to_string(), "file");
        assert_eq!(EntryKind::Directory.to_string(), "directory");
        assert_eq!(EntryKind::Other.to_string(), "other");
    }

    // -----------------------------------------------------------------------
    // probe_marker
    // -----------------------------------------------------------------------

    #[test]
    fn marker_directory_protects() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let probe = probe_marker(dir.path(), ".git");
        assert_eq!(probe, MarkerProbe::Directory);
        assert!(probe.protects());
    }

    #[test]
    fn marker_file_does_not_protect() {
        let dir = tempfile::tempdir().unwrap();
        // Git worktrees and submodules use a `.git` file.
        fs::write(dir.path().join(".git"), "gitdir: ../elsewhere").unwrap();
        let probe = probe_marker(dir.path(), ".git");
        assert_eq!(probe, MarkerProbe::NotDirectory);
        assert!(!probe.protects());
    }

    #[test]
    fn marker_absent() {
        let dir = tempfile::tempdir().unwrap();
        let probe = probe_marker(dir.path(), ".git");
        assert_eq!(probe, MarkerProbe::Absent);
        assert!(!probe.protects());
    }

    #[test]
    fn marker_probe_on_missing_parent_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            probe_marker(&dir.path().join("vanished"), ".git"),
            MarkerProbe::Absent
        );
    }

    #[test]
    fn marker_is_only_checked_one_level_deep() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested").join(".git")).unwrap();
        assert_eq!(probe_marker(dir.path(), ".git"), MarkerProbe::Absent);
    }
}
