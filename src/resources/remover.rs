//! Removal seam between the deleter and the filesystem.
use std::io;
use std::path::Path;

/// Removes filesystem entries.
///
/// [`SystemRemover`] is the real implementation; tests substitute a mock to
/// inject failures without racing the filesystem.
#[cfg_attr(test, mockall::automock)]
pub trait Remover {
    /// Remove a single file (or a symlink to one) without recursion.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be removed.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove a directory and everything beneath it.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if any part of the tree cannot be
    /// removed. Entries removed before the failure stay removed.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// [`Remover`] backed by [`std::fs`].
///
/// [`std::fs::remove_dir_all`] does not follow a symlink at `path`; a link to
/// a directory is unlinked and its target left intact.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRemover;

impl Remover for SystemRemover {
    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn removes_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "x").unwrap();
        SystemRemover.remove_file(&file).unwrap();
        assert!(!file.exists());
    }

    #[test]
    fn removes_directory_tree() {
        let dir = tempfile::tempdir().unwrap();
        let tree = dir.path().join("junk");
        fs::create_dir_all(tree.join("a").join("b")).unwrap();
        fs::write(tree.join("a").join("b").join("c.txt"), "x").unwrap();
        SystemRemover.remove_dir_all(&tree).unwrap();
        assert!(!tree.exists());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SystemRemover
            .remove_file(&dir.path().join("gone"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SystemRemover.remove_dir_all(&dir.path().join("gone")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_is_unlinked_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real");
        fs::create_dir(&real).unwrap();
        fs::write(real.join("keep.txt"), "x").unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        SystemRemover.remove_dir_all(&link).unwrap();

        assert!(link.symlink_metadata().is_err(), "link should be gone");
        assert!(real.join("keep.txt").exists(), "target must survive");
    }
}
