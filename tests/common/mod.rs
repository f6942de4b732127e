// Shared helpers for integration tests.
//
// Provides a temporary home directory and a separate temporary cache root so
// each test drives the binary against an isolated environment without
// touching the real home directory of the user running the suite.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;

/// An isolated home directory plus a cache root for the log file.
///
/// Both directories are deleted when the fixture is dropped.
pub struct HomeFixture {
    /// Temporary directory standing in for `$HOME`.
    pub home: tempfile::TempDir,
    /// Temporary directory used as `$XDG_CACHE_HOME`.
    pub cache: tempfile::TempDir,
}

impl HomeFixture {
    /// Create an empty home directory.
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create home dir"),
            cache: tempfile::tempdir().expect("create cache dir"),
        }
    }

    /// Path to the home directory.
    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    /// Path to `name` inside the home directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.home.path().join(name)
    }

    /// Path the run's log file is written to.
    pub fn log_path(&self) -> PathBuf {
        self.cache.path().join("home-sweep").join("clean.log")
    }

    /// Add an empty regular file.
    pub fn with_file(self, name: &str) -> Self {
        std::fs::write(self.path(name), "").expect("write file");
        self
    }

    /// Add a directory holding one file so recursive removal is exercised.
    pub fn with_dir(self, name: &str) -> Self {
        let dir = self.path(name);
        std::fs::create_dir_all(&dir).expect("create dir");
        std::fs::write(dir.join("contents.txt"), "").expect("write nested file");
        self
    }

    /// Add a directory containing a `.git` directory.
    pub fn with_repo(self, name: &str) -> Self {
        std::fs::create_dir_all(self.path(name).join(".git")).expect("create repo");
        self
    }

    /// The scenario used throughout the suite: two allow-listed entries, one
    /// repository, one stray file, and one stray directory.
    pub fn cluttered() -> Self {
        Self::new()
            .with_file(".bashrc")
            .with_file("notes.txt")
            .with_dir(".config")
            .with_repo("project")
            .with_dir("junk")
    }

    /// Set the permission bits of the home directory.
    #[cfg(unix)]
    pub fn set_home_mode(&self, mode: u32) {
        use std::os::unix::fs::PermissionsExt as _;
        std::fs::set_permissions(self.home.path(), std::fs::Permissions::from_mode(mode))
            .expect("set home permissions");
    }

    /// Command for the binary with `HOME` and `XDG_CACHE_HOME` pointed at
    /// the fixture.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("home-sweep").expect("binary is built");
        cmd.env("HOME", self.home.path())
            .env("XDG_CACHE_HOME", self.cache.path())
            .env_remove("USERPROFILE");
        cmd
    }
}
