//! Removal policy: which home-directory entries are never offered for removal.
//!
//! The built-in policy lives in `conf/policy.toml` and is compiled into the
//! binary, so the allow-lists cannot be changed without rebuilding. Callers
//! receive an immutable [`Policy`] and pass it to the classifier explicitly;
//! tests construct fixture policies with [`Policy::new`].
pub mod validation;

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::error::ConfigError;

/// Embedded policy document.
const POLICY_TOML: &str = include_str!("../../conf/policy.toml");

/// On-disk shape of `conf/policy.toml`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyDocument {
    vcs_marker: String,
    files: NameList,
    directories: NameList,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NameList {
    #[serde(default)]
    allowed: Vec<String>,
}

/// Immutable classification policy.
///
/// A file is protected when its basename is in [`allowed_files`](Self::allowed_files).
/// A directory is protected when its basename is in
/// [`allowed_dirs`](Self::allowed_dirs) *or* it contains a child directory
/// named [`vcs_marker`](Self::vcs_marker).
///
/// # Examples
///
/// ```
/// use home_sweep::config::Policy;
///
/// let policy = Policy::new([".bashrc"], [".ssh"], ".git").unwrap();
/// assert!(policy.is_allowed_file(".bashrc"));
/// assert!(!policy.is_allowed_dir(".bashrc"));
/// assert_eq!(policy.vcs_marker(), ".git");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    allowed_files: BTreeSet<String>,
    allowed_dirs: BTreeSet<String>,
    vcs_marker: String,
}

impl Policy {
    /// Build a policy from explicit name lists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidName`] if any name is empty, is `.` or
    /// `..`, or contains a path separator.
    pub fn new<F, D>(files: F, dirs: D, vcs_marker: &str) -> Result<Self, ConfigError>
    where
        F: IntoIterator,
        F::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        let allowed_files = collect_names("files", files)?;
        let allowed_dirs = collect_names("directories", dirs)?;
        validation::check_name("vcs_marker", vcs_marker)?;
        Ok(Self {
            allowed_files,
            allowed_dirs,
            vcs_marker: vcs_marker.to_string(),
        })
    }

    /// Parse a policy document in the `conf/policy.toml` format.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is malformed, or
    /// [`ConfigError::InvalidName`] if a listed name is unusable.
    pub fn from_toml(document: &str) -> Result<Self, ConfigError> {
        let doc: PolicyDocument = toml::from_str(document)?;
        Self::new(doc.files.allowed, doc.directories.allowed, &doc.vcs_marker)
    }

    /// Load the policy compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded document is malformed, which the
    /// test suite rules out.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml(POLICY_TOML)
    }

    /// Return `true` if a file with this basename must never be removed.
    #[must_use]
    pub fn is_allowed_file(&self, name: &str) -> bool {
        self.allowed_files.contains(name)
    }

    /// Return `true` if a directory with this basename must never be removed.
    #[must_use]
    pub fn is_allowed_dir(&self, name: &str) -> bool {
        self.allowed_dirs.contains(name)
    }

    /// Name of the child directory that protects its parent.
    #[must_use]
    pub fn vcs_marker(&self) -> &str {
        &self.vcs_marker
    }

    /// Allow-listed file names, sorted.
    pub fn allowed_files(&self) -> impl Iterator<Item = &str> {
        self.allowed_files.iter().map(String::as_str)
    }

    /// Allow-listed directory names, sorted.
    pub fn allowed_dirs(&self) -> impl Iterator<Item = &str> {
        self.allowed_dirs.iter().map(String::as_str)
    }
}

fn collect_names<I>(list: &'static str, names: I) -> Result<BTreeSet<String>, ConfigError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    names
        .into_iter()
        .map(|name| {
            let name = name.into();
            validation::check_name(list, &name).map(|()| name)
        })
        .collect()
}
