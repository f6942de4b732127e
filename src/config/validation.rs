//! Sanity checks for names listed in the removal policy.
//!
//! Policy names are compared against basenames of immediate children of the
//! home directory, so a name that could never be a basename is a mistake in
//! the policy document rather than something to silently ignore.
use crate::error::ConfigError;

/// Characters that cannot appear in a single path component.
const SEPARATORS: &[char] = &['/', '\\'];

/// Check that `name` can match the basename of a directory entry.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidName`] describing the first problem found.
pub fn check_name(list: &'static str, name: &str) -> Result<(), ConfigError> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name == "." || name == ".." {
        Some("name refers to a directory itself")
    } else if name.contains(SEPARATORS) {
        Some("contains a path separator")
    } else if name.contains('\0') {
        Some("contains a NUL byte")
    } else {
        None
    };

    reason.map_or(Ok(()), |reason| {
        Err(ConfigError::InvalidName {
            list,
            name: name.to_string(),
            reason,
        })
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn reason_for(name: &str) -> Option<&'static str> {
        match check_name("files", name) {
            Ok(()) => None,
            Err(ConfigError::InvalidName { reason, .. }) => Some(reason),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn accepts_dotfile_names() {
        assert!(check_name("files", ".bashrc").is_ok());
        assert!(check_name("directories", ".config").is_ok());
        assert!(check_name("directories", "Documents").is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        assert_eq!(reason_for(""), Some("name is empty"));
    }

    #[test]
    fn rejects_dot_and_dotdot() {
        assert_eq!(reason_for("."), Some("name refers to a directory itself"));
        assert_eq!(reason_for(".."), Some("name refers to a directory itself"));
    }

    #[test]
    fn rejects_separators() {
        assert_eq!(reason_for(".config/nvim"), Some("contains a path separator"));
        assert_eq!(reason_for("a\\b"), Some("contains a path separator"));
    }

    #[test]
    fn rejects_nul_byte() {
        assert_eq!(reason_for("bad\0name"), Some("contains a NUL byte"));
    }

    #[test]
    fn error_carries_list_and_name() {
        let err = check_name("directories", "x/y").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid directories entry 'x/y': contains a path separator"
        );
    }
}
