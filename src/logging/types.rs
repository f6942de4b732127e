//! Core logging types: the [`Log`] trait and message levels.

/// Severity of a logged message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Stage header (major section of a run).
    Stage,
    /// Informational message.
    Info,
    /// Debug detail, hidden on the console unless verbose.
    Debug,
    /// Something unexpected that does not stop the run.
    Warn,
    /// A failed operation.
    Error,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) forwards to `tracing`; tests use an
/// in-memory implementation so classification and deletion code can be
/// checked for what it reports without installing a subscriber.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_equality() {
        assert_eq!(Level::Info, Level::Info);
        assert_ne!(Level::Warn, Level::Error);
        assert_ne!(Level::Stage, Level::Info);
    }
}
