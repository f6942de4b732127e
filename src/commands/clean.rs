//! Cleanup command: classify, confirm, delete, summarise.
use std::io::{self, BufRead, IsTerminal as _, Write};
use std::path::{Component, Path};

use anyhow::{Context as _, Result};

use crate::config::Policy;
use crate::error::SweepError;
use crate::logging::{Log, Logger};
use crate::resources::{Remover, SystemRemover};
use crate::sweep::{self, Decision, DeletionReport, Protection};

/// How a cleanup run ended. Every variant is a successful exit.
#[derive(Debug)]
pub enum Outcome {
    /// Classification found nothing to remove; the operator was not asked.
    NothingToRemove,
    /// The operator did not answer `y`; nothing was touched.
    Declined,
    /// Deletion ran; individual failures are inside the report.
    Completed(DeletionReport),
}

/// Everything a cleanup run needs besides the home directory.
#[derive(Debug)]
pub struct Session<'a, R: ?Sized, W: ?Sized> {
    /// Classification policy.
    pub policy: &'a Policy,
    /// Source of the confirmation answer.
    pub input: &'a mut R,
    /// Destination of the confirmation prompt.
    pub output: &'a mut W,
    /// Whether to colour the prompt.
    pub color: bool,
    /// Log file written by this run. The home child that holds it is kept.
    pub log_file: Option<&'a Path>,
}

/// Run a cleanup of the invoking user's home directory on the terminal.
///
/// # Errors
///
/// Returns an error if the home directory cannot be resolved, is not a
/// directory, or cannot be listed. Nothing is deleted in that case.
pub fn run(log: &Logger) -> Result<Outcome> {
    let home = crate::home::resolve()?;
    let policy = Policy::builtin().context("loading built-in removal policy")?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let color = output.is_terminal();

    let outcome = execute(
        &home,
        Session {
            policy: &policy,
            input: &mut input,
            output: &mut output,
            color,
            log_file: log.log_path(),
        },
        &SystemRemover,
        log,
    )?;

    if matches!(outcome, Outcome::Completed(_)) {
        log.print_log_location();
    }
    Ok(outcome)
}

/// Run a cleanup of `home` with explicit I/O and removal backends.
///
/// # Errors
///
/// Returns a [`SweepError`] if classification fails; the filesystem is left
/// untouched in that case. Deletion failures are reported in the
/// [`Outcome::Completed`] report instead.
pub fn execute<R, W>(
    home: &Path,
    session: Session<'_, R, W>,
    remover: &dyn Remover,
    log: &dyn Log,
) -> Result<Outcome, SweepError>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    log.stage("Scanning home directory");
    log.debug(&format!("home: {}", home.display()));
    let mut plan = sweep::classify(home, session.policy, log)?;
    if let Some(log_file) = session.log_file
        && let Some(name) = home_child_containing(home, log_file)
        && let Some(entry) = plan.withdraw(&name)
    {
        log.debug(&format!(
            "keep {} {}: {}",
            entry.kind,
            entry.name,
            Protection::ActiveLog
        ));
    }

    if plan.is_empty() {
        log.info("No files to remove");
        return Ok(Outcome::NothingToRemove);
    }
    log.info(&format!(
        "found {} directories and {} files to remove",
        plan.dirs().len(),
        plan.files().len()
    ));

    match sweep::confirm(&plan, session.color, session.input, session.output) {
        Ok(Decision::Proceed) => {}
        Ok(Decision::Decline) => {
            log.info("Nothing was removed");
            return Ok(Outcome::Declined);
        }
        Err(e) => {
            log.warn(&format!("could not read confirmation, nothing was removed: {e}"));
            return Ok(Outcome::Declined);
        }
    }

    log.stage("Removing entries");
    let report = sweep::delete(&plan, remover, log);
    if report.has_failures() {
        log.warn(&format!(
            "{} of {} entries could not be removed",
            report.failures.len(),
            report.attempted()
        ));
    }
    log.info(&report.summary());
    Ok(Outcome::Completed(report))
}

/// Name of the immediate child of `home` that `path` lives under.
///
/// Both paths are compared as given and, failing that, canonicalised, so a
/// home reached through a symlink still matches.
fn home_child_containing(home: &Path, path: &Path) -> Option<String> {
    let first_component = |relative: &Path| match relative.components().next() {
        Some(Component::Normal(name)) => Some(name.to_string_lossy().into_owned()),
        _ => None,
    };

    if let Ok(relative) = path.strip_prefix(home) {
        return first_component(relative);
    }
    let home = std::fs::canonicalize(home).ok()?;
    let path = std::fs::canonicalize(path).ok()?;
    first_component(path.strip_prefix(&home).ok()?)
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::logging::Level;
    use crate::logging::test_helpers::CapturingLog;
    use crate::resources::remover::MockRemover;
    use std::fs;
    use std::io::Cursor;

    fn policy() -> Policy {
        Policy::new([".bashrc"], [".config"], ".git").unwrap()
    }

    fn populated_home() -> tempfile::TempDir {
        let home = tempfile::tempdir().unwrap();
        fs::write(home.path().join(".bashrc"), "").unwrap();
        fs::write(home.path().join("notes.txt"), "").unwrap();
        fs::create_dir(home.path().join(".config")).unwrap();
        fs::create_dir_all(home.path().join("project").join(".git")).unwrap();
        fs::create_dir(home.path().join("junk")).unwrap();
        home
    }

    fn run_with(
        home: &Path,
        answer: &str,
        remover: &dyn Remover,
        log: &CapturingLog,
    ) -> (Result<Outcome, SweepError>, String) {
        run_with_log_file(home, answer, remover, log, None)
    }

    fn run_with_log_file(
        home: &Path,
        answer: &str,
        remover: &dyn Remover,
        log: &CapturingLog,
        log_file: Option<&Path>,
    ) -> (Result<Outcome, SweepError>, String) {
        let policy = policy();
        let mut input = Cursor::new(answer.as_bytes().to_vec());
        let mut output = Vec::new();
        let outcome = execute(
            home,
            Session {
                policy: &policy,
                input: &mut input,
                output: &mut output,
                color: false,
                log_file,
            },
            remover,
            log,
        );
        (outcome, String::from_utf8(output).unwrap())
    }

    fn untouchable() -> MockRemover {
        let mut remover = MockRemover::new();
        remover.expect_remove_file().never();
        remover.expect_remove_dir_all().never();
        remover
    }

    #[test]
    fn empty_home_skips_prompt() {
        let home = tempfile::tempdir().unwrap();
        let log = CapturingLog::default();
        let (outcome, prompt) = run_with(home.path(), "y\n", &untouchable(), &log);
        assert!(matches!(outcome.unwrap(), Outcome::NothingToRemove));
        assert!(prompt.is_empty(), "prompt must not be shown: {prompt:?}");
        assert!(log.contains(Level::Info, "No files to remove"));
    }

    #[test]
    fn missing_home_fails_before_prompt() {
        let tmp = tempfile::tempdir().unwrap();
        let log = CapturingLog::default();
        let (outcome, prompt) = run_with(&tmp.path().join("nobody"), "y\n", &untouchable(), &log);
        assert!(matches!(outcome, Err(SweepError::Precondition(_))));
        assert!(prompt.is_empty());
    }

    #[test]
    fn decline_leaves_filesystem_untouched() {
        let home = populated_home();
        let log = CapturingLog::default();
        let (outcome, prompt) = run_with(home.path(), "n\n", &untouchable(), &log);
        assert!(matches!(outcome.unwrap(), Outcome::Declined));
        assert!(prompt.contains("junk  notes.txt"));
        assert!(home.path().join("junk").exists());
        assert!(home.path().join("notes.txt").exists());
    }

    #[test]
    fn eof_is_a_decline() {
        let home = populated_home();
        let (outcome, _) = run_with(home.path(), "", &untouchable(), &CapturingLog::default());
        assert!(matches!(outcome.unwrap(), Outcome::Declined));
    }

    #[test]
    fn accept_removes_only_planned_entries() {
        let home = populated_home();
        let log = CapturingLog::default();
        let (outcome, _) = run_with(home.path(), "y\n", &SystemRemover, &log);

        let Outcome::Completed(report) = outcome.unwrap() else {
            panic!("expected a completed run");
        };
        assert_eq!(report.removed_dirs, 1);
        assert_eq!(report.removed_files, 1);
        assert!(!home.path().join("junk").exists());
        assert!(!home.path().join("notes.txt").exists());
        assert!(home.path().join(".bashrc").exists());
        assert!(home.path().join(".config").exists());
        assert!(home.path().join("project").join(".git").exists());
        assert!(log.contains(Level::Info, "Removed total 1 directories and 1 files"));
    }

    #[test]
    fn partial_failure_still_completes() {
        let home = populated_home();
        let mut remover = MockRemover::new();
        remover.expect_remove_file().times(1).returning(|_| Ok(()));
        remover
            .expect_remove_dir_all()
            .times(1)
            .returning(|_| Err(io::Error::new(io::ErrorKind::NotFound, "vanished")));
        let log = CapturingLog::default();

        let (outcome, _) = run_with(home.path(), "Y\n", &remover, &log);

        let Outcome::Completed(report) = outcome.unwrap() else {
            panic!("expected a completed run");
        };
        assert_eq!(report.failures.len(), 1);
        assert!(log.contains(Level::Error, "failed to remove directory junk: vanished"));
        assert!(log.contains(Level::Warn, "1 of 2 entries could not be removed"));
        assert!(log.contains(Level::Info, "Removed total 0 directories and 1 files"));
    }

    #[test]
    fn directory_holding_log_file_is_kept() {
        let home = populated_home();
        let log_dir = home.path().join("tmpcache").join("home-sweep");
        fs::create_dir_all(&log_dir).unwrap();
        let log_file = log_dir.join("clean.log");
        fs::write(&log_file, "").unwrap();
        let log = CapturingLog::default();

        let (outcome, prompt) =
            run_with_log_file(home.path(), "y\n", &SystemRemover, &log, Some(&log_file));

        let Outcome::Completed(report) = outcome.unwrap() else {
            panic!("expected a completed run");
        };
        assert!(!prompt.contains("tmpcache"), "prompt offered the log dir: {prompt:?}");
        assert_eq!(report.removed_dirs, 1);
        assert!(log_file.exists());
        assert!(!home.path().join("junk").exists());
        assert!(log.contains(
            Level::Debug,
            "keep directory tmpcache: holds the active log file"
        ));
    }

    #[test]
    fn home_holding_only_log_dir_has_nothing_to_remove() {
        let home = tempfile::tempdir().unwrap();
        let log_file = home.path().join("tmpcache").join("clean.log");
        fs::create_dir(home.path().join("tmpcache")).unwrap();
        fs::write(&log_file, "").unwrap();

        let (outcome, prompt) = run_with_log_file(
            home.path(),
            "y\n",
            &untouchable(),
            &CapturingLog::default(),
            Some(&log_file),
        );

        assert!(matches!(outcome.unwrap(), Outcome::NothingToRemove));
        assert!(prompt.is_empty());
    }

    #[test]
    fn log_file_outside_home_changes_nothing() {
        let home = populated_home();
        let elsewhere = tempfile::tempdir().unwrap();
        let log_file = elsewhere.path().join("clean.log");
        fs::write(&log_file, "").unwrap();

        let (outcome, prompt) = run_with_log_file(
            home.path(),
            "n\n",
            &untouchable(),
            &CapturingLog::default(),
            Some(&log_file),
        );

        assert!(matches!(outcome.unwrap(), Outcome::Declined));
        assert!(prompt.contains("junk  notes.txt"));
    }

    #[test]
    fn home_child_containing_picks_first_component() {
        let home = Path::new("/home/user");
        assert_eq!(
            home_child_containing(home, Path::new("/home/user/tmpcache/home-sweep/clean.log")),
            Some("tmpcache".to_string())
        );
        assert_eq!(home_child_containing(home, Path::new("/var/log/clean.log")), None);
        assert_eq!(home_child_containing(home, home), None);
    }

    #[cfg(unix)]
    #[test]
    fn unlistable_home_fails_before_prompt() {
        use std::os::unix::fs::PermissionsExt as _;

        let home = populated_home();
        fs::set_permissions(home.path(), fs::Permissions::from_mode(0o311)).unwrap();
        // Directory permissions do not bind a privileged user.
        if fs::read_dir(home.path()).is_ok() {
            fs::set_permissions(home.path(), fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }
        let (outcome, prompt) =
            run_with(home.path(), "y\n", &untouchable(), &CapturingLog::default());
        fs::set_permissions(home.path(), fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(outcome, Err(SweepError::Inspection(_))));
        assert!(prompt.is_empty());
        assert!(home.path().join("junk").exists());
        assert!(home.path().join("notes.txt").exists());
    }

    #[test]
    fn stages_are_logged_in_order() {
        let home = populated_home();
        let log = CapturingLog::default();
        run_with(home.path(), "y\n", &SystemRemover, &log).0.unwrap();
        assert_eq!(
            log.at(Level::Stage),
            vec!["Scanning home directory", "Removing entries"]
        );
    }
}
