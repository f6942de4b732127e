//! Utility functions for log path resolution, ANSI stripping, and time formatting.
use std::fs;
use std::path::PathBuf;

/// Application directory name under the cache root.
const APP_DIR: &str = "home-sweep";

/// Strip ANSI escape sequences from a string.
///
/// Handles SGR sequences (ending in `m`) and other CSI sequences (ending
/// in any letter in the `@`..`~` range), so cursor movement, erase, etc.
/// are also stripped without consuming unrelated text.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if let Some(next) = chars.next()
                && next == '['
            {
                for inner in chars.by_ref() {
                    if ('@'..='~').contains(&inner) {
                        break;
                    }
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Pick the cache root from `XDG_CACHE_HOME` or `<home>/.cache`.
///
/// The home-based fallback is only used when `home` is an existing directory:
/// logging must never create the home directory it is about to inspect.
fn cache_root(xdg_cache_home: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(xdg) = xdg_cache_home.filter(|p| !p.as_os_str().is_empty()) {
        return Some(xdg);
    }
    let home = home.filter(|p| p.is_dir())?;
    Some(home.join(".cache"))
}

/// Return `<cache root>/home-sweep/`, creating it if needed.
fn app_cache_dir(xdg_cache_home: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    let dir = cache_root(xdg_cache_home, home)?.join(APP_DIR);
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Return the log file path under `$XDG_CACHE_HOME/home-sweep/` (or
/// `~/.cache/home-sweep/`), creating the directory if needed.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let xdg = std::env::var_os("XDG_CACHE_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from);
    Some(app_cache_dir(xdg, home)?.join(format!("{command}.log")))
}

/// Format the current UTC time as `YYYY-MM-DD HH:MM:SS`.
pub(super) fn format_utc_datetime() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format the current UTC time as `HH:MM:SS`.
pub(super) fn format_utc_time() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}
