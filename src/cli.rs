//! Command-line arguments.
use clap::Parser;

/// Version reported by `--version` and written to the log header.
pub const VERSION: &str = match option_env!("HOME_SWEEP_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Command-line entry point for the home directory cleanup tool.
#[derive(Parser, Debug)]
#[command(
    name = "home-sweep",
    about = "Remove stray top-level files and directories from your home directory",
    long_about = "Scan the top level of your home directory, list every file and \
                  directory that is neither allow-listed nor a version-controlled \
                  project, and remove them after you confirm with 'y'.",
    version = VERSION
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
