//! `home-sweep` binary: parse arguments, set up logging, run a cleanup.
use std::process::ExitCode;

use clap::Parser;

use home_sweep::cli::Cli;
use home_sweep::commands::{self, CLEAN_COMMAND};
use home_sweep::logging::{self, Logger};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    logging::init_subscriber(args.verbose, CLEAN_COMMAND);
    let log = Logger::new(CLEAN_COMMAND);

    match commands::clean::run(&log) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
