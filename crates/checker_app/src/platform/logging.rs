//! Platform logging initialization for the checker binary.
//!
//! File output goes to `./checker.log` in the current working directory so it
//! does not interleave with the overlay printed on stdout.

use std::path::Path;

use clap::ValueEnum;
use engine_logging::LogDestination;
use log::LevelFilter;

const LOG_FILE: &str = "./checker.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    None,
    Terminal,
    File,
    Both,
}

pub fn initialize(target: LogTarget, verbose: bool) {
    let destination = match target {
        LogTarget::None => return,
        LogTarget::Terminal => LogDestination::Terminal,
        LogTarget::File => LogDestination::File,
        LogTarget::Both => LogDestination::Both,
    };
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    engine_logging::initialize(destination, level, Path::new(LOG_FILE));
}
