//! CLI Arguments
//!
//! All options are flags; repository identifiers arrive on stdin or from the
//! remote queue, never as positional arguments.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;

use crate::scanner::coordinator::DEFAULT_WORKERS;

#[derive(Parser, Debug, Clone)]
#[command(name = "algostat")]
#[command(about = "Count C++ standard algorithm usage across repositories")]
#[command(version)]
pub struct Args {
    /// How many repositories to analyze concurrently
    #[arg(
        short = 't',
        long = "threads",
        value_name = "THREADS",
        default_value_t = DEFAULT_WORKERS
    )]
    pub threads: usize,

    /// Show verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Fetch jobs from and push results to the remote queue
    /// (configured via ALGOSTAT_RQ_HOST / ALGOSTAT_RQ_PORT)
    #[arg(long = "rq")]
    pub rq: bool,

    /// Log level
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        value_parser = ["trace", "debug", "info", "warn", "error", "off"]
    )]
    pub log_level: Option<String>,

    /// Log file path (in addition to stderr)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(
        short = 'o',
        long = "log-format",
        value_name = "FORMAT",
        value_parser = ["text", "ext", "json"]
    )]
    pub log_format: Option<String>,

    /// Force colored log output
    #[arg(long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Args {
    /// Log level after folding in the verbose flag
    ///
    /// An explicit `--log-level` always wins; `-v` (or the environment
    /// toggle) raises the default from info to debug.
    pub fn effective_log_level(&self, verbose: bool) -> &str {
        match self.log_level.as_deref() {
            Some(level) => level,
            None if verbose => "debug",
            None => "info",
        }
    }

    /// Whether log output should be colored
    pub fn use_color(&self) -> bool {
        (self.color || std::io::stderr().is_terminal()) && !self.no_color
    }
}
