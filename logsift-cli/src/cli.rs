//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.
//!
//! The log file argument is optional at the clap level so that a missing path
//! is reported through [`crate::input::resolve_input_path`] like any other
//! unusable path.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use logsift_log_scan::config::{DEFAULT_PORT_THRESHOLD, DEFAULT_SOURCE_IP};

/// logsift -- tally and report on firewall/system log files.
///
/// Without a subcommand, runs the full campaign on LOG_FILE: per-port reports
/// for busy destination ports, the invalid-login report, and the source-IP log.
#[derive(Parser, Debug)]
#[command(
    name = "logsift",
    version,
    about,
    long_about = None,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Diagnostic log format written to stderr.
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: LogFormat,

    /// Result output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(flatten)]
    pub run: RunArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Supported diagnostic log formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    Pretty,
    /// JSON lines.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter a log file by regex and optionally export the captures to CSV.
    Search(SearchArgs),

    /// Count records per destination port.
    Tally(TallyArgs),
}

// ---- campaign (no subcommand) ----

/// Run the full campaign.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the log file.
    #[arg(value_name = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Directory the reports are written to.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Minimum record count for a destination port report.
    #[arg(long, default_value_t = DEFAULT_PORT_THRESHOLD)]
    pub threshold: u64,

    /// Source IP whose records are extracted into a separate log.
    #[arg(long, default_value = DEFAULT_SOURCE_IP)]
    pub source_ip: String,
}

// ---- search ----

/// Filter a log file by regex.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Regular expression searched anywhere in each line.
    #[arg(value_name = "REGEX")]
    pub pattern: String,

    /// Path to the log file.
    #[arg(value_name = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Match case-sensitively (default: case-insensitive).
    #[arg(short = 's', long)]
    pub case_sensitive: bool,

    /// Print every matching record.
    #[arg(short, long)]
    pub records: bool,

    /// Column names for the capture groups (comma separated).
    #[arg(long, value_delimiter = ',', requires = "csv")]
    pub columns: Vec<String>,

    /// Write the capture tuples to this CSV file.
    #[arg(long, requires = "columns")]
    pub csv: Option<PathBuf>,
}

// ---- tally ----

/// Count records per destination port.
#[derive(Args, Debug)]
pub struct TallyArgs {
    /// Path to the log file.
    #[arg(value_name = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Highlight ports with at least this many records.
    #[arg(long, default_value_t = DEFAULT_PORT_THRESHOLD)]
    pub threshold: u64,
}
