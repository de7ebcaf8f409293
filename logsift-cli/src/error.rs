//! CLI-specific error types and exit code mapping

use logsift_log_scan::LogScanError;

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Missing or unusable log file argument. Printed to stdout as-is.
    #[error("{0}")]
    Usage(String),

    /// Invalid option values (threshold, source IP, output directory).
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Scan or report failure from the engine.
    #[error("scan error: {0}")]
    Scan(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (log read, report write, stdout write).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                        |
    /// |------|--------------------------------|
    /// | 0    | Success                        |
    /// | 1    | Command / scan failure         |
    /// | 2    | Usage or configuration error   |
    /// | 10   | IO error                       |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) | Self::Config(_) => 2,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Scan(_) => 1,
        }
    }
}

impl From<LogScanError> for CliError {
    fn from(e: LogScanError) -> Self {
        match e {
            LogScanError::Config { .. } => Self::Config(e.to_string()),
            LogScanError::Io { path, source } => Self::Io(std::io::Error::new(
                source.kind(),
                format!("{}: {source}", path.display()),
            )),
            LogScanError::Write { path, reason } => {
                Self::Io(std::io::Error::other(format!("{}: {reason}", path.display())))
            }
            other => Self::Scan(other.to_string()),
        }
    }
}
