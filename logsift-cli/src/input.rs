//! Log file argument resolution
//!
//! Every command takes the log file as its positional argument. A missing
//! argument and a path that is not a regular file are both usage errors.

use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Position of the log file argument on the command line.
const LOG_FILE_PARAM: usize = 1;

/// Resolve the log file argument to an absolute path of an existing file.
pub fn resolve_input_path(arg: Option<&Path>) -> Result<PathBuf, CliError> {
    let Some(arg) = arg else {
        return Err(CliError::Usage(format!(
            "Error: pass the log file path as command line parameter {LOG_FILE_PARAM}."
        )));
    };

    let path = std::path::absolute(arg).unwrap_or_else(|_| arg.to_path_buf());
    if !path.is_file() {
        return Err(CliError::Usage(format!(
            "Error: \"{}\" does not point to any file.",
            path.display()
        )));
    }

    Ok(path)
}
