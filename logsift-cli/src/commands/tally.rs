//! `logsift tally` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use logsift_log_scan::campaign::{DESTINATION_PORT_PATTERN, PortCount};
use logsift_log_scan::{CaseMode, PatternMatcher, tally};

use crate::cli::TallyArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `tally` command.
pub fn execute(args: TallyArgs, log_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    if args.threshold == 0 {
        return Err(CliError::Config("threshold must be greater than 0".to_owned()));
    }

    let matcher = PatternMatcher::new(DESTINATION_PORT_PATTERN, CaseMode::Sensitive)?;
    let counts = tally(log_path, &matcher)?;

    let report = TallyReport {
        log_path: log_path.display().to_string(),
        threshold: args.threshold,
        total: counts.total(),
        ports: counts
            .sorted()
            .into_iter()
            .map(|(port, count)| PortCount {
                port: port.to_owned(),
                count,
            })
            .collect(),
    };
    writer.render(&report)?;
    Ok(())
}

#[derive(Serialize)]
pub struct TallyReport {
    pub log_path: String,
    pub threshold: u64,
    pub total: u64,
    pub ports: Vec<PortCount>,
}

impl Render for TallyReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Log: {}", self.log_path.bold())?;
        writeln!(w, "Records with a destination port: {}", self.total)?;
        writeln!(w)?;

        if self.ports.is_empty() {
            writeln!(w, "No destination ports found.")?;
            return Ok(());
        }

        writeln!(w, "{:<10} {:>10}", "Port", "Records")?;
        writeln!(w, "{}", "-".repeat(21))?;
        for entry in &self.ports {
            let count = format!("{:>10}", entry.count);
            if entry.count >= self.threshold {
                writeln!(w, "{:<10} {}", entry.port, count.yellow().bold())?;
            } else {
                writeln!(w, "{:<10} {}", entry.port, count)?;
            }
        }
        Ok(())
    }
}
