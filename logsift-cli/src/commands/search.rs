//! `logsift search` command handler

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use logsift_log_scan::{
    CaseMode, CsvWriter, Derivation, PatternMatcher, ReportRow, ReportSpec, ScanSummary,
    TabularWriter, scan,
};

use crate::cli::SearchArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `search` command.
pub fn execute(args: SearchArgs, log_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    let case_mode = if args.case_sensitive {
        CaseMode::Sensitive
    } else {
        CaseMode::Insensitive
    };
    let matcher = PatternMatcher::new(&args.pattern, case_mode)?;

    // The export schema is checked before the log is read.
    let export = match &args.csv {
        Some(destination) => {
            let columns: Vec<&str> = args.columns.iter().map(String::as_str).collect();
            let spec = ReportSpec::new(
                "search",
                matcher.clone(),
                &columns,
                Derivation::None,
                file_name_of(destination)?,
            )?;
            Some((spec, destination.clone()))
        }
        None => None,
    };

    info!(log = %log_path.display(), pattern = %args.pattern, %case_mode, "searching log");
    let outcome = scan(log_path, &matcher)?;
    let summary = ScanSummary::new(&outcome, &matcher);

    let exported = match export {
        Some((spec, destination)) => {
            let rows: Vec<ReportRow> = outcome
                .captures
                .iter()
                .cloned()
                .map(|captures| spec.to_row(captures))
                .collect();
            CsvWriter.write_tabular(&rows, spec.columns(), &destination)?;
            info!(path = %destination.display(), rows = rows.len(), "captures exported");
            Some(destination)
        }
        None => None,
    };

    let report = SearchReport {
        summary,
        records: if args.records {
            outcome.matched_lines
        } else {
            Vec::new()
        },
        exported,
    };
    writer.render(&report)?;
    Ok(())
}

fn file_name_of(destination: &Path) -> Result<String, CliError> {
    destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            CliError::Command(format!(
                "csv destination has no file name: {}",
                destination.display()
            ))
        })
}

#[derive(Serialize)]
pub struct SearchReport {
    #[serde(flatten)]
    pub summary: ScanSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported: Option<PathBuf>,
}

impl Render for SearchReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        for record in &self.records {
            writeln!(w, "{record}")?;
        }
        writeln!(w, "{}", self.summary)?;
        if let Some(path) = &self.exported {
            writeln!(w, "{} {}", "exported".green(), path.display())?;
        }
        Ok(())
    }
}
