//! Campaign command handler (no subcommand)

use std::io::Write;
use std::path::Path;

use tracing::info;

use logsift_log_scan::{CampaignConfigBuilder, CampaignRunner, CampaignSummary, CsvWriter};

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the full campaign on `log_path`.
///
/// The summary is rendered even when some steps failed; the failure is
/// reported afterwards so the process exits non-zero.
pub fn execute(args: RunArgs, log_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    let config = CampaignConfigBuilder::new()
        .port_threshold(args.threshold)
        .source_ip(args.source_ip)
        .output_dir(args.output_dir)
        .build()?;

    info!(log = %log_path.display(), "running campaign");

    let runner = CampaignRunner::new(log_path, config, CsvWriter)?;
    let summary = runner.run()?;

    writer.render(&summary)?;
    summary.ensure_success()?;
    Ok(())
}

impl Render for CampaignSummary {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Log: {}", self.log_path.display().to_string().bold())?;
        writeln!(w, "Port threshold: {}", self.threshold)?;
        writeln!(w)?;

        writeln!(w, "{:<10} {:>10}", "Port", "Records")?;
        writeln!(w, "{}", "-".repeat(21))?;
        for entry in &self.port_tally {
            let count = format!("{:>10}", entry.count);
            if entry.count >= self.threshold {
                writeln!(w, "{:<10} {}", entry.port, count.yellow().bold())?;
            } else {
                writeln!(w, "{:<10} {}", entry.port, count)?;
            }
        }
        writeln!(w)?;

        let reports = self
            .port_reports
            .iter()
            .chain(&self.invalid_users)
            .chain(&self.source_ip_log);
        for report in reports {
            writeln!(
                w,
                "{} {} ({} rows)",
                "wrote".green(),
                report.path.display(),
                report.rows
            )?;
        }

        if self.failures.is_empty() {
            writeln!(w, "{}", "All steps completed.".green())?;
        } else {
            for failure in &self.failures {
                writeln!(w, "{} {}: {}", "failed".red().bold(), failure.step, failure.error)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use logsift_log_scan::campaign::{PortCount, ReportOutcome, StepFailure};

    fn summary() -> CampaignSummary {
        CampaignSummary {
            log_path: PathBuf::from("/var/log/gateway.log"),
            threshold: 100,
            port_tally: vec![
                PortCount {
                    port: "22".to_owned(),
                    count: 5,
                },
                PortCount {
                    port: "80".to_owned(),
                    count: 150,
                },
            ],
            port_reports: vec![ReportOutcome {
                name: "destination_port_80".to_owned(),
                rows: 150,
                path: PathBuf::from("destination_port_80_report.csv"),
            }],
            invalid_users: Some(ReportOutcome {
                name: "invalid_users".to_owned(),
                rows: 2,
                path: PathBuf::from("invalid_users.csv"),
            }),
            source_ip_log: None,
            failures: vec![],
        }
    }

    fn render(summary: &CampaignSummary) -> String {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        summary
            .render_text(&mut buffer)
            .expect("rendering should succeed");
        String::from_utf8(buffer).expect("valid UTF-8")
    }

    #[test]
    fn test_render_lists_ports_and_reports() {
        let output = render(&summary());
        assert!(output.contains("/var/log/gateway.log"));
        assert!(output.contains("80"));
        assert!(output.contains("150"));
        assert!(output.contains("wrote destination_port_80_report.csv (150 rows)"));
        assert!(output.contains("wrote invalid_users.csv (2 rows)"));
        assert!(output.contains("All steps completed."));
    }

    #[test]
    fn test_render_lists_failures() {
        let mut summary = summary();
        summary.failures.push(StepFailure {
            step: "source ip log".to_owned(),
            error: "io error".to_owned(),
        });
        let output = render(&summary);
        assert!(output.contains("failed source ip log: io error"));
        assert!(!output.contains("All steps completed."));
    }

    #[test]
    fn test_execute_rejects_zero_threshold() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let log = dir.path().join("gateway.log");
        std::fs::write(&log, "").expect("should write log");

        let args = RunArgs {
            log_file: Some(log.clone()),
            output_dir: dir.path().to_path_buf(),
            threshold: 0,
            source_ip: "220.195.35.40".to_owned(),
        };
        let writer = OutputWriter::new(crate::cli::OutputFormat::Text);
        let err = execute(args, &log, &writer).expect_err("zero threshold should fail");
        assert_eq!(err.exit_code(), 2);
    }
}
