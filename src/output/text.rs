//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Per-dependency sync outcome display with colors
//! - Native build, configure and build step lines
//! - One-line summary in quiet mode

use crate::domain::{BootstrapReport, DependencyReport, StepStatus};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Render a step status, colored by outcome
    fn status_label(&self, status: &StepStatus) -> String {
        let text = status.to_string();
        if !self.color {
            return text;
        }
        match status {
            StepStatus::Succeeded => text.green().to_string(),
            StepStatus::Failed { .. } => text.red().bold().to_string(),
            StepStatus::Skipped { .. } => text.dimmed().to_string(),
        }
    }

    fn dry_run_prefix(&self, report: &BootstrapReport) -> String {
        if !report.dry_run {
            String::new()
        } else if self.color {
            format!("{} ", "(dry-run)".cyan())
        } else {
            "(dry-run) ".to_string()
        }
    }

    fn write_dependency(
        &self,
        dep: &DependencyReport,
        width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(
            writer,
            "  {:width$}  {:18} {}",
            dep.name,
            dep.action.to_string(),
            self.status_label(&dep.status),
            width = width
        )
    }

    fn write_step(
        &self,
        label: &str,
        status: &StepStatus,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(writer, "  {:10} {}", label, self.status_label(status))
    }

    fn write_summary_line(
        &self,
        report: &BootstrapReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let failed = report.failed_dependencies().count();
        let mut line = format!(
            "{}Bootstrap finished on {}: {} cloned, {} updated",
            self.dry_run_prefix(report),
            report.platform,
            report.cloned_count(),
            report.updated_count()
        );
        if failed > 0 {
            let failures = format!(", {} failed", failed);
            if self.color {
                line.push_str(&failures.red().to_string());
            } else {
                line.push_str(&failures);
            }
        }
        writeln!(writer, "{}", line)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &BootstrapReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return self.write_summary_line(report, writer);
        }

        writeln!(writer)?;
        self.write_summary_line(report, writer)?;

        // Unchanged dependencies are only listed in verbose mode
        let shown: Vec<&DependencyReport> = report
            .dependencies
            .iter()
            .filter(|d| self.verbosity == Verbosity::Verbose || !d.status.is_skipped())
            .collect();
        let width = shown.iter().map(|d| d.name.len()).max().unwrap_or(0);
        for dep in shown {
            self.write_dependency(dep, width, writer)?;
        }

        self.write_step("native", &report.native_build, writer)?;
        self.write_step("configure", &report.configure, writer)?;
        self.write_step("build", &report.build, writer)?;
        Ok(())
    }
}
