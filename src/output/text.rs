//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Canonical rendering of each parsed declaration
//! - Identifiers and checkout paths when available
//! - Error listing and a one-line summary

use crate::domain::Dependency;
use crate::orchestrator::{InspectionEntry, InspectionReport};
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
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self::with_color(verbosity, true)
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn count(count: usize, singular: &str, plural: &str) -> String {
        if count == 1 {
            format!("{} {}", count, singular)
        } else {
            format!("{} {}", count, plural)
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &InspectionReport, writer: &mut dyn Write) -> std::io::Result<()> {
        // Quiet mode prints the canonical declarations and nothing else
        if self.verbosity == Verbosity::Quiet {
            for entry in &report.entries {
                writeln!(writer, "{}", entry.dependency)?;
            }
            return Ok(());
        }

        for entry in &report.entries {
            self.format_entry(entry, writer)?;
        }

        if !report.errors.is_empty() {
            writeln!(writer)?;
            if self.color {
                writeln!(writer, "{}:", "Errors".red().bold())?;
            } else {
                writeln!(writer, "Errors:")?;
            }
            for error in &report.errors {
                if self.color {
                    writeln!(writer, "  {} {}", "✗".red(), error)?;
                } else {
                    writeln!(writer, "  - {}", error)?;
                }
            }
        }

        writeln!(writer)?;
        self.format_summary(report, writer)
    }

    fn format_entry(
        &self,
        entry: &InspectionEntry,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let rendered = entry.dependency.to_string();
        let name = entry.dependency.name();

        if self.color {
            write!(writer, "  {} {}", rendered.bold(), format!("({})", name).dimmed())?;
        } else {
            write!(writer, "  {} ({})", rendered, name)?;
        }

        if let Some(ref id) = entry.identifier {
            if self.color {
                write!(writer, "  {}", id.cyan())?;
            } else {
                write!(writer, "  {}", id)?;
            }
        }
        writeln!(writer)?;

        if self.verbosity == Verbosity::Verbose {
            if entry.declaration.trim() != rendered {
                writeln!(writer, "      declared as: {}", entry.declaration.trim())?;
            }
            if let Dependency::Binary { url } = &entry.dependency {
                if let Some(written) = url.written_as() {
                    writeln!(writer, "      resolved from: {}", written)?;
                }
            }
            writeln!(writer, "      checkout: {}", entry.dependency.relative_path())?;
        }

        Ok(())
    }

    fn format_summary(
        &self,
        report: &InspectionReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let mut parts = vec![Self::count(
            report.entries.len(),
            "dependency",
            "dependencies",
        )];
        if report.duplicates > 0 {
            parts.push(format!("{} duplicate(s) dropped", report.duplicates));
        }
        if !report.errors.is_empty() {
            parts.push(Self::count(report.errors.len(), "error", "errors"));
        }
        let line = parts.join(", ");

        if self.color {
            if report.errors.is_empty() {
                writeln!(writer, "{} {}", "✓".green(), line)?;
            } else {
                writeln!(writer, "{} {}", "✗".red(), line)?;
            }
        } else {
            writeln!(writer, "{}", line)?;
        }

        Ok(())
    }
}
