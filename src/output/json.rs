//! JSON output formatter for machine processing

use crate::domain::Dependency;
use crate::error::ParseError;
use crate::orchestrator::{InspectionEntry, InspectionError, InspectionReport};
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    fn entry_to_json(&self, entry: &InspectionEntry) -> JsonDependency {
        let verbose = self.verbosity == Verbosity::Verbose;
        JsonDependency {
            name: entry.dependency.name().to_string(),
            kind: entry.dependency.kind(),
            declaration: entry.dependency.to_string(),
            source: source_of(&entry.dependency),
            written_as: written_as(&entry.dependency).map(str::to_string),
            relative_path: verbose.then(|| entry.dependency.relative_path()),
            identifier: entry.identifier.clone(),
        }
    }

    fn error_to_json(error: &InspectionError) -> JsonError {
        match error {
            InspectionError::Parse { declaration, error } => JsonError::from_parse(declaration, error),
            InspectionError::Hash {
                dependency,
                message,
            } => JsonError {
                declaration: Some(dependency.clone()),
                message: message.clone(),
                line: None,
            },
        }
    }

    fn write_json<T: Serialize>(value: &T, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

fn written_as(dependency: &Dependency) -> Option<&str> {
    match dependency {
        Dependency::Binary { url } => url.written_as(),
        _ => None,
    }
}

/// Where a dependency is fetched from
fn source_of(dependency: &Dependency) -> String {
    match dependency {
        Dependency::GitHub { server, repository } => server.url_for(repository).to_string(),
        Dependency::Git { url } => url.to_string(),
        Dependency::Binary { url } => url.url.to_string(),
    }
}

/// JSON representation of the full report
#[derive(Serialize)]
struct JsonOutput {
    /// Parsed dependencies, in output order
    dependencies: Vec<JsonDependency>,
    /// Number of declarations dropped as duplicates
    duplicates: usize,
    /// Errors encountered
    errors: Vec<JsonError>,
}

/// JSON representation of a dependency
#[derive(Serialize)]
struct JsonDependency {
    name: String,
    #[serde(rename = "type")]
    kind: &'static str,
    /// Canonical rendering, e.g. `github "owner/name"`
    declaration: String,
    source: String,
    /// Relative binary path as declared, before resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    written_as: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    relative_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
}

/// JSON representation of an error
#[derive(Serialize)]
struct JsonError {
    #[serde(skip_serializing_if = "Option::is_none")]
    declaration: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
}

impl JsonError {
    fn from_parse(declaration: &str, error: &ParseError) -> Self {
        Self {
            declaration: Some(declaration.to_string()),
            message: error.message(),
            line: Some(error.line),
        }
    }
}

/// JSON representation of summary counts
#[derive(Serialize)]
struct JsonSummary {
    dependencies: usize,
    duplicates: usize,
    errors: usize,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &InspectionReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            dependencies: report
                .entries
                .iter()
                .map(|e| self.entry_to_json(e))
                .collect(),
            duplicates: report.duplicates,
            errors: report.errors.iter().map(Self::error_to_json).collect(),
        };

        Self::write_json(&output, writer)
    }

    fn format_entry(
        &self,
        entry: &InspectionEntry,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        Self::write_json(&self.entry_to_json(entry), writer)
    }

    fn format_summary(
        &self,
        report: &InspectionReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output = JsonSummary {
            dependencies: report.entries.len(),
            duplicates: report.duplicates,
            errors: report.errors.len(),
        };

        Self::write_json(&output, writer)
    }
}
