//! Inspection orchestrator for coordinating the whole workflow
//!
//! This module provides:
//! - Workflow coordination: parse → dedupe → sort → identify
//! - Parallel identifier hashing with a concurrency limit
//! - Error handling with partial continuation

use crate::cli::CliArgs;
use crate::domain::Dependency;
use crate::error::{ConfigError, HashError, ParseError};
use crate::identity::{self, DigestProvider};
use crate::parser::parse_declaration;
use crate::progress::{Progress, Stage};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

/// Default concurrency limit for identifier hashing
const DEFAULT_HASH_CONCURRENCY: usize = 8;

/// Configuration for the inspector
#[derive(Debug, Clone)]
pub struct InspectorConfig {
    /// Maximum identifiers computed at once
    pub hash_concurrency: usize,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            hash_concurrency: DEFAULT_HASH_CONCURRENCY,
        }
    }
}

/// A successfully parsed declaration
#[derive(Debug, Clone)]
pub struct InspectionEntry {
    /// The declaration as given on the command line
    pub declaration: String,
    /// The parsed dependency
    pub dependency: Dependency,
    /// Stable identifier, when requested and computed
    pub identifier: Option<String>,
}

/// Errors that can occur during inspection
#[derive(Debug)]
pub enum InspectionError {
    /// A declaration could not be parsed
    Parse {
        declaration: String,
        error: ParseError,
    },
    /// An identifier could not be computed
    Hash { dependency: String, message: String },
}

impl std::fmt::Display for InspectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InspectionError::Parse { declaration, error } => {
                write!(f, "Failed to parse '{}': {}", declaration, error)
            }
            InspectionError::Hash {
                dependency,
                message,
            } => write!(f, "Failed to identify {}: {}", dependency, message),
        }
    }
}

impl std::error::Error for InspectionError {}

/// Result of running the inspector
#[derive(Debug, Default)]
pub struct InspectionReport {
    /// Parsed dependencies, in output order
    pub entries: Vec<InspectionEntry>,
    /// Declarations dropped as duplicates
    pub duplicates: usize,
    /// Errors encountered during processing
    pub errors: Vec<InspectionError>,
}

impl InspectionReport {
    /// Returns true if any declaration failed
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Inspector for coordinating the parse/identify workflow
pub struct Inspector {
    /// CLI arguments for configuration
    args: CliArgs,
    /// Absolute directory for relative binary paths
    base: Option<PathBuf>,
    /// Digest provider for identifiers
    provider: Arc<dyn DigestProvider>,
    /// Semaphore for hashing concurrency control
    hash_semaphore: Arc<Semaphore>,
}

impl Inspector {
    /// Create a new inspector with the given CLI arguments
    pub fn new(args: CliArgs) -> Result<Self, ConfigError> {
        Self::with_config(args, InspectorConfig::default())
    }

    /// Create an inspector with custom configuration
    pub fn with_config(args: CliArgs, config: InspectorConfig) -> Result<Self, ConfigError> {
        let provider: Arc<dyn DigestProvider> =
            Arc::from(identity::create_provider(&args.digest_backend()));
        Self::with_provider(args, config, provider)
    }

    /// Create an inspector with a custom digest provider (for testing)
    pub fn with_provider(
        args: CliArgs,
        config: InspectorConfig,
        provider: Arc<dyn DigestProvider>,
    ) -> Result<Self, ConfigError> {
        if args.declarations.is_empty() {
            return Err(ConfigError::NoDeclarations);
        }
        if args.quiet && args.verbose {
            return Err(ConfigError::ConflictingOptions {
                message: "--quiet and --verbose cannot be used together".to_string(),
            });
        }

        let base = args.base.as_ref().map(|path| resolve_base(path)).transpose()?;

        Ok(Self {
            args,
            base,
            provider,
            hash_semaphore: Arc::new(Semaphore::new(config.hash_concurrency.max(1))),
        })
    }

    /// Run the inspection workflow
    pub async fn run(&self) -> InspectionReport {
        self.run_with_progress(self.args.show_progress()).await
    }

    /// Run the inspection workflow with optional progress display
    pub async fn run_with_progress(&self, show_progress: bool) -> InspectionReport {
        let mut progress = Progress::new(show_progress);
        let mut report = InspectionReport::default();

        // Step 1: Parse declarations
        progress.start(Stage::Parsing, self.args.declarations.len() as u64);
        for declaration in &self.args.declarations {
            let parsed = parse_declaration(declaration, self.base.as_deref());
            progress.step(declaration, parsed.is_ok());
            match parsed {
                Ok(dependency) => report.entries.push(InspectionEntry {
                    declaration: declaration.clone(),
                    dependency,
                    identifier: None,
                }),
                Err(error) => report.errors.push(InspectionError::Parse {
                    declaration: declaration.clone(),
                    error,
                }),
            }
        }
        progress.finish();

        // Step 2: Drop duplicates, keeping the first declaration
        if self.args.dedupe {
            let before = report.entries.len();
            report.entries = dedupe_entries(std::mem::take(&mut report.entries));
            report.duplicates = before - report.entries.len();
            debug!(dropped = report.duplicates, "removed duplicate declarations");
        }

        // Step 3: Sort by name
        if self.args.sort {
            report
                .entries
                .sort_by(|a, b| a.dependency.cmp_by_name(&b.dependency));
        }

        // Step 4: Compute identifiers
        if self.args.identifiers && !report.entries.is_empty() {
            progress.start(Stage::Identifying, report.entries.len() as u64);
            self.identify(&mut report, &mut progress).await;
            progress.finish();
        }

        report
    }

    /// Hash every entry concurrently, filling in identifiers in place
    async fn identify(&self, report: &mut InspectionReport, progress: &mut Progress) {
        let mut tasks = JoinSet::new();

        for (index, entry) in report.entries.iter().enumerate() {
            let dependency = entry.dependency.clone();
            let provider = Arc::clone(&self.provider);
            let semaphore = Arc::clone(&self.hash_semaphore);
            tasks.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => identity::identifier(&dependency, provider.as_ref()).await,
                    Err(e) => Err(HashError::invocation_failed(
                        provider.name(),
                        e.to_string(),
                    )),
                };
                (index, result)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Ok(id))) => {
                    let entry = &mut report.entries[index];
                    progress.step(entry.dependency.name(), true);
                    entry.identifier = Some(id);
                }
                Ok((index, Err(e))) => {
                    let dependency = &report.entries[index].dependency;
                    progress.step(dependency.name(), false);
                    report.errors.push(InspectionError::Hash {
                        dependency: dependency.to_string(),
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    progress.step("<unknown>", false);
                    report.errors.push(InspectionError::Hash {
                        dependency: "<unknown>".to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }
    }
}

fn resolve_base(path: &Path) -> Result<PathBuf, ConfigError> {
    std::fs::canonicalize(path).map_err(|e| ConfigError::InvalidBase {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn dedupe_entries(entries: Vec<InspectionEntry>) -> Vec<InspectionEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.dependency.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Sha256Digest;
    use async_trait::async_trait;
    use clap::Parser;
    use tempfile::TempDir;

    fn make_args(args: &[&str]) -> CliArgs {
        let mut full = vec!["cartfile"];
        full.extend(args);
        CliArgs::parse_from(full)
    }

    fn inspector(args: &[&str]) -> Inspector {
        Inspector::with_provider(
            make_args(args),
            InspectorConfig::default(),
            Arc::new(Sha256Digest),
        )
        .unwrap()
    }

    struct BrokenDigest;

    #[async_trait]
    impl DigestProvider for BrokenDigest {
        fn name(&self) -> &str {
            "broken"
        }

        async fn digest(&self, _input: &str) -> Result<String, HashError> {
            Err(HashError::invocation_failed("broken", "exit status: 1"))
        }
    }

    #[test]
    fn test_inspector_config_default() {
        let config = InspectorConfig::default();
        assert_eq!(config.hash_concurrency, 8);
    }

    #[test]
    fn test_new_requires_declarations() {
        let err = Inspector::new(make_args(&[])).err().unwrap();
        assert!(matches!(err, ConfigError::NoDeclarations));
    }

    #[test]
    fn test_new_rejects_quiet_and_verbose() {
        let err = Inspector::new(make_args(&["-q", "--verbose", "github \"a/b\""]))
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::ConflictingOptions { .. }));
    }

    #[test]
    fn test_new_rejects_missing_base() {
        let err = Inspector::new(make_args(&[
            "--base",
            "/definitely/not/a/real/dir",
            "github \"a/b\"",
        ]))
        .err()
        .unwrap();
        assert!(matches!(err, ConfigError::InvalidBase { .. }));
    }

    #[tokio::test]
    async fn test_run_parses_and_collects_errors() {
        let report = inspector(&["github \"a/b\"", "svn \"x\"", "binary \"ftp://h/x.json\""])
            .run_with_progress(false)
            .await;
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.errors.len(), 2);
        assert!(report.has_errors());
        assert!(report.errors[0].to_string().contains("svn"));
    }

    #[tokio::test]
    async fn test_run_sorts_by_name() {
        let report = inspector(&[
            "--sort",
            "git \"https://example.com/Zed\"",
            "github \"a/b\"",
            "binary \"https://h/c.json\"",
        ])
        .run_with_progress(false)
        .await;
        let names: Vec<_> = report.entries.iter().map(|e| e.dependency.name()).collect();
        assert_eq!(names, vec!["b", "c", "Zed"]);
    }

    #[tokio::test]
    async fn test_run_keeps_order_without_sort() {
        let report = inspector(&["github \"a/z\"", "github \"a/b\""])
            .run_with_progress(false)
            .await;
        assert_eq!(report.entries[0].dependency.name(), "z");
    }

    #[tokio::test]
    async fn test_run_dedupes() {
        let report = inspector(&[
            "--dedupe",
            "github \"Owner/Name\"",
            "git \"https://github.com/owner/name.git\"",
            "git \"https://example.com/x/y\"",
        ])
        .run_with_progress(false)
        .await;
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.entries[0].declaration, "github \"Owner/Name\"");
    }

    #[tokio::test]
    async fn test_run_computes_identifiers() {
        let report = inspector(&["-i", "github \"a/b\"", "git \"https://example.com/x/y\""])
            .run_with_progress(false)
            .await;
        assert!(!report.has_errors());
        let expected = format!("b-{}", Sha256Digest::hex("https://github.com/a/b"));
        assert_eq!(report.entries[0].identifier.as_deref(), Some(expected.as_str()));
        assert!(report.entries[1]
            .identifier
            .as_deref()
            .unwrap()
            .starts_with("y-"));
    }

    #[tokio::test]
    async fn test_run_skips_identifiers_by_default() {
        let report = inspector(&["github \"a/b\""]).run_with_progress(false).await;
        assert!(report.entries[0].identifier.is_none());
    }

    #[tokio::test]
    async fn test_run_reports_hash_failures() {
        let inspector = Inspector::with_provider(
            make_args(&["-i", "github \"a/b\""]),
            InspectorConfig::default(),
            Arc::new(BrokenDigest),
        )
        .unwrap();
        let report = inspector.run_with_progress(false).await;
        assert_eq!(report.entries.len(), 1);
        assert!(report.entries[0].identifier.is_none());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].to_string().contains("github \"a/b\""));
    }

    #[tokio::test]
    async fn test_run_resolves_relative_binary_with_base() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().to_str().unwrap().to_string();
        let report = inspector(&["--base", &base, "binary \"Lib.json\""])
            .run_with_progress(false)
            .await;
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].dependency.name(), "Lib");
    }
}
