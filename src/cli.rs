//! CLI argument parsing module for cartfile

use crate::identity::{DigestBackend, DEFAULT_HASH_ARGS, DEFAULT_HASH_PROGRAM};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Cartfile dependency inspector
#[derive(Parser, Debug, Clone)]
#[command(
    name = "cartfile",
    version,
    about = "Parse, normalize and identify Cartfile dependency declarations"
)]
pub struct CliArgs {
    /// Dependency declarations, e.g. 'github "owner/name"'
    pub declarations: Vec<String>,

    // Listing options
    /// Sort dependencies by name (case-insensitive)
    #[arg(long)]
    pub sort: bool,

    /// Drop declarations that refer to the same dependency as an earlier one
    #[arg(long)]
    pub dedupe: bool,

    /// Compute a stable identifier for each dependency
    #[arg(short, long)]
    pub identifiers: bool,

    // Hashing options
    /// External program used for SHA-256 (default: in-process)
    #[arg(long, env = "CARTFILE_HASH_COMMAND")]
    pub hash_command: Option<String>,

    /// Argument passed to the hash command (can be specified multiple times)
    #[arg(long = "hash-arg", action = ArgAction::Append, allow_hyphen_values = true)]
    pub hash_args: Vec<String>,

    /// Directory that relative binary paths are resolved against
    #[arg(long)]
    pub base: Option<PathBuf>,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Digest backend selected by the hashing options
    ///
    /// `shasum` without explicit arguments gets `-a 256`.
    pub fn digest_backend(&self) -> DigestBackend {
        match &self.hash_command {
            None => DigestBackend::InProcess,
            Some(program) => {
                let args = if self.hash_args.is_empty() && program == DEFAULT_HASH_PROGRAM {
                    DEFAULT_HASH_ARGS.iter().map(|s| s.to_string()).collect()
                } else {
                    self.hash_args.clone()
                };
                DigestBackend::External {
                    program: program.clone(),
                    args,
                }
            }
        }
    }

    /// Whether progress should be drawn on stderr
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}
