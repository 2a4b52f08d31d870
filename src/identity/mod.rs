//! Stable, filesystem-safe dependency identifiers
//!
//! This module provides:
//! - The `DigestProvider` seam for SHA-256 computation
//! - An in-process provider (default)
//! - An external tool provider (`shasum -a 256` or compatible)
//! - `identifier`, producing `<name>-<hex digest>`

mod external;
mod sha256;

pub use external::{
    ExternalDigest, DEFAULT_ARGS as DEFAULT_HASH_ARGS, DEFAULT_PROGRAM as DEFAULT_HASH_PROGRAM,
};
pub use sha256::Sha256Digest;

use crate::domain::Dependency;
use crate::error::HashError;
use async_trait::async_trait;
use tracing::debug;

/// Something that turns text into a lowercase hex SHA-256 digest
#[async_trait]
pub trait DigestProvider: Send + Sync {
    /// Short name used in logs and error messages
    fn name(&self) -> &str;

    /// Digest of `input`
    async fn digest(&self, input: &str) -> Result<String, HashError>;
}

/// Which digest provider to use
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DigestBackend {
    /// In-process SHA-256
    #[default]
    InProcess,
    /// Spawn a program per identifier
    External { program: String, args: Vec<String> },
}

/// Create a digest provider for the given backend
pub fn create_provider(backend: &DigestBackend) -> Box<dyn DigestProvider> {
    match backend {
        DigestBackend::InProcess => Box::new(Sha256Digest),
        DigestBackend::External { program, args } => {
            Box::new(ExternalDigest::new(program.clone(), args.clone()))
        }
    }
}

/// Computes `<name>-<digest>` for a dependency
///
/// The digest covers the dependency's hashable form, so values that are
/// equal hash identically (GitHub repositories regardless of case, Git
/// remotes regardless of URL spelling).
pub async fn identifier(
    dependency: &Dependency,
    provider: &dyn DigestProvider,
) -> Result<String, HashError> {
    let hashable = dependency.hashable_form();
    debug!(provider = provider.name(), input = %hashable, "hashing dependency");
    let digest = provider.digest(&hashable).await?;
    Ok(format!("{}-{}", dependency.name(), digest))
}
