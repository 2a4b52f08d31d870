//! In-process SHA-256 digests

use super::DigestProvider;
use crate::error::HashError;
use async_trait::async_trait;
use sha2::{Digest, Sha256};

/// SHA-256 computed with the `sha2` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Digest;

impl Sha256Digest {
    /// Hex digest of `input`
    pub fn hex(input: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(input.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[async_trait]
impl DigestProvider for Sha256Digest {
    fn name(&self) -> &str {
        "sha256"
    }

    async fn digest(&self, input: &str) -> Result<String, HashError> {
        Ok(Self::hex(input))
    }
}
