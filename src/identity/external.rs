//! Digests computed by an external program
//!
//! The program receives the input on stdin and must print the hex digest
//! as the first whitespace-separated field of stdout, as `shasum -a 256`
//! and `sha256sum` do.

use super::DigestProvider;
use crate::error::HashError;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::warn;

/// Default hashing program
pub const DEFAULT_PROGRAM: &str = "shasum";

/// Default arguments for [`DEFAULT_PROGRAM`]
pub const DEFAULT_ARGS: &[&str] = &["-a", "256"];

/// Runs a hashing program once per digest
#[derive(Debug, Clone)]
pub struct ExternalDigest {
    program: String,
    args: Vec<String>,
}

impl ExternalDigest {
    /// Create a provider for the given program and arguments
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `shasum -a 256`
    pub fn shasum() -> Self {
        Self::new(
            DEFAULT_PROGRAM,
            DEFAULT_ARGS.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn invocation_failed(&self, message: impl Into<String>) -> HashError {
        let err = HashError::invocation_failed(&self.program, message);
        warn!(error = %err, "hashing tool failed");
        err
    }

    async fn run(&self, input: &str) -> Result<String, HashError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.invocation_failed(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input.as_bytes())
                .await
                .map_err(|e| self.invocation_failed(e.to_string()))?;
            // dropping stdin closes the pipe so the program sees EOF
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| self.invocation_failed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.invocation_failed(format!(
                "{}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for ExternalDigest {
    fn default() -> Self {
        Self::shasum()
    }
}

/// First whitespace-separated field of the tool's output
fn first_token(output: &str) -> Option<&str> {
    output.split_whitespace().next()
}

#[async_trait]
impl DigestProvider for ExternalDigest {
    fn name(&self) -> &str {
        &self.program
    }

    async fn digest(&self, input: &str) -> Result<String, HashError> {
        let output = self.run(input).await?;
        first_token(&output)
            .map(str::to_string)
            .ok_or_else(|| HashError::malformed_output(&self.program, output.clone()))
    }
}
