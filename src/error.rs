//! Error types using thiserror
//!
//! Error hierarchy:
//! - ParseError: a manifest line could not be turned into a dependency
//! - RepositoryError: a GitHub repository identifier was rejected
//! - HashError: a dependency identifier could not be computed
//! - ConfigError: invalid CLI configuration

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while interpreting a GitHub repository identifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Neither `owner/name` nor a URL with an owner and a name
    #[error("invalid GitHub repository identifier \"{identifier}\"")]
    InvalidIdentifier { identifier: String },
}

impl RepositoryError {
    /// Creates a new InvalidIdentifier error
    pub fn invalid_identifier(identifier: impl Into<String>) -> Self {
        RepositoryError::InvalidIdentifier {
            identifier: identifier.into(),
        }
    }
}

/// The reason a manifest line failed to parse
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The line does not start with `github`, `git` or `binary`
    #[error("unexpected dependency type")]
    UnexpectedType,

    /// No `"` follows the dependency type
    #[error("expected string after dependency type")]
    MissingOpeningQuote,

    /// The quoted payload is empty or never closed
    #[error("empty or unterminated string after dependency type")]
    UnterminatedOrEmptyString,

    /// A binary URL uses a scheme other than `https` or `file`
    #[error("non-https, non-file URL found for dependency type `binary`")]
    InvalidBinaryScheme,

    /// A binary payload is not a URL
    #[error("invalid URL found for dependency type `binary`")]
    InvalidBinaryURL,

    /// The repository identifier collaborator rejected a `github` payload
    #[error(transparent)]
    DelegatedRepositoryError(#[from] RepositoryError),
}

/// A manifest line parse failure, with the 1-based line it occurred on
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} (line {line})")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
}

impl ParseError {
    /// Creates a new ParseError
    pub fn new(kind: impl Into<ParseErrorKind>, line: usize) -> Self {
        Self {
            kind: kind.into(),
            line,
        }
    }

    /// Human-readable message without the line number
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Errors related to identifier hashing
#[derive(Error, Debug)]
pub enum HashError {
    /// The hashing tool could not be run or exited unsuccessfully
    #[error("failed to run hashing tool '{program}': {message}")]
    HashInvocationFailed { program: String, message: String },

    /// The hashing tool printed nothing usable as a digest
    #[error("hashing tool '{program}' produced malformed output: {output:?}")]
    MalformedHashOutput { program: String, output: String },
}

impl HashError {
    /// Creates a new HashInvocationFailed error
    pub fn invocation_failed(program: impl Into<String>, message: impl Into<String>) -> Self {
        HashError::HashInvocationFailed {
            program: program.into(),
            message: message.into(),
        }
    }

    /// Creates a new MalformedHashOutput error
    pub fn malformed_output(program: impl Into<String>, output: impl Into<String>) -> Self {
        HashError::MalformedHashOutput {
            program: program.into(),
            output: output.into(),
        }
    }
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No declarations were given
    #[error("no dependency declarations given")]
    NoDeclarations,

    /// Base directory for relative binary paths is unusable
    #[error("invalid base directory '{path}': {message}")]
    InvalidBase { path: PathBuf, message: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_includes_line() {
        let err = ParseError::new(ParseErrorKind::MissingOpeningQuote, 3);
        let msg = format!("{}", err);
        assert!(msg.contains("expected string after dependency type"));
        assert!(msg.contains("line 3"));
    }

    #[test]
    fn test_parse_error_message_omits_line() {
        let err = ParseError::new(ParseErrorKind::UnexpectedType, 7);
        assert_eq!(err.message(), "unexpected dependency type");
    }

    #[test]
    fn test_parse_error_from_repository_error() {
        let err = ParseError::new(RepositoryError::invalid_identifier("nope"), 1);
        assert_eq!(
            err.kind,
            ParseErrorKind::DelegatedRepositoryError(RepositoryError::InvalidIdentifier {
                identifier: "nope".to_string()
            })
        );
        assert!(err.message().contains("invalid GitHub repository identifier \"nope\""));
    }

    #[test]
    fn test_hash_error_invocation_failed() {
        let err = HashError::invocation_failed("shasum", "No such file or directory");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to run hashing tool 'shasum'"));
        assert!(msg.contains("No such file"));
    }

    #[test]
    fn test_hash_error_malformed_output() {
        let err = HashError::malformed_output("shasum", "   ");
        let msg = format!("{}", err);
        assert!(msg.contains("malformed output"));
    }

    #[test]
    fn test_config_error_conflicting_options() {
        let err = ConfigError::ConflictingOptions {
            message: "--quiet and --verbose cannot be used together".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("conflicting options"));
    }

    #[test]
    fn test_error_debug_trait() {
        let err = ParseError::new(ParseErrorKind::UnterminatedOrEmptyString, 1);
        let debug = format!("{:?}", err);
        assert!(debug.contains("UnterminatedOrEmptyString"));
    }
}
