//! Dependency declaration parser
//!
//! Handles:
//! - `github "owner/name"` and `github "https://ghe.example.com/owner/name"`
//! - `git "<remote>"`, promoted to a GitHub dependency when the remote is on github.com
//! - `binary "https://..."` and `binary "file:///..."`, plus relative paths given a base
//!
//! Payloads run to the next `"`; there is no escaping.

use super::Cursor;
use crate::domain::{BinaryUrl, Dependency, GitUrl, Repository};
use crate::error::{ParseError, ParseErrorKind};
use std::path::Path;
use std::str::FromStr;
use url::Url;

/// Declaration keywords, tried in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    GitHub,
    Git,
    Binary,
}

impl Keyword {
    // `github` must be tried before `git`, which is its prefix
    const ALL: [Keyword; 3] = [Keyword::GitHub, Keyword::Git, Keyword::Binary];

    fn literal(self) -> &'static str {
        match self {
            Keyword::GitHub => "github",
            Keyword::Git => "git",
            Keyword::Binary => "binary",
        }
    }

    fn scan(cursor: &mut Cursor<'_>) -> Option<Keyword> {
        Self::ALL
            .into_iter()
            .find(|keyword| cursor.scan_literal(keyword.literal()))
    }
}

impl Dependency {
    /// Parses one declaration at the cursor
    ///
    /// On success the cursor is left just after the closing quote.
    pub fn parse(cursor: &mut Cursor<'_>) -> Result<Dependency, ParseError> {
        Self::parse_with_base(cursor, None)
    }

    /// Parses one declaration, resolving relative `binary` paths against `base`
    pub fn parse_with_base(
        cursor: &mut Cursor<'_>,
        base: Option<&Path>,
    ) -> Result<Dependency, ParseError> {
        let keyword = Keyword::scan(cursor)
            .ok_or_else(|| ParseError::new(ParseErrorKind::UnexpectedType, cursor.line()))?;

        if !cursor.scan_literal("\"") {
            return Err(ParseError::new(
                ParseErrorKind::MissingOpeningQuote,
                cursor.line(),
            ));
        }

        let payload = match cursor.scan_up_to('"') {
            Some(payload) if cursor.scan_literal("\"") => payload,
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::UnterminatedOrEmptyString,
                    cursor.line(),
                ))
            }
        };

        let line = cursor.line();
        match keyword {
            Keyword::GitHub => {
                let (server, repository) =
                    Repository::from_identifier(payload).map_err(|e| ParseError::new(e, line))?;
                Ok(Dependency::GitHub { server, repository })
            }
            Keyword::Git => Ok(Dependency::from_git_url(GitUrl::new(payload))),
            Keyword::Binary => parse_binary(payload, base)
                .map(Dependency::binary)
                .map_err(|kind| ParseError::new(kind, line)),
        }
    }
}

fn parse_binary(payload: &str, base: Option<&Path>) -> Result<BinaryUrl, ParseErrorKind> {
    match Url::parse(payload) {
        Ok(url) if BinaryUrl::is_supported_scheme(&url) => Ok(BinaryUrl::new(url)),
        Ok(_) => Err(ParseErrorKind::InvalidBinaryScheme),
        Err(url::ParseError::RelativeUrlWithoutBase) if is_url_reference(payload) => {
            let base = base.ok_or(ParseErrorKind::InvalidBinaryURL)?;
            let url = Url::from_directory_path(base)
                .ok()
                .and_then(|base| base.join(payload).ok())
                .ok_or(ParseErrorKind::InvalidBinaryURL)?;
            Ok(BinaryUrl::with_description(url, payload))
        }
        Err(_) => Err(ParseErrorKind::InvalidBinaryURL),
    }
}

/// Whether `payload` only uses characters allowed unencoded in a URL
fn is_url_reference(payload: &str) -> bool {
    payload.chars().all(|c| {
        c.is_ascii_graphic()
            && !matches!(c, '"' | '<' | '>' | '\\' | '^' | '`' | '{' | '|' | '}')
    })
}

impl FromStr for Dependency {
    type Err = ParseError;

    /// Parses the first declaration in `s`; anything after the closing quote is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dependency::parse(&mut Cursor::new(s))
    }
}
