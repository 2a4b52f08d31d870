//! Git remote URLs
//!
//! Handles:
//! - Standard URLs: `https://host/owner/name.git`, `ssh://git@host/path`
//! - SCP syntax: `git@host:owner/name.git`
//! - Local paths: `/abs/path`, `./rel`, `~/repo`, `path/to/repo`

use super::repository::strip_git_suffix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use url::Url;

/// A Git remote as written by the user
///
/// Two values are equal when their normalized forms match, so
/// `https://host/a/b.git` and `git@host:a/b` refer to the same remote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GitUrl {
    url_string: String,
}

impl GitUrl {
    /// Wraps a raw remote string
    pub fn new(url_string: impl Into<String>) -> Self {
        Self {
            url_string: url_string.into(),
        }
    }

    /// The remote exactly as written
    pub fn as_str(&self) -> &str {
        &self.url_string
    }

    /// Comparison form with scheme, user, port, `.git` and trailing `/` removed
    pub fn normalized(&self) -> String {
        let raw = self.url_string.as_str();

        if let Ok(parsed) = Url::parse(raw) {
            if parsed.scheme() == "file" {
                return strip_git_suffix(parsed.path().trim_end_matches('/')).to_string();
            }
            if let Some(host) = parsed.host_str().filter(|h| !h.is_empty()) {
                let path = parsed.path().trim_end_matches('/');
                return format!("{}{}", host, strip_git_suffix(path));
            }
        }

        if raw.starts_with('/') || raw.starts_with('.') || raw.starts_with('~') || !raw.contains(':')
        {
            return strip_git_suffix(raw.trim_end_matches('/')).to_string();
        }

        // scp syntax: [user@]host:path
        let without_user = raw.split_once('@').map_or(raw, |(_, rest)| rest);
        let (host, path) = without_user.split_once(':').unwrap_or(("", without_user));
        let path = strip_git_suffix(path.trim_end_matches('/'));
        if path.starts_with('/') {
            format!("{}{}", host, path)
        } else {
            format!("{}/{}", host, path)
        }
    }

    /// Repository name derived from the last path component, if any
    pub fn name(&self) -> Option<&str> {
        self.url_string
            .split('/')
            .rfind(|component| !component.is_empty())
            .map(strip_git_suffix)
    }
}

impl PartialEq for GitUrl {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for GitUrl {}

impl Hash for GitUrl {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl fmt::Display for GitUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url_string)
    }
}

impl From<&str> for GitUrl {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
