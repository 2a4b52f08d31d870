//! Promotion of Git remotes to GitHub repositories
//!
//! The host check is a plain substring search for `github.com`, not a
//! parse of the URL's host component. A remote that mentions the domain
//! anywhere (a longer host name, a path segment) followed by `/` or `:`
//! and a valid `owner/name` is treated as a GitHub repository.

use super::{Dependency, GitUrl, Repository};
use tracing::debug;

/// Domain searched for in Git remotes
pub const GITHUB_HOST_IDENTIFIER: &str = "github.com";

impl Dependency {
    /// Classifies a Git remote as a GitHub repository or a plain Git dependency
    ///
    /// Never fails: anything that does not look like a GitHub repository
    /// stays a [`Dependency::Git`].
    pub fn from_git_url(url: GitUrl) -> Dependency {
        match github_identifier(url.as_str()) {
            Some(identifier) => match Repository::from_identifier(identifier) {
                Ok((server, repository)) => {
                    debug!(url = %url, %repository, "classified Git remote as GitHub repository");
                    Dependency::GitHub { server, repository }
                }
                Err(e) => {
                    debug!(url = %url, error = %e, "GitHub-like remote kept as Git dependency");
                    Dependency::Git { url }
                }
            },
            None => Dependency::Git { url },
        }
    }
}

impl From<GitUrl> for Dependency {
    fn from(url: GitUrl) -> Self {
        Dependency::from_git_url(url)
    }
}

/// Returns the text after `github.com/` or `github.com:`, if non-empty
fn github_identifier(url: &str) -> Option<&str> {
    let start = url.find(GITHUB_HOST_IDENTIFIER)?;
    let rest = &url[start + GITHUB_HOST_IDENTIFIER.len()..];
    let rest = rest.strip_prefix('/').or_else(|| rest.strip_prefix(':'))?;
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}
