//! GitHub repository identity and identifier parsing

use super::Server;
use crate::error::RepositoryError;
use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;
use url::Url;

// owner/name shorthand, e.g. ReactiveCocoa/ReactiveSwift
static NWO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\w\-.]+)/([\w\-.]+)$").unwrap());

/// A repository on GitHub or a GitHub Enterprise instance
///
/// Owner and name compare case-insensitively, matching how GitHub
/// resolves them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// The user or organization that owns the repository
    pub owner: String,
    /// The repository name
    pub name: String,
}

impl Repository {
    /// Creates a new repository
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Copy with owner and name lowercased, the form equality works on
    pub fn folded(&self) -> Repository {
        Repository::new(self.owner.to_lowercase(), self.name.to_lowercase())
    }

    /// Returns true if `owner/name` parses back to this repository
    pub fn has_shorthand(&self) -> bool {
        NWO_RE.is_match(&self.to_string())
    }

    /// Parses `owner/name` or a repository URL into a server and repository
    ///
    /// URLs on `github.com` (or `www.github.com`) resolve to
    /// [`Server::DotCom`]; any other host is treated as an enterprise
    /// instance whose base URL is everything before the owner segment.
    /// Owner and name taken from a URL are percent-decoded.
    pub fn from_identifier(identifier: &str) -> Result<(Server, Repository), RepositoryError> {
        if let Some(caps) = NWO_RE.captures(identifier) {
            let owner = &caps[1];
            let name = strip_git_suffix(&caps[2]);
            return Ok((Server::DotCom, Repository::new(owner, name)));
        }

        let invalid = || RepositoryError::invalid_identifier(identifier);

        let url = Url::parse(identifier).map_err(|_| invalid())?;
        let host = url.host_str().ok_or_else(invalid)?;
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();
        if segments.len() < 2 {
            return Err(invalid());
        }

        let decode = |segment: &str| {
            percent_decode_str(segment)
                .decode_utf8()
                .map(|decoded| decoded.into_owned())
                .map_err(|_| invalid())
        };
        let name = decode(strip_git_suffix(segments[segments.len() - 1]))?;
        let owner = decode(segments[segments.len() - 2])?;
        if owner.is_empty() || name.is_empty() {
            return Err(invalid());
        }
        let repository = Repository::new(owner, name);

        if host == "github.com" || host == "www.github.com" {
            return Ok((Server::DotCom, repository));
        }

        let mut base = url.clone();
        base.set_query(None);
        base.set_fragment(None);
        base.set_path(&format!("/{}", segments[..segments.len() - 2].join("/")));
        Ok((Server::Enterprise(base), repository))
    }
}

/// Removes a trailing `.git` from a repository name or path
pub(crate) fn strip_git_suffix(s: &str) -> &str {
    s.strip_suffix(".git").unwrap_or(s)
}

impl PartialEq for Repository {
    fn eq(&self, other: &Self) -> bool {
        self.owner.to_lowercase() == other.owner.to_lowercase()
            && self.name.to_lowercase() == other.name.to_lowercase()
    }
}

impl Eq for Repository {}

impl Hash for Repository {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let folded = self.folded();
        folded.owner.hash(state);
        folded.name.hash(state);
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_identifier_owner_name() {
        let (server, repo) = Repository::from_identifier("Carthage/Carthage").unwrap();
        assert_eq!(server, Server::DotCom);
        assert_eq!(repo.owner, "Carthage");
        assert_eq!(repo.name, "Carthage");
    }

    #[test]
    fn test_from_identifier_strips_git_suffix() {
        let (_, repo) = Repository::from_identifier("owner/name.git").unwrap();
        assert_eq!(repo.name, "name");
    }

    #[test]
    fn test_from_identifier_dotted_names() {
        let (_, repo) = Repository::from_identifier("some-owner/Name.Swift").unwrap();
        assert_eq!(repo.owner, "some-owner");
        assert_eq!(repo.name, "Name.Swift");
    }

    #[test]
    fn test_from_identifier_github_url() {
        let (server, repo) =
            Repository::from_identifier("https://github.com/ReactiveX/RxSwift.git").unwrap();
        assert_eq!(server, Server::DotCom);
        assert_eq!(repo, Repository::new("ReactiveX", "RxSwift"));
    }

    #[test]
    fn test_from_identifier_www_github_url() {
        let (server, repo) =
            Repository::from_identifier("https://www.github.com/owner/name/").unwrap();
        assert_eq!(server, Server::DotCom);
        assert_eq!(repo, Repository::new("owner", "name"));
    }

    #[test]
    fn test_from_identifier_enterprise_url() {
        let (server, repo) =
            Repository::from_identifier("https://git.example.com/tools/owner/name").unwrap();
        assert_eq!(
            server,
            Server::Enterprise(Url::parse("https://git.example.com/tools").unwrap())
        );
        assert_eq!(repo, Repository::new("owner", "name"));
    }

    #[test]
    fn test_from_identifier_enterprise_root() {
        let (server, _) =
            Repository::from_identifier("http://ghe.local/owner/name?tab=readme").unwrap();
        assert_eq!(server.url().as_str(), "http://ghe.local/");
    }

    #[test]
    fn test_from_identifier_rejects_single_component() {
        assert!(Repository::from_identifier("name").is_err());
        assert!(Repository::from_identifier("https://github.com/owner").is_err());
    }

    #[test]
    fn test_from_identifier_rejects_extra_components() {
        let err = Repository::from_identifier("a/b/c").unwrap_err();
        assert_eq!(err, RepositoryError::invalid_identifier("a/b/c"));
    }

    #[test]
    fn test_from_identifier_rejects_empty() {
        assert!(Repository::from_identifier("").is_err());
    }

    #[test]
    fn test_equality_ignores_case() {
        assert_eq!(
            Repository::new("Owner", "Name"),
            Repository::new("owner", "NAME")
        );
        assert_ne!(Repository::new("owner", "a"), Repository::new("owner", "b"));
    }

    #[test]
    fn test_equality_ignores_non_ascii_case() {
        assert_eq!(Repository::new("Ärger", "Kit"), Repository::new("ärger", "KIT"));
        assert_eq!(Repository::new("owner", "Ωmega"), Repository::new("owner", "ωmega"));
    }

    #[test]
    fn test_hash_ignores_non_ascii_case() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Repository::new("Ärger", "Kit"));
        assert!(set.contains(&Repository::new("ärger", "kit")));
    }

    #[test]
    fn test_from_identifier_decodes_url_segments() {
        let (server, repo) =
            Repository::from_identifier("https://github.com/own%20er/n%C3%A4me.git").unwrap();
        assert_eq!(server, Server::DotCom);
        assert_eq!(repo.owner, "own er");
        assert_eq!(repo.name, "näme");
    }

    #[test]
    fn test_from_identifier_rejects_invalid_utf8_segment() {
        assert!(Repository::from_identifier("https://github.com/owner/%FF").is_err());
    }

    #[test]
    fn test_has_shorthand() {
        assert!(Repository::new("owner", "name.swift").has_shorthand());
        assert!(!Repository::new("own er", "name").has_shorthand());
        assert!(!Repository::new("owner", "a/b").has_shorthand());
    }

    #[test]
    fn test_hash_ignores_case() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Repository::new("Owner", "Name"));
        assert!(set.contains(&Repository::new("owner", "name")));
    }

    #[test]
    fn test_display() {
        assert_eq!(Repository::new("a", "b").to_string(), "a/b");
    }
}
