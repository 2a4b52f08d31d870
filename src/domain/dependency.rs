//! Dependency declarations

use super::{BinaryUrl, GitUrl, Repository, Server};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Directory, relative to the project root, that checkouts are placed in
pub const CHECKOUTS_PATH: &str = "Carthage/Checkouts";

/// A single dependency from a Cartfile
///
/// Equality is per variant: GitHub repositories compare case-insensitively,
/// Git remotes compare by normalized URL, binaries by exact URL. Values of
/// different variants are never equal. Ordering is a separate concern, see
/// [`Dependency::cmp_by_name`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Dependency {
    /// A repository on GitHub or GitHub Enterprise
    #[serde(rename = "github")]
    GitHub {
        server: Server,
        repository: Repository,
    },
    /// An arbitrary Git remote
    Git { url: GitUrl },
    /// A binary project specification
    Binary { url: BinaryUrl },
}

impl Dependency {
    /// Creates a github.com dependency
    pub fn github(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Dependency::GitHub {
            server: Server::DotCom,
            repository: Repository::new(owner, name),
        }
    }

    /// Creates a Git dependency without classifying the URL
    pub fn git(url: impl Into<String>) -> Self {
        Dependency::Git {
            url: GitUrl::new(url),
        }
    }

    /// Creates a binary dependency
    pub fn binary(url: BinaryUrl) -> Self {
        Dependency::Binary { url }
    }

    /// Name of the project, used for checkout directories and sorting
    pub fn name(&self) -> &str {
        match self {
            Dependency::GitHub { repository, .. } => &repository.name,
            Dependency::Git { url } => url.name().unwrap_or(url.as_str()),
            Dependency::Binary { url } => url.name(),
        }
    }

    /// Checkout location relative to the project root
    pub fn relative_path(&self) -> String {
        format!("{}/{}", CHECKOUTS_PATH, self.name())
    }

    /// The keyword this dependency is declared with
    pub fn kind(&self) -> &'static str {
        match self {
            Dependency::GitHub { .. } => "github",
            Dependency::Git { .. } => "git",
            Dependency::Binary { .. } => "binary",
        }
    }

    /// Canonical string that identifies this dependency for hashing
    pub fn hashable_form(&self) -> String {
        match self {
            Dependency::GitHub { server, repository } => {
                server.url_for(&repository.folded()).as_str().to_lowercase()
            }
            Dependency::Git { url } => url.normalized(),
            Dependency::Binary { url } => url.url.to_string(),
        }
    }

    /// Compares by name, ignoring case
    ///
    /// Distinct dependencies may compare `Equal` here; this is not the
    /// ordering `Eq` implies, so `Ord` is intentionally not implemented.
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        let lhs = self.name().chars().flat_map(char::to_lowercase);
        let rhs = other.name().chars().flat_map(char::to_lowercase);
        lhs.cmp(rhs)
    }

    /// Text used inside the quotes when rendering
    fn payload(&self) -> String {
        match self {
            Dependency::GitHub { server, repository } => match server {
                Server::DotCom if repository.has_shorthand() => repository.to_string(),
                _ => server.url_for(repository).to_string(),
            },
            Dependency::Git { url } => url.to_string(),
            Dependency::Binary { url } => url.url.to_string(),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\"", self.kind(), self.payload())
    }
}

/// Stable sort by name, ignoring case; ties keep their input order
pub fn sort_by_name(dependencies: &mut [Dependency]) {
    dependencies.sort_by(Dependency::cmp_by_name);
}

/// Drops dependencies equal to one seen earlier, keeping the first
pub fn dedupe(dependencies: Vec<Dependency>) -> Vec<Dependency> {
    let mut seen = std::collections::HashSet::new();
    dependencies
        .into_iter()
        .filter(|dep| seen.insert(dep.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn binary(s: &str) -> Dependency {
        Dependency::binary(BinaryUrl::new(Url::parse(s).unwrap()))
    }

    fn enterprise(base: &str, owner: &str, name: &str) -> Dependency {
        Dependency::GitHub {
            server: Server::Enterprise(Url::parse(base).unwrap()),
            repository: Repository::new(owner, name),
        }
    }

    #[test]
    fn test_name_github() {
        assert_eq!(Dependency::github("owner", "Name").name(), "Name");
    }

    #[test]
    fn test_name_git() {
        assert_eq!(Dependency::git("https://example.com/a/b.git").name(), "b");
        assert_eq!(Dependency::git("/").name(), "/");
    }

    #[test]
    fn test_name_binary() {
        assert_eq!(binary("https://example.com/sdk/Lib.json").name(), "Lib");
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            Dependency::github("owner", "name").relative_path(),
            "Carthage/Checkouts/name"
        );
    }

    #[test]
    fn test_hashable_form_github_is_lowercased() {
        assert_eq!(
            Dependency::github("Owner", "Name").hashable_form(),
            "https://github.com/owner/name"
        );
    }

    #[test]
    fn test_hashable_form_github_folds_non_ascii_case() {
        assert_eq!(
            Dependency::github("Ärger", "Kit").hashable_form(),
            Dependency::github("ärger", "kit").hashable_form()
        );
    }

    #[test]
    fn test_display_github_without_shorthand_uses_url() {
        let dep = Dependency::github("own er", "name");
        assert_eq!(dep.to_string(), "github \"https://github.com/own%20er/name\"");
    }

    #[test]
    fn test_hashable_form_git_is_normalized() {
        assert_eq!(
            Dependency::git("git@example.com:Owner/Name.git").hashable_form(),
            "example.com/Owner/Name"
        );
    }

    #[test]
    fn test_hashable_form_binary() {
        assert_eq!(
            binary("https://example.com/Lib.json").hashable_form(),
            "https://example.com/Lib.json"
        );
    }

    #[test]
    fn test_equality_github_ignores_case() {
        assert_eq!(
            Dependency::github("Owner", "Name"),
            Dependency::github("owner", "name")
        );
    }

    #[test]
    fn test_equality_git_respects_case() {
        assert_ne!(
            Dependency::git("https://example.com/Owner/Name"),
            Dependency::git("https://example.com/owner/name")
        );
    }

    #[test]
    fn test_equality_across_variants() {
        let github = Dependency::github("owner", "name");
        let git = Dependency::git("https://example.com/owner/name");
        assert_eq!(github.name(), git.name());
        assert_ne!(github, git);
        assert_eq!(github.cmp_by_name(&git), Ordering::Equal);
    }

    #[test]
    fn test_equality_github_server() {
        assert_ne!(
            Dependency::github("owner", "name"),
            enterprise("https://ghe.local", "owner", "name")
        );
    }

    #[test]
    fn test_cmp_by_name_ignores_case() {
        let a = Dependency::github("x", "alpha");
        let b = Dependency::git("https://example.com/Beta");
        assert_eq!(a.cmp_by_name(&b), Ordering::Less);
        assert_eq!(b.cmp_by_name(&a), Ordering::Greater);
    }

    #[test]
    fn test_sort_by_name_keeps_ties_in_order() {
        let mut deps = vec![
            Dependency::git("https://example.com/x/Same"),
            Dependency::github("a", "same"),
            Dependency::github("a", "Other"),
        ];
        sort_by_name(&mut deps);
        assert_eq!(deps[0], Dependency::github("a", "Other"));
        assert_eq!(deps[1], Dependency::git("https://example.com/x/Same"));
        assert_eq!(deps[2], Dependency::github("a", "same"));
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let deps = vec![
            Dependency::github("Owner", "Name"),
            Dependency::git("https://example.com/a/b"),
            Dependency::github("owner", "name"),
            Dependency::git("https://example.com/a/b.git"),
        ];
        let deduped = dedupe(deps);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].payload(), "Owner/Name");
    }

    #[test]
    fn test_display_github() {
        assert_eq!(
            Dependency::github("owner", "name").to_string(),
            "github \"owner/name\""
        );
    }

    #[test]
    fn test_display_enterprise() {
        assert_eq!(
            enterprise("https://ghe.local/tools", "owner", "name").to_string(),
            "github \"https://ghe.local/tools/owner/name\""
        );
    }

    #[test]
    fn test_display_git_uses_raw_form() {
        assert_eq!(
            Dependency::git("git@example.com:a/b.git").to_string(),
            "git \"git@example.com:a/b.git\""
        );
    }

    #[test]
    fn test_display_binary() {
        assert_eq!(
            binary("https://example.com/Lib.json").to_string(),
            "binary \"https://example.com/Lib.json\""
        );
    }

    #[test]
    fn test_serde_dependency() {
        let dep = Dependency::github("owner", "name");
        let json = serde_json::to_value(&dep).unwrap();
        assert_eq!(json["type"], "github");
        assert_eq!(json["repository"]["owner"], "owner");
        let parsed: Dependency = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, dep);
    }
}
