//! Binary framework specification URLs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use url::Url;

/// URL of a binary project specification (a JSON file of versioned archives)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinaryUrl {
    /// Absolute `https` or `file` URL
    pub url: Url,
    /// How the URL was written in the manifest (differs for relative paths)
    pub resolved_description: String,
}

impl BinaryUrl {
    /// Wraps an absolute URL
    pub fn new(url: Url) -> Self {
        let resolved_description = url.to_string();
        Self {
            url,
            resolved_description,
        }
    }

    /// Wraps an absolute URL that was written differently in the manifest
    pub fn with_description(url: Url, description: impl Into<String>) -> Self {
        Self {
            url,
            resolved_description: description.into(),
        }
    }

    /// Returns true if the scheme is one binary dependencies accept
    pub fn is_supported_scheme(url: &Url) -> bool {
        matches!(url.scheme(), "https" | "file")
    }

    /// The declared text, when it differs from the absolute URL
    pub fn written_as(&self) -> Option<&str> {
        Some(self.resolved_description.as_str()).filter(|d| *d != self.url.as_str())
    }

    /// Last path component with a `.json` suffix removed
    pub fn name(&self) -> &str {
        let last = self
            .url
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .unwrap_or_default();
        last.strip_suffix(".json").unwrap_or(last)
    }
}

impl PartialEq for BinaryUrl {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for BinaryUrl {}

impl Hash for BinaryUrl {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

impl fmt::Display for BinaryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}
