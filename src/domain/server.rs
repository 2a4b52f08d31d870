//! GitHub server locations

use super::Repository;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use url::Url;

static DOT_COM_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse("https://github.com").expect("valid github.com URL"));

static DOT_COM_API_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse("https://api.github.com").expect("valid api.github.com URL"));

/// Where a GitHub repository is hosted
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Server {
    /// github.com
    DotCom,
    /// A GitHub Enterprise instance rooted at the given URL
    Enterprise(Url),
}

impl Server {
    /// Base web URL of the server
    pub fn url(&self) -> &Url {
        match self {
            Server::DotCom => &DOT_COM_URL,
            Server::Enterprise(url) => url,
        }
    }

    /// Web URL of a repository on this server
    pub fn url_for(&self, repository: &Repository) -> Url {
        let mut url = self.url().clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(&repository.owner)
                .push(&repository.name);
        }
        url
    }

    /// REST API endpoint of the server
    pub fn api_endpoint(&self) -> Url {
        match self {
            Server::DotCom => DOT_COM_API_URL.clone(),
            Server::Enterprise(url) => {
                let mut api = url.clone();
                if let Ok(mut segments) = api.path_segments_mut() {
                    segments.pop_if_empty().push("api").push("v3");
                }
                api
            }
        }
    }

    /// Returns true for github.com
    pub fn is_dot_com(&self) -> bool {
        matches!(self, Server::DotCom)
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Server::DotCom => write!(f, "GitHub"),
            Server::Enterprise(url) => write!(f, "GitHub Enterprise ({})", url),
        }
    }
}
