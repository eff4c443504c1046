use crate::{Error, Result};
use std::env;
use std::time::Duration;

/// GitHub upstream configuration
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Base URL of the REST API, without trailing slash
    pub api_base_url: String,

    /// Value pinned in the `X-GitHub-Api-Version` header
    pub api_version: String,

    /// Media type sent in the `Accept` header
    pub accept: String,

    /// Sent as `User-Agent`; GitHub rejects requests without one
    pub user_agent: String,

    /// Optional request timeout. `None` keeps the transport default
    pub timeout: Option<Duration>,
}

impl GitHubConfig {
    /// Create a new GitHubConfig from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env::var("GITHUB_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            api_version: env::var("GITHUB_API_VERSION").unwrap_or(defaults.api_version),
            accept: env::var("GITHUB_ACCEPT").unwrap_or(defaults.accept),
            user_agent: defaults.user_agent,
            timeout: env::var("GITHUB_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
        }
    }

    /// Point the client at another base URL (used against mock servers)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Validate that the base URL is an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api_base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(Error::Config(format!(
                "GITHUB_API_URL must use http or https, got {scheme}"
            ))),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            api_version: "2022-11-28".to_string(),
            accept: "application/vnd.github.v3+json".to_string(),
            user_agent: format!("repo-gateway/{}", env!("CARGO_PKG_VERSION")),
            timeout: None,
        }
    }
}
