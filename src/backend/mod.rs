//! Repository operations behind an injectable interface
//!
//! Handlers only ever talk to [`RepositoryBackend`]. The production
//! implementation is [`crate::github::GitHubClient`]; [`memory::InMemoryBackend`]
//! is a placeholder store for local runs and tests.

pub mod memory;

use crate::{Error, Result};
use async_trait::async_trait;
use axum::http::{header, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use memory::InMemoryBackend;

/// An upstream JSON value whose shape is not modeled locally
pub type RawObject = serde_json::Value;

/// Failure prefixes shared by every backend, followed by `: status code N`
pub mod action {
    pub const CREATE_REPOSITORY: &str = "failed to create repository";
    pub const LIST_REPOSITORIES: &str = "failed to get repositories";
    pub const DELETE_REPOSITORY: &str = "failed to delete repository";
    pub const LIST_PULL_REQUESTS: &str = "failed to get pull requests";
}

/// Repository operations, one upstream call each
#[async_trait]
pub trait RepositoryBackend: Send + Sync {
    /// Create a repository owned by the authenticated user
    async fn create_repository(&self, credential: &Credential, name: &str) -> Result<()>;

    /// List repositories of the authenticated user
    async fn list_repositories(&self, credential: &Credential) -> Result<Vec<RawObject>>;

    /// Delete `owner/repo`
    async fn delete_repository(&self, credential: &Credential, key: &RepositoryKey) -> Result<()>;

    /// List open pull requests of `owner/repo`
    async fn list_open_pull_requests(
        &self,
        credential: &Credential,
        key: &RepositoryKey,
    ) -> Result<Vec<RawObject>>;
}

/// Repository coordinates taken from the request path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryKey {
    pub owner: String,
    pub repo: String,
}

impl RepositoryKey {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepositoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Opaque authorization value, forwarded upstream byte for byte
///
/// The scheme (bearer, basic, ...) is never inspected. The only local check is
/// that the value is present and not blank.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(HeaderValue);

impl Credential {
    pub fn new(value: &str) -> Result<Self> {
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::UpstreamRequest(format!("invalid authorization value: {e}")))?;
        Self::from_header_value(value)
    }

    /// Take the `Authorization` header of an inbound request
    pub fn from_headers(headers: &HeaderMap) -> Result<Self> {
        let value = headers
            .get(header::AUTHORIZATION)
            .cloned()
            .ok_or(Error::AuthMissing)?;
        Self::from_header_value(value)
    }

    fn from_header_value(mut value: HeaderValue) -> Result<Self> {
        if value.as_bytes().iter().all(u8::is_ascii_whitespace) {
            return Err(Error::AuthMissing);
        }
        value.set_sensitive(true);
        Ok(Self(value))
    }

    /// Header value to send upstream as `Authorization`
    pub fn header_value(&self) -> &HeaderValue {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
