use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Body of `POST /repositories`, echoed back on success
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryCreateRequest {
    pub name: String,
}

impl RepositoryCreateRequest {
    /// Decode and validate a raw request body
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let request: Self =
            serde_json::from_slice(body).map_err(|e| Error::Validation(e.to_string()))?;
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("Repository name is required".to_string()));
        }
        Ok(())
    }
}

/// One entry of `GET /repositories`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub private: bool,
}

/// Response of `GET /repositories/:owner/:repo/pulls`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestCount {
    pub open_pull_requests: usize,
}

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
