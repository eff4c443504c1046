//! Projection of upstream payloads into local response shapes
//!
//! Extraction is total: a missing or mistyped field falls back to its default
//! instead of failing the request.

use crate::api::models::{PullRequestCount, RepositorySummary};
use crate::backend::RawObject;

/// Map each upstream repository object to a summary, keeping order
pub fn summarize_repositories(raw: &[RawObject]) -> Vec<RepositorySummary> {
    raw.iter().map(summarize_repository).collect()
}

fn summarize_repository(raw: &RawObject) -> RepositorySummary {
    RepositorySummary {
        name: raw
            .get("name")
            .and_then(RawObject::as_str)
            .unwrap_or_default()
            .to_string(),
        private: raw
            .get("private")
            .and_then(RawObject::as_bool)
            .unwrap_or_default(),
    }
}

/// Upstream already filters by `state=open`, so this is the array length
pub fn count_open_pull_requests(raw: &[RawObject]) -> PullRequestCount {
    PullRequestCount {
        open_pull_requests: raw.len(),
    }
}
