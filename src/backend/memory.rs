use crate::backend::{action, Credential, RawObject, RepositoryBackend, RepositoryKey};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Placeholder backend that keeps repositories in process memory
///
/// Each instance owns its own list of names; clones share it. Every stored
/// repository is public. Credentials are required by the handlers but
/// otherwise ignored here.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    repositories: Arc<RwLock<Vec<String>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing repository names
    pub fn with_repositories<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let repositories = names.into_iter().map(Into::into).collect();

        Self {
            repositories: Arc::new(RwLock::new(repositories)),
        }
    }

    pub async fn len(&self) -> usize {
        self.repositories.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.repositories.read().await.is_empty()
    }
}

#[async_trait]
impl RepositoryBackend for InMemoryBackend {
    async fn create_repository(&self, _credential: &Credential, name: &str) -> Result<()> {
        let mut repositories = self.repositories.write().await;

        if repositories.iter().any(|r| r == name) {
            return Err(Error::UpstreamStatus {
                action: action::CREATE_REPOSITORY,
                status: 422,
            });
        }

        debug!("Storing repository in memory: {}", name);
        repositories.push(name.to_string());
        Ok(())
    }

    async fn list_repositories(&self, _credential: &Credential) -> Result<Vec<RawObject>> {
        let repositories = self.repositories.read().await;
        Ok(repositories
            .iter()
            .map(|name| json!({ "name": name, "private": false }))
            .collect())
    }

    async fn delete_repository(&self, _credential: &Credential, key: &RepositoryKey) -> Result<()> {
        let mut repositories = self.repositories.write().await;

        let position = repositories
            .iter()
            .position(|r| *r == key.repo)
            .ok_or(Error::UpstreamStatus {
                action: action::DELETE_REPOSITORY,
                status: 404,
            })?;

        debug!("Removing repository from memory: {}", key);
        repositories.remove(position);
        Ok(())
    }

    async fn list_open_pull_requests(
        &self,
        _credential: &Credential,
        key: &RepositoryKey,
    ) -> Result<Vec<RawObject>> {
        let repositories = self.repositories.read().await;

        if !repositories.iter().any(|r| *r == key.repo) {
            return Err(Error::UpstreamStatus {
                action: action::LIST_PULL_REQUESTS,
                status: 404,
            });
        }

        // Pull requests are not modeled in memory
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> Credential {
        Credential::new("Bearer t").unwrap()
    }

    #[tokio::test]
    async fn test_create_appends_in_order() {
        let backend = InMemoryBackend::new();
        backend.create_repository(&credential(), "first").await.unwrap();
        backend.create_repository(&credential(), "second").await.unwrap();

        let repos = backend.list_repositories(&credential()).await.unwrap();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0]["name"], "first");
        assert_eq!(repos[1]["name"], "second");
        assert_eq!(repos[1]["private"], false);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_rejected() {
        let backend = InMemoryBackend::with_repositories(["taken"]);
        let err = backend
            .create_repository(&credential(), "taken")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "failed to create repository: status code 422");
        assert_eq!(backend.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_removes_by_name() {
        let backend = InMemoryBackend::with_repositories(["keep", "drop"]);
        backend
            .delete_repository(&credential(), &RepositoryKey::new("anyone", "drop"))
            .await
            .unwrap();

        let repos = backend.list_repositories(&credential()).await.unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0]["name"], "keep");

        let err = backend
            .delete_repository(&credential(), &RepositoryKey::new("anyone", "drop"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UpstreamStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_pull_requests_for_known_repository() {
        let backend = InMemoryBackend::with_repositories(["repo"]);

        let pulls = backend
            .list_open_pull_requests(&credential(), &RepositoryKey::new("me", "repo"))
            .await
            .unwrap();
        assert!(pulls.is_empty());

        assert!(backend
            .list_open_pull_requests(&credential(), &RepositoryKey::new("me", "missing"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_instances_do_not_share_state() {
        let a = InMemoryBackend::new();
        let b = InMemoryBackend::new();
        a.create_repository(&credential(), "only-in-a").await.unwrap();

        assert_eq!(a.len().await, 1);
        assert!(b.is_empty().await);
    }
}
