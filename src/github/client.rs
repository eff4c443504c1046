use crate::backend::{action, Credential, RawObject, RepositoryBackend, RepositoryKey};
use crate::github::{
    config::GitHubConfig,
    models::{CreateRepositoryBody, PullRequestQuery},
};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use tracing::{debug, error};
use urlencoding::encode;

const API_VERSION_HEADER: &str = "x-github-api-version";

/// GitHub API client
///
/// Sends exactly one request per operation. No retries, and the upstream error
/// body is never read; only the status code decides the outcome.
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    config: GitHubConfig,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(config: GitHubConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_str(&config.accept)
                .map_err(|e| Error::Config(format!("Invalid GITHUB_ACCEPT value: {e}")))?,
        );
        headers.insert(
            header::HeaderName::from_static(API_VERSION_HEADER),
            header::HeaderValue::from_str(&config.api_version)
                .map_err(|e| Error::Config(format!("Invalid GITHUB_API_VERSION value: {e}")))?,
        );

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone());

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    /// Start an authenticated request against the API
    fn request(&self, method: Method, path: &str, credential: &Credential) -> RequestBuilder {
        let url = format!("{}{}", self.config.api_base_url, path);
        debug!("GitHub API request: {} {}", method, url);

        self.client
            .request(method, url)
            .header(header::AUTHORIZATION, credential.header_value().clone())
    }

    /// Send a request and accept only `expected` as success
    async fn send(
        &self,
        request: RequestBuilder,
        expected: StatusCode,
        action: &'static str,
    ) -> Result<Response> {
        // Builder errors surface at send time; only a malformed URL gets here
        // because the credential is already a valid header value.
        let response = request.send().await.map_err(|e| {
            if e.is_builder() {
                Error::UpstreamRequest(e.to_string())
            } else {
                Error::UpstreamTransport(e)
            }
        })?;

        let status = response.status();
        if status != expected {
            error!("GitHub API error: {} (expected {})", status, expected);
            return Err(Error::UpstreamStatus {
                action,
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// `/repos/{owner}/{repo}` with each segment percent-encoded, so a decoded
    /// `/`, `?` or `#` cannot escape into another endpoint
    fn repo_path(key: &RepositoryKey) -> String {
        format!("/repos/{}/{}", encode(&key.owner), encode(&key.repo))
    }

    /// Decode a success body as an array of loosely-typed objects
    async fn decode_array(response: Response) -> Result<Vec<RawObject>> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| Error::Decode(e.to_string()))
    }
}

#[async_trait]
impl RepositoryBackend for GitHubClient {
    async fn create_repository(&self, credential: &Credential, name: &str) -> Result<()> {
        let request = self
            .request(Method::POST, "/user/repos", credential)
            .json(&CreateRepositoryBody { name });

        self.send(request, StatusCode::CREATED, action::CREATE_REPOSITORY)
            .await?;
        Ok(())
    }

    async fn list_repositories(&self, credential: &Credential) -> Result<Vec<RawObject>> {
        let request = self.request(Method::GET, "/user/repos", credential);
        let response = self
            .send(request, StatusCode::OK, action::LIST_REPOSITORIES)
            .await?;
        Self::decode_array(response).await
    }

    async fn delete_repository(&self, credential: &Credential, key: &RepositoryKey) -> Result<()> {
        let path = Self::repo_path(key);
        let request = self.request(Method::DELETE, &path, credential);

        self.send(request, StatusCode::NO_CONTENT, action::DELETE_REPOSITORY)
            .await?;
        Ok(())
    }

    async fn list_open_pull_requests(
        &self,
        credential: &Credential,
        key: &RepositoryKey,
    ) -> Result<Vec<RawObject>> {
        let path = format!("{}/pulls", Self::repo_path(key));
        let request = self
            .request(Method::GET, &path, credential)
            .query(&PullRequestQuery::open());

        let response = self
            .send(request, StatusCode::OK, action::LIST_PULL_REQUESTS)
            .await?;
        Self::decode_array(response).await
    }
}
