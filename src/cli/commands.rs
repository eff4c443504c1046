use crate::api::models::{ErrorBody, PullRequestCount, RepositoryCreateRequest, RepositorySummary};
use crate::cli::RemoteArgs;
use crate::{Error, Result};
use reqwest::{header, Client, RequestBuilder, Response};
use urlencoding::encode;

/// Create a repository
pub async fn create(remote: &RemoteArgs, name: &str) -> Result<()> {
    let created = create_repository(remote, name).await?;
    println!("✓ Created repository: {}", created.name);
    Ok(())
}

/// List repositories of the token owner
pub async fn list(remote: &RemoteArgs) -> Result<()> {
    let repositories = fetch_repositories(remote).await?;
    print_repositories(&repositories);
    Ok(())
}

/// Delete a repository
pub async fn delete(remote: &RemoteArgs, owner: &str, repo: &str) -> Result<()> {
    delete_repository(remote, owner, repo).await?;
    println!("✓ Deleted repository: {owner}/{repo}");
    Ok(())
}

/// Print the number of open pull requests
pub async fn pulls(remote: &RemoteArgs, owner: &str, repo: &str) -> Result<()> {
    let count = fetch_open_pull_requests(remote, owner, repo).await?;
    println!(
        "{owner}/{repo}: {} open pull request(s)",
        count.open_pull_requests
    );
    Ok(())
}

pub async fn create_repository(remote: &RemoteArgs, name: &str) -> Result<RepositoryCreateRequest> {
    let url = format!("{}/repositories", base_url(remote));
    let request = RepositoryCreateRequest {
        name: name.to_string(),
    };

    let response = authorize(Client::new().post(&url), remote)
        .json(&request)
        .send()
        .await?;

    Ok(expect_success(response).await?.json().await?)
}

pub async fn fetch_repositories(remote: &RemoteArgs) -> Result<Vec<RepositorySummary>> {
    let url = format!("{}/repositories", base_url(remote));
    let response = authorize(Client::new().get(&url), remote).send().await?;

    Ok(expect_success(response).await?.json().await?)
}

pub async fn delete_repository(remote: &RemoteArgs, owner: &str, repo: &str) -> Result<()> {
    let url = format!(
        "{}/repositories/{}/{}",
        base_url(remote),
        encode(owner),
        encode(repo)
    );
    let response = authorize(Client::new().delete(&url), remote).send().await?;

    expect_success(response).await?;
    Ok(())
}

pub async fn fetch_open_pull_requests(
    remote: &RemoteArgs,
    owner: &str,
    repo: &str,
) -> Result<PullRequestCount> {
    let url = format!(
        "{}/repositories/{}/{}/pulls",
        base_url(remote),
        encode(owner),
        encode(repo)
    );
    let response = authorize(Client::new().get(&url), remote).send().await?;

    Ok(expect_success(response).await?.json().await?)
}

// Helper functions

fn base_url(remote: &RemoteArgs) -> &str {
    remote.server.trim_end_matches('/')
}

fn authorize(request: RequestBuilder, remote: &RemoteArgs) -> RequestBuilder {
    match &remote.token {
        Some(token) => request.header(header::AUTHORIZATION, token),
        None => request,
    }
}

/// Turn a gateway error response into an `Error` carrying its message
async fn expect_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| "no error message".to_string());

    Err(match status.as_u16() {
        400 => Error::Validation(message),
        401 => Error::AuthMissing,
        _ => Error::Internal(format!("Gateway returned {status}: {message}")),
    })
}

fn print_repositories(repositories: &[RepositorySummary]) {
    if repositories.is_empty() {
        println!("No repositories found");
        return;
    }

    println!("Found {} repositories:\n", repositories.len());
    for repository in repositories {
        let visibility = if repository.private {
            "private"
        } else {
            "public"
        };
        println!("  {:<40} {}", repository.name, visibility);
    }
}
