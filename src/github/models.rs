use serde::Serialize;

/// Body of `POST /user/repos`
#[derive(Debug, Clone, Serialize)]
pub struct CreateRepositoryBody<'a> {
    pub name: &'a str,
}

/// Query of `GET /repos/{owner}/{repo}/pulls`
#[derive(Debug, Clone, Serialize)]
pub struct PullRequestQuery<'a> {
    pub state: &'a str,
}

impl PullRequestQuery<'static> {
    pub fn open() -> Self {
        Self { state: "open" }
    }
}
