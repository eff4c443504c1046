use axum::{
    async_trait,
    extract::{
        rejection::{BytesRejection, PathRejection},
        FromRequestParts, Path,
    },
    http::{request::Parts, StatusCode},
};

use crate::backend::{Credential, RepositoryKey};
use crate::Error;

#[async_trait]
impl<S> FromRequestParts<S> for Credential
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Credential::from_headers(&parts.headers)
    }
}

/// `:owner/:repo` path segments, percent-decoded
#[async_trait]
impl<S> FromRequestParts<S> for RepositoryKey
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<RepositoryKey>::from_request_parts(parts, state)
            .await
            .map(|Path(key)| key)
            .map_err(Error::from)
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        if rejection.status().is_server_error() {
            Error::Internal(rejection.body_text())
        } else {
            Error::Validation(rejection.body_text())
        }
    }
}

impl From<BytesRejection> for Error {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Error::PayloadTooLarge(rejection.body_text())
        } else {
            Error::Validation(rejection.body_text())
        }
    }
}
