use async_trait::async_trait;
use reqwest::StatusCode;

use crate::models::UserProfile;

/// Path of the zero-interaction login endpoint, relative to the API base URL.
pub const AUTO_LOGIN_PATH: &str = "/v1/auto_login";
/// Path of the who-am-i endpoint, relative to the API base URL.
pub const WHOAMI_PATH: &str = "/users/whoami";

/// Failures talking to the backend. Every variant carries the URL it concerns.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: StatusCode },
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ApiError {
    /// The HTTP status the server answered with, if it answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The two backend calls the session bootstrap depends on.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// `GET <base>/v1/auto_login`. Success means the server established a session.
    async fn auto_login(&self) -> Result<(), ApiError>;

    /// `GET <base>/users/whoami` for the ambient session.
    async fn whoami(&self) -> Result<UserProfile, ApiError>;
}
