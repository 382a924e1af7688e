use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, info};

use super::api::{ApiError, SessionApi, AUTO_LOGIN_PATH, WHOAMI_PATH};
use crate::config::ApiConfig;
use crate::models::UserProfile;

/// `SessionApi` over HTTP.
///
/// The client keeps a cookie jar, so a session cookie handed out by
/// `auto_login` is presented on every later `whoami` call.
pub struct HttpSessionApi {
    client: Client,
    base_url: String,
}

impl HttpSessionApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(ms) = config.timeout_in_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        info!("Creating session API client for '{}'", base_url);
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, url: &str) -> Result<Response, ApiError> {
        debug!("Sending GET request to: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            debug!("GET {} answered {}", url, status);
            Err(ApiError::Status {
                url: url.to_string(),
                status,
            })
        }
    }
}

#[async_trait]
impl SessionApi for HttpSessionApi {
    async fn auto_login(&self) -> Result<(), ApiError> {
        let url = self.url(AUTO_LOGIN_PATH);
        self.get(&url).await.map(|_| ())
    }

    async fn whoami(&self) -> Result<UserProfile, ApiError> {
        let url = self.url(WHOAMI_PATH);
        let response = self.get(&url).await?;
        response
            .json::<UserProfile>()
            .await
            .map_err(|e| ApiError::Decode {
                url,
                message: e.to_string(),
            })
    }
}
