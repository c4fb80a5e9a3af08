// HTTP client for the auth server

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::errors::{AuthError, AuthErrorKind, ServerError};
use crate::settings::AuthClient;

#[derive(Debug, Serialize)]
struct DestroyRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Auth-server client with connection pooling
///
/// Failed responses are classified through the errno carried in the
/// response body; transport failures map to `ServiceUnavailable`.
pub struct HttpAuthClient {
    http_client: Client,
    base_url: String,
}

impl HttpAuthClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ServerError> {
        let timeout = Duration::from_secs(timeout_secs);
        let connect_timeout = Duration::from_secs(2); // Fail fast on connection

        let http_client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .tcp_nodelay(true)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| {
                ServerError::ConfigurationError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn delete_account(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let url = format!("{}/v1/account/destroy", self.base_url);

        debug!(url = %url, "Requesting account destroy");

        let response = self
            .http_client
            .post(&url)
            .json(&DestroyRequest { email, password })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Auth server request failed");
                if e.is_timeout() || e.is_connect() {
                    AuthError::new(AuthErrorKind::ServiceUnavailable)
                } else {
                    AuthError::unexpected()
                }
            })?;

        if response.status().is_success() {
            return Ok(());
        }

        let errno = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("errno").and_then(|n| n.as_u64()));

        match errno {
            Some(errno) => Err(AuthError::from_errno(errno as u32)),
            None => Err(AuthError::unexpected()),
        }
    }
}
