//! Shared HTTP plumbing for the classroom backend.

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::DEFAULT_BASE_URL;
use crate::error::ClientError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the classroom REST API.
///
/// Every call is a single request; nothing is retried.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        Self {
            base_url: base.trim_end_matches('/').to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            client: build_client(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Attach the bearer token sent with every authenticated request.
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self.client = build_client(timeout_secs);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// Add the bearer token, failing early when there is none.
    pub(crate) fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::MissingToken)?;
        Ok(request.bearer_auth(token))
    }

    /// Send a request and turn error statuses into [`ClientError`]s.
    ///
    /// `what` names the resource for `NotFound` messages.
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                ClientError::NetworkError(format!(
                    "backend not reachable at {}: {e}",
                    self.base_url
                ))
            } else {
                ClientError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status < 400 {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        Err(match status {
            401 | 403 => ClientError::Unauthorized(message),
            404 => ClientError::NotFound(if message.is_empty() {
                what.to_string()
            } else {
                format!("{what}: {message}")
            }),
            _ => ClientError::ApiError { status, message },
        })
    }

    pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("failed to parse response: {e}")))
    }
}

fn build_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .expect("failed to build HTTP client")
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// The backend's `message` field when the body is JSON, otherwise the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
