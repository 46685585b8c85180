//! HTTP client abstraction for testability

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Errors that can occur while issuing an HTTP request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// Building the underlying client failed.
    #[error("failed to create HTTP client: {0}")]
    Client(String),
    /// The request could not be sent or the connection failed.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
    /// Reading the response body failed.
    #[error("failed to read response: {0}")]
    Body(String),
}

/// Trait for asynchronous HTTP POST operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP POST request with a JSON body.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    /// * `json_body` - JSON body as a string
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn post_json(
        &self,
        url: &str,
        json_body: &str,
    ) -> impl Future<Output = Result<Vec<u8>, HttpError>> + Send;
}

impl<T: HttpClient> HttpClient for std::sync::Arc<T> {
    async fn post_json(&self, url: &str, json_body: &str) -> Result<Vec<u8>, HttpError> {
        (**self).post_json(url, json_body).await
    }
}

/// Timeout applied to availability requests, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 20;

/// Descriptive client identifier sent with every request.
const CLIENT_USER_AGENT: &str = concat!("surveywall/rust/", env!("CARGO_PKG_VERSION"));

/// Real HTTP client implementation using reqwest.
///
/// Requests time out after 20 seconds, bypass intermediary HTTP caches,
/// and carry a descriptive `User-Agent`.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Creates a new client with the default 20-second timeout.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(REQUEST_TIMEOUT_SECS)
    }

    /// Creates a new client with a custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(CLIENT_USER_AGENT)
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new().expect("Failed to create default HTTP client")
    }
}

impl HttpClient for ReqwestHttpClient {
    async fn post_json(&self, url: &str, json_body: &str) -> Result<Vec<u8>, HttpError> {
        trace!(url, bytes = json_body.len(), "HTTP POST request starting");

        let response = self
            .client
            .post(url)
            // Always fetch fresh; availability changes from request to request.
            .header("Cache-Control", "no-cache, no-store")
            .header("Pragma", "no-cache")
            // Wire format of the availability endpoint.
            .header("Content-Type", "application/javascript")
            .body(json_body.to_string())
            .send()
            .await
            .map_err(|e| {
                warn!(
                    url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                HttpError::Transport(e.to_string())
            })?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "HTTP response received");
        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| HttpError::Body(e.to_string()))
    }
}
