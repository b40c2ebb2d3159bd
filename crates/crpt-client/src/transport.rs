//! HTTP transport seam for registry submissions.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::error::ClientError;

/// A fully prepared submission request.
///
/// The body is already serialized; transports send it as-is.
#[derive(Debug)]
pub struct ApiRequest {
    /// Absolute endpoint URL.
    pub url: String,
    /// `Authorization` header value.
    pub authorization: SecretString,
    /// Serialized JSON envelope.
    pub body: String,
}

/// Raw HTTP outcome as received from the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, verbatim.
    pub body: String,
}

/// Sends prepared submission requests to the registry.
///
/// Implementations return `Ok` for any response the service produced,
/// whatever its status; mapping non-2xx statuses onto errors is the
/// caller's job. [`ClientError::Transport`] is reserved for requests that
/// never produced a response.
#[async_trait]
pub trait DocumentTransport: Send + Sync {
    /// Executes one `POST` against the registry.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] for connect, TLS, timeout, and
    /// body-read failures.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

/// Production transport over a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a transport with both timeout bounds applied to every
    /// request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when the underlying HTTP
    /// client cannot be constructed.
    pub fn new(connect_timeout: Duration, request_timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|err| ClientError::configuration("http_client", &err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentTransport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let response = self
            .client
            .post(&request.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(
                reqwest::header::AUTHORIZATION,
                request.authorization.expose_secret(),
            )
            .body(request.body)
            .send()
            .await
            .map_err(|err| ClientError::Transport(Box::new(err)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| ClientError::Transport(Box::new(err)))?;

        Ok(ApiResponse { status, body })
    }
}
