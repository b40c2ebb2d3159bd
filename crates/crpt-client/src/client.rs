//! Document submission orchestration.
//!
//! [`CrptClient`] composes the admission controller, the envelope
//! serializer, the authorization provider, and the transport into one
//! `submit` pipeline. Steps run strictly in order: validate, admit,
//! serialize, authorize, dispatch, map. Nothing touches the network before
//! a grant is held, and the grant is consumed the moment admission returns,
//! whatever the submission's eventual outcome.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::auth::AuthorizationProvider;
use crate::document::{Document, Envelope};
use crate::error::ClientError;
use crate::limiter::RateLimiter;
use crate::transport::{ApiRequest, DocumentTransport, HttpTransport};

/// Default registry base URL.
pub const DEFAULT_BASE_URL: &str = "https://ismp.crpt.ru";

const CREATE_DOCUMENT_PATH: &str = "/api/v3/lk/documents/create";
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`CrptClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Registry base URL. Trailing slashes are ignored.
    pub base_url: String,

    /// Maximum submissions inside any rolling window.
    pub max_requests: u32,

    /// Length of the rolling window.
    pub window: Duration,

    /// TCP connect bound for the default transport.
    pub connect_timeout: Duration,

    /// Whole-request bound for the default transport.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration with the given admission parameters and
    /// defaults for everything else.
    #[must_use]
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_requests,
            window,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Rate-limited client for the document registration endpoint.
///
/// Cheap to share behind an `Arc`; every method takes `&self` and the
/// admission controller serializes submissions across tasks.
pub struct CrptClient {
    endpoint: String,
    limiter: RateLimiter,
    auth: Arc<dyn AuthorizationProvider>,
    transport: Arc<dyn DocumentTransport>,
}

impl CrptClient {
    /// Creates a client using the bundled HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when the base URL is blank,
    /// an admission parameter is zero, or the HTTP client cannot be built.
    pub fn new(
        config: ClientConfig,
        auth: Arc<dyn AuthorizationProvider>,
    ) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(config.connect_timeout, config.request_timeout)?;
        Self::with_transport(config, auth, Arc::new(transport))
    }

    /// Creates a client with a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when the base URL is blank
    /// or an admission parameter is zero.
    pub fn with_transport(
        config: ClientConfig,
        auth: Arc<dyn AuthorizationProvider>,
        transport: Arc<dyn DocumentTransport>,
    ) -> Result<Self, ClientError> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::configuration("base_url", "must not be blank"));
        }
        let limiter = RateLimiter::new(config.max_requests, config.window)?;
        let endpoint = format!(
            "{}{CREATE_DOCUMENT_PATH}",
            config.base_url.trim_end_matches('/')
        );
        Ok(Self {
            endpoint,
            limiter,
            auth,
            transport,
        })
    }

    /// Submits a document with its detached signature.
    ///
    /// Waits for an admission grant when the rolling window is full, then
    /// POSTs the canonical envelope. On a 2xx response the body is returned
    /// verbatim.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Validation`] for a blank signature or an empty
    ///   document; no grant is consumed and nothing is sent.
    /// - [`ClientError::Encode`] when the envelope cannot be serialized.
    /// - [`ClientError::Transport`] when no HTTP response was produced.
    /// - [`ClientError::Remote`] for a non-2xx response, with the status
    ///   and the body exactly as received.
    pub async fn submit(&self, document: &Document, signature: &str) -> Result<String, ClientError> {
        if signature.trim().is_empty() {
            return Err(ClientError::validation("signature", "must not be blank"));
        }
        if document.is_empty() {
            return Err(ClientError::validation("document", "must not be empty"));
        }

        self.limiter.acquire().await;

        let body = serde_json::to_string(&Envelope::new(document, signature))?;
        let authorization = self.auth.authorization()?;

        tracing::debug!(
            endpoint = %self.endpoint,
            body_bytes = body.len(),
            "submitting document"
        );

        let response = self
            .transport
            .execute(ApiRequest {
                url: self.endpoint.clone(),
                authorization,
                body,
            })
            .await?;

        if (200..300).contains(&response.status) {
            tracing::info!(status = response.status, "document submitted");
            Ok(response.body)
        } else {
            tracing::warn!(
                status = response.status,
                body_bytes = response.body.len(),
                "registry rejected submission"
            );
            Err(ClientError::Remote {
                status: response.status,
                body: response.body,
            })
        }
    }

    /// Like [`CrptClient::submit`], aborting with [`ClientError::Canceled`]
    /// when `cancel` fires first.
    ///
    /// Canceling while waiting for admission leaves the grant sequence
    /// untouched. Canceling after admission does not refund the grant; the
    /// slot stays occupied until it ages out of the window.
    ///
    /// # Errors
    ///
    /// [`ClientError::Canceled`] on cancellation, otherwise as
    /// [`CrptClient::submit`].
    pub async fn submit_with_cancel(
        &self,
        document: &Document,
        signature: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ClientError> {
        tokio::select! {
            () = cancel.cancelled() => Err(ClientError::Canceled),
            result = self.submit(document, signature) => result,
        }
    }
}

impl std::fmt::Debug for CrptClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrptClient")
            .field("endpoint", &self.endpoint)
            .field("limiter", &self.limiter)
            .finish_non_exhaustive()
    }
}
