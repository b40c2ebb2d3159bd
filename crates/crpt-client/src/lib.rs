//! # crpt-client
//!
//! Rate-limited client for the CRPT goods-marking document registration
//! API.
//!
//! The crate guards every outbound call with a client-side sliding-window
//! limit (at most `max_requests` submissions inside any rolling `window`)
//! and runs the full submission pipeline:
//!
//! - Validate the document and signature ([`CrptClient::submit`])
//! - Wait for an admission grant ([`RateLimiter`])
//! - Serialize the canonical JSON envelope
//! - POST it with the injected `Authorization` header
//!   ([`AuthorizationProvider`])
//! - Map the outcome onto [`ClientError`]
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use crpt_client::{ClientConfig, CrptClient, Document, StaticTokenProvider};
//!
//! # async fn run() -> Result<(), crpt_client::ClientError> {
//! // At most ten submissions per second, shared by every caller.
//! let config = ClientConfig::new(10, Duration::from_secs(1));
//! let auth = Arc::new(StaticTokenProvider::bearer("<token>")?);
//! let client = CrptClient::new(config, auth)?;
//!
//! let document = Document {
//!     doc_id: Some("doc-123".to_string()),
//!     doc_type: Some("LP_INTRODUCE_GOODS".to_string()),
//!     ..Document::default()
//! };
//! let receipt = client.submit(&document, "base64-signature").await?;
//! println!("registry answered: {receipt}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Design Notes
//!
//! The admission controller keeps a queue of grant timestamps and purges
//! entries lazily as they age out of the window; there are no background
//! tasks and no per-call timers. The queue's mutex is only ever held inside
//! synchronous blocks; a caller that must wait computes its wake deadline
//! under the lock and sleeps outside it.
//!
//! Dropping a submission future (or firing the `CancellationToken` passed
//! to [`CrptClient::submit_with_cancel`]) while it waits for admission
//! leaves the grant sequence untouched. Cancellation after admission does
//! not refund the consumed grant.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod auth;
pub mod client;
pub mod document;
pub mod error;
pub mod limiter;
pub mod transport;

// Re-export main types at crate root for convenience
pub use auth::{AuthorizationProvider, StaticTokenProvider};
pub use client::{ClientConfig, CrptClient, DEFAULT_BASE_URL};
pub use document::{Description, Document, DocumentFormat, DocumentType, Product};
pub use error::ClientError;
pub use limiter::RateLimiter;
pub use transport::{ApiRequest, ApiResponse, DocumentTransport, HttpTransport};
