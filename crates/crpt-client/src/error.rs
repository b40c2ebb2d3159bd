//! Error types for the document registration client.

use thiserror::Error;

/// Errors that can occur while configuring the client or submitting a
/// document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Invalid construction parameter.
    #[error("invalid configuration for {field}: {reason}")]
    Configuration {
        /// The parameter that failed validation.
        field: String,
        /// The reason it was rejected.
        reason: String,
    },

    /// Submission input rejected before any network activity.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// The input that failed validation.
        field: String,
        /// The reason it was rejected.
        reason: String,
    },

    /// The submission envelope could not be serialized.
    #[error("failed to encode document envelope: {0}")]
    Encode(#[from] serde_json::Error),

    /// The operation was canceled before it completed.
    #[error("operation canceled before completion")]
    Canceled,

    /// The request never produced an HTTP response (connect, TLS, timeout,
    /// or body-read failure).
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The service answered with a non-2xx status.
    #[error("remote service returned status {status}: {body}")]
    Remote {
        /// The HTTP status code.
        status: u16,
        /// The response body, verbatim.
        body: String,
    },
}

impl ClientError {
    /// Returns the HTTP status code for [`ClientError::Remote`] errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn configuration(field: &str, reason: &str) -> Self {
        Self::Configuration {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn validation(field: &str, reason: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}
