//! Authorization header supply for registry requests.

use secrecy::{ExposeSecret, SecretString};

use crate::error::ClientError;

/// Supplies the `Authorization` header value for a submission.
///
/// The provider is consulted once per request, immediately before dispatch,
/// so implementations backed by rotating credentials always contribute the
/// current value. How the credential is obtained or refreshed is the
/// implementation's concern.
pub trait AuthorizationProvider: Send + Sync {
    /// Returns the full `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns an error when no credential is currently available.
    fn authorization(&self) -> Result<SecretString, ClientError>;
}

/// Provider that returns a fixed header value on every call.
#[derive(Debug)]
pub struct StaticTokenProvider {
    header: SecretString,
}

impl StaticTokenProvider {
    /// Creates a provider sending `Bearer <token>`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when `token` is blank.
    pub fn bearer(token: &str) -> Result<Self, ClientError> {
        if token.trim().is_empty() {
            return Err(ClientError::configuration("token", "must not be blank"));
        }
        Ok(Self {
            header: SecretString::from(format!("Bearer {token}")),
        })
    }

    /// Creates a provider sending `value` verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when `value` is blank.
    pub fn from_header(value: &str) -> Result<Self, ClientError> {
        if value.trim().is_empty() {
            return Err(ClientError::configuration(
                "authorization",
                "must not be blank",
            ));
        }
        Ok(Self {
            header: SecretString::from(value),
        })
    }
}

impl AuthorizationProvider for StaticTokenProvider {
    fn authorization(&self) -> Result<SecretString, ClientError> {
        Ok(SecretString::from(self.header.expose_secret()))
    }
}
