//! Error type surfaced by every request.
//!
//! Callers see exactly one error type and branch on [`HttpResponseError::status_code`].
//! Transport failures are reported with status 500; the underlying
//! [`TransportError`] is only reachable through [`std::error::Error::source`].

use thiserror::Error as ThisError;

use super::transport::TransportError;

/// Status code reported for failures that never produced a response.
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;

/// A request that did not produce a successful response.
///
/// The message describes the call (verb, endpoint, target, headers and body)
/// followed by what went wrong: the transport failure, or the non-200 status
/// and response body.
#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct HttpResponseError {
    message: String,
    status_code: u16,
    #[source]
    source: Option<TransportError>,
}

impl HttpResponseError {
    /// Error for a response with a non-success status.
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            status_code,
            source: None,
        }
    }

    /// Error for a request that failed before any response was read.
    pub fn transport(message: impl Into<String>, source: TransportError) -> Self {
        Self {
            message: message.into(),
            status_code: TRANSPORT_FAILURE_STATUS,
            source: Some(source),
        }
    }

    /// Human-readable description of the failed call.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status of the response, or 500 when no response was received.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Check if the service reported the target as missing.
    pub fn is_not_found(&self) -> bool {
        self.status_code == 404
    }

    /// Check if the token was rejected.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status_code, 401 | 403)
    }

    /// Check if the status is in the 4xx range.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    /// Check if the status is in the 5xx range. Includes transport failures.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    /// Check if the request failed before a response was received.
    pub fn is_transport_failure(&self) -> bool {
        self.source.is_some()
    }
}
