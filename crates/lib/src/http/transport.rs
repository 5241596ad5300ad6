//! Transport boundary for issuing a single HTTP request.
//!
//! [`HttpClient`](super::HttpClient) owns exactly one [`Transport`] for its
//! lifetime. [`ReqwestTransport`] is the production implementation; tests
//! substitute their own.

use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use thiserror::Error;
use url::Url;

use super::request::{HttpRequest, Verb};

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Failures that happen before a complete response is read.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The endpoint could not be reached.
    #[error("connection to {address} failed: {reason}")]
    Connect { address: String, reason: String },

    /// The request did not complete in time.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The request target does not form a valid URL.
    #[error("invalid target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    /// The transport could not be set up.
    #[error("failed to initialize transport: {0}")]
    Init(String),

    /// Any other failure while sending or reading the response.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl TransportError {
    /// Check if the endpoint could not be reached.
    pub fn is_connect(&self) -> bool {
        matches!(self, TransportError::Connect { .. })
    }

    /// Check if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout(_))
    }
}

/// Issues one request and reads the full response body, blocking until done.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<TransportResponse, TransportError>;
}

/// Blocking reqwest transport bound to a single `host:port`.
///
/// Redirects are not followed: a 3xx answer is handed back as is, so every
/// call is exactly one exchange.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    address: String,
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Create a transport for `http://host:port` without a request timeout.
    pub fn new(host: &str, port: u16) -> Result<Self, TransportError> {
        Self::with_timeout(host, port, None)
    }

    /// Create a transport that gives up on requests after `timeout`.
    ///
    /// `None` disables reqwest's default 30 second limit and waits indefinitely.
    pub fn with_timeout(
        host: &str,
        port: u16,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Init(e.to_string()))?;

        Ok(Self {
            client,
            address: format!("{host}:{port}"),
            timeout,
        })
    }

    /// `host:port` this transport sends to.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Per-request limit, `None` when requests may wait indefinitely.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Build the wire URL for `request`.
    ///
    /// Path and parameters are encoded separately so that reserved characters
    /// in a value (`#`, `&`, `+`) reach the service as data.
    fn url(&self, request: &HttpRequest) -> Result<Url, TransportError> {
        let invalid = |reason: String| TransportError::InvalidTarget {
            target: request.target(),
            reason,
        };

        let mut url =
            Url::parse(&format!("http://{}/", self.address)).map_err(|e| invalid(e.to_string()))?;
        url.set_path(&request.path);
        if !request.parameters.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.parameters);
        }
        Ok(url)
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect {
                address: self.address.clone(),
                reason: err.to_string(),
            }
        } else {
            TransportError::Protocol(err.to_string())
        }
    }
}

fn method(verb: Verb) -> Method {
    match verb {
        Verb::Get => Method::GET,
        Verb::Post => Method::POST,
        Verb::Put => Method::PUT,
        Verb::Patch => Method::PATCH,
        Verb::Delete => Method::DELETE,
        Verb::Head => Method::HEAD,
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<TransportResponse, TransportError> {
        let url = self.url(request)?;

        let mut builder = self.client.request(method(request.verb), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().map_err(|e| self.classify(e))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| self.classify(e))?;

        Ok(TransportResponse { status, body })
    }
}
