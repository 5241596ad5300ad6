//! High-level Precog operations.
//!
//! [`Precog`] wraps an [`HttpClient`] and exposes one method per service
//! operation. Each method builds its path, issues exactly one request and
//! returns whatever the client returns.

use std::{sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{
    Clock, Result, SystemClock,
    auth::Token,
    constants::{API_HOST, API_PATH, API_PORT, TOKENS_PATH},
    http::{HttpClient, HttpResponseError, ReqwestTransport, RequestOptions, Verb},
    path::vfs_path,
};

/// Connection settings for a [`Precog`] client.
///
/// Missing fields fall back to the public API endpoint when deserialized.
///
/// ```rust
/// use precog::ClientConfig;
///
/// let config: ClientConfig = serde_json::from_str(r#"{"token_id": "abc"}"#)?;
/// assert_eq!(config.host, "api.precog.io");
/// assert_eq!(config.port, 80);
/// assert_eq!(config.path_prefix, "v1");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub token_id: String,
    pub host: String,
    pub port: u16,
    pub path_prefix: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Settings for the public API endpoint.
    pub fn new(token_id: impl Into<String>) -> Self {
        Self {
            token_id: token_id.into(),
            ..Self::default()
        }
    }

    pub fn with_endpoint(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    pub fn with_path_prefix(mut self, path_prefix: impl Into<String>) -> Self {
        self.path_prefix = path_prefix.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token_id: String::new(),
            host: API_HOST.to_string(),
            port: API_PORT,
            path_prefix: API_PATH.to_string(),
            timeout: None,
        }
    }
}

/// Client for the Precog storage and query API.
///
/// # Example
///
/// ```rust,no_run
/// use precog::{Precog, auth::Token};
/// use serde_json::json;
///
/// let precog = Precog::new("my-token")?;
/// precog.store("users/alice", &json!({"age": 31}))?;
/// let count = precog.query("users", "count(//alice)")?;
/// let token = precog.create_token(&Token::readonly("/users/"))?;
/// # Ok::<(), precog::HttpResponseError>(())
/// ```
#[derive(Debug)]
pub struct Precog {
    api: HttpClient,
    clock: Arc<dyn Clock>,
}

impl Precog {
    /// Client for the public API endpoint.
    pub fn new(token_id: impl Into<String>) -> Result<Self> {
        Self::from_config(&ClientConfig::new(token_id))
    }

    /// Client for the endpoint described by `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(&config.host, config.port, config.timeout)
            .map_err(|e| {
                HttpResponseError::transport(
                    format!("connecting to {}:{} failed ({e})", config.host, config.port),
                    e,
                )
            })?;
        let api = HttpClient::with_transport(
            config.token_id.clone(),
            config.host.clone(),
            config.port,
            Some(config.path_prefix.as_str()),
            transport,
        );
        Ok(Self::with_client(api))
    }

    /// Wrap an already configured client.
    pub fn with_client(api: HttpClient) -> Self {
        Self {
            api,
            clock: Arc::new(SystemClock),
        }
    }

    /// Evaluate token expiry against `clock` instead of the system time.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The underlying HTTP client.
    pub fn api(&self) -> &HttpClient {
        &self.api
    }

    /// Create a new token.
    pub fn create_token(&self, token: &Token) -> Result<Value> {
        let body = self
            .api
            .encode_body(Verb::Post, TOKENS_PATH, &token.to_request(self.clock.now()))?;
        debug!("creating token {body}");
        self.api.post(TOKENS_PATH, RequestOptions::new().body(body))
    }

    /// Return information about the current token.
    pub fn get_token(&self) -> Result<Value> {
        self.api.get(TOKENS_PATH, RequestOptions::new())
    }

    /// Delete the token with the given identifier.
    pub fn delete_token(&self, token_id: &str) -> Result<Value> {
        self.api
            .delete(TOKENS_PATH, RequestOptions::new().parameter("delete", token_id))
    }

    /// Store a record at the specified path.
    pub fn store<T: Serialize + ?Sized>(&self, path: &str, record: &T) -> Result<Value> {
        let path = vfs_path(path);
        let body = self.api.encode_body(Verb::Post, &path, record)?;
        self.api.post(&path, RequestOptions::new().body(body))
    }

    /// Evaluate a query relative to the specified base path.
    pub fn query(&self, path: &str, query: &str) -> Result<Value> {
        self.api
            .get(&vfs_path(path), RequestOptions::new().parameter("q", query))
    }

    /// Explore the specified path to determine its children.
    pub fn list_children(&self, path: &str) -> Result<Value> {
        self.api.get(&vfs_path(path), RequestOptions::new())
    }
}
