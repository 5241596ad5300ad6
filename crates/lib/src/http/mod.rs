//! Authenticated HTTP client.
//!
//! Every call is a single blocking request: the token is injected as the first
//! query parameter, the body is JSON-encoded, the response is decoded with a
//! raw-text fallback, and any failure comes back as an [`HttpResponseError`].
//! There are no retries.
//!
//! # Example
//!
//! ```rust,no_run
//! use precog::http::{HttpClient, RequestOptions, Verb};
//!
//! let client = HttpClient::new("my-token", "api.precog.io", 80, None)?;
//! let children = client.request(Verb::Get, "/vfs/users/", RequestOptions::new())?;
//! println!("{children}");
//! # Ok::<(), precog::HttpResponseError>(())
//! ```

pub mod errors;
pub mod observer;
pub mod request;
pub mod response;
pub mod transport;

use std::{fmt, sync::Arc};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
    Result,
    constants::{API_PATH, JSON_CONTENT_TYPE, TOKEN_ID_PARAM},
};

pub use errors::{HttpResponseError, TRANSPORT_FAILURE_STATUS};
pub use observer::RequestObserver;
pub use request::{HttpRequest, RequestOptions, Verb};
pub use response::{ResponseData, parse_response_body};
pub use transport::{ReqwestTransport, Transport, TransportError, TransportResponse};

const CONTENT_TYPE: &str = "Content-Type";

/// Client bound to one token and one `host:port` endpoint.
///
/// The transport is created once and reused for every call. It is required to
/// be `Send + Sync`, so a client may be shared between threads; each call still
/// issues exactly one request.
pub struct HttpClient {
    token_id: String,
    host: String,
    port: u16,
    path_prefix: String,
    transport: Box<dyn Transport>,
    observer: Option<Arc<dyn RequestObserver>>,
}

impl HttpClient {
    /// Create a client sending through a [`ReqwestTransport`].
    ///
    /// `path_prefix` defaults to `v1`.
    pub fn new(
        token_id: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        path_prefix: Option<&str>,
    ) -> Result<Self> {
        let host = host.into();
        let transport = ReqwestTransport::new(&host, port).map_err(|e| {
            HttpResponseError::transport(format!("connecting to {host}:{port} failed ({e})"), e)
        })?;
        Ok(Self::with_transport(token_id, host, port, path_prefix, transport))
    }

    /// Create a client sending through `transport`.
    pub fn with_transport(
        token_id: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        path_prefix: Option<&str>,
        transport: impl Transport + 'static,
    ) -> Self {
        Self {
            token_id: token_id.into(),
            host: host.into(),
            port,
            path_prefix: path_prefix.unwrap_or(API_PATH).to_string(),
            transport: Box::new(transport),
            observer: None,
        }
    }

    /// Deliver call descriptions to `observer` in addition to `tracing`.
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn token_id(&self) -> &str {
        &self.token_id
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    /// Issue a GET request.
    pub fn get(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(Verb::Get, path, options)
    }

    /// Issue a POST request.
    pub fn post(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(Verb::Post, path, options)
    }

    /// Issue a DELETE request.
    pub fn delete(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(Verb::Delete, path, options)
    }

    /// JSON-encode the body of a `verb` call to `path`.
    ///
    /// # Errors
    ///
    /// Status 500 when `value` has no JSON form, e.g. a map with non-string
    /// keys. The message names the call like every other request error.
    pub fn encode_body<T: Serialize + ?Sized>(
        &self,
        verb: Verb,
        path: &str,
        value: &T,
    ) -> Result<Value> {
        serde_json::to_value(value).map_err(|e| {
            self.failed(HttpResponseError::new(
                format!(
                    "{verb} to {}:{}{}{path} failed to encode body ({e})",
                    self.host, self.port, self.path_prefix
                ),
                TRANSPORT_FAILURE_STATUS,
            ))
        })
    }

    /// Send one request and decode the response.
    ///
    /// The target is `path_prefix + path`, followed by `?tokenId=<token>` and the
    /// caller's parameters in insertion order. `Content-Type: application/json`
    /// replaces any content type the caller set.
    ///
    /// # Errors
    ///
    /// - status 500 if the transport fails or the body cannot be encoded
    /// - the response status for any response other than 200
    ///
    /// A 200 response whose body is not JSON is not an error: the raw text is
    /// returned as a string, see [`parse_response_body`].
    pub fn request(&self, verb: Verb, path: &str, options: RequestOptions) -> Result<Value> {
        let mut request = self.build_request(verb, path, options.headers, options.parameters);

        let mut description = format!(
            "{verb} to {}:{}{} with headers ({})",
            self.host,
            self.port,
            request.target(),
            headers_json(&request.headers)
        );

        if let Some(body) = options.body {
            let encoded = serde_json::to_string(&body).map_err(|e| {
                self.failed(HttpResponseError::new(
                    format!("{description} failed to encode body ({e})"),
                    TRANSPORT_FAILURE_STATUS,
                ))
            })?;
            description.push_str(&format!(" and body ({encoded})"));
            request.body = Some(encoded);
        }

        debug!("{description}");
        if let Some(observer) = &self.observer {
            observer.request_sent(&description);
        }

        let response = self.transport.send(&request).map_err(|e| {
            self.failed(HttpResponseError::transport(
                format!("{description} failed ({e})"),
                e,
            ))
        })?;

        if response.status != 200 {
            return Err(self.failed(HttpResponseError::new(
                format!(
                    "{description} returned non-200 status ({}): {}",
                    response.status, response.body
                ),
                response.status,
            )));
        }

        let data = parse_response_body(&response.body);
        debug!("{description} returned: {data}");
        if let Some(observer) = &self.observer {
            observer.request_completed(&description, &data);
        }

        Ok(data.into_value())
    }

    fn build_request(
        &self,
        verb: Verb,
        path: &str,
        headers: Vec<(String, String)>,
        parameters: Vec<(String, String)>,
    ) -> HttpRequest {
        let mut query = Vec::with_capacity(parameters.len() + 1);
        query.push((TOKEN_ID_PARAM.to_string(), self.token_id.clone()));
        query.extend(parameters);

        // The forced content type always wins over a caller-supplied one.
        let mut headers: Vec<_> = headers
            .into_iter()
            .filter(|(name, _)| !name.eq_ignore_ascii_case(CONTENT_TYPE))
            .collect();
        headers.push((CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string()));

        HttpRequest {
            verb,
            path: format!("{}{}", self.path_prefix, path),
            parameters: query,
            headers,
            body: None,
        }
    }

    fn failed(&self, error: HttpResponseError) -> HttpResponseError {
        warn!(status = error.status_code(), "{}", error.message());
        if let Some(observer) = &self.observer {
            observer.request_failed(&error);
        }
        error
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("path_prefix", &self.path_prefix)
            .finish_non_exhaustive()
    }
}

fn headers_json(headers: &[(String, String)]) -> Value {
    let map: Map<String, Value> = headers
        .iter()
        .map(|(name, value)| (name.clone(), Value::String(value.clone())))
        .collect();
    Value::Object(map)
}
