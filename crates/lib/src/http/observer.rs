//! Optional request observer.
//!
//! An [`HttpClient`](super::HttpClient) always logs through `tracing`. Callers
//! that want the call descriptions delivered somewhere else inject a
//! [`RequestObserver`] at construction.

use super::{errors::HttpResponseError, response::ResponseData};

/// Receives a description of every call the client makes.
///
/// All methods default to doing nothing.
pub trait RequestObserver: Send + Sync {
    /// Called right before the request is handed to the transport.
    fn request_sent(&self, _description: &str) {}

    /// Called after a 200 response has been decoded.
    fn request_completed(&self, _description: &str, _data: &ResponseData) {}

    /// Called when the call ends in an error.
    fn request_failed(&self, _error: &HttpResponseError) {}
}
