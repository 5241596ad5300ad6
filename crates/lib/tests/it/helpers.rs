use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use precog::http::{
    HttpClient, HttpRequest, HttpResponseError, RequestObserver, ResponseData, Transport,
    TransportError, TransportResponse,
};

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_HOST: &str = "localhost";
pub const TEST_PORT: u16 = 8080;

// ==========================
// MOCK TRANSPORT
// ==========================

enum Reply {
    Response(TransportResponse),
    Failure(TransportError),
}

#[derive(Default)]
struct MockState {
    requests: Mutex<Vec<HttpRequest>>,
    replies: Mutex<VecDeque<Reply>>,
}

/// Transport that records every request and answers from a queue of scripted replies.
///
/// When the queue is empty it answers `200 {}`. Clones share the same state, so a
/// test can keep one handle while the client owns another.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<MockState>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.state
            .replies
            .lock()
            .unwrap()
            .push_back(Reply::Response(TransportResponse::new(status, body)));
        self
    }

    /// Queue a transport failure.
    pub fn fail(&self, error: TransportError) -> &Self {
        self.state
            .replies
            .lock()
            .unwrap()
            .push_back(Reply::Failure(error));
        self
    }

    /// All requests sent so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// The only request sent so far (panics unless exactly one was sent).
    pub fn single_request(&self) -> HttpRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &HttpRequest) -> Result<TransportResponse, TransportError> {
        self.state.requests.lock().unwrap().push(request.clone());
        match self.state.replies.lock().unwrap().pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(error)) => Err(error),
            None => Ok(TransportResponse::new(200, "{}")),
        }
    }
}

/// HttpClient for the test endpoint, sending through `transport`.
pub fn mock_http_client(transport: &MockTransport) -> HttpClient {
    HttpClient::with_transport(TEST_TOKEN, TEST_HOST, TEST_PORT, None, transport.clone())
}

pub fn connection_refused() -> TransportError {
    TransportError::Connect {
        address: format!("{TEST_HOST}:{TEST_PORT}"),
        reason: "connection refused".to_string(),
    }
}

// ==========================
// RECORDING OBSERVER
// ==========================

/// Event captured by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq)]
pub enum Observed {
    Sent(String),
    Completed(String, ResponseData),
    Failed(u16),
}

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Observed>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<Observed> {
        self.events.lock().unwrap().clone()
    }
}

impl RequestObserver for RecordingObserver {
    fn request_sent(&self, description: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Observed::Sent(description.to_string()));
    }

    fn request_completed(&self, description: &str, data: &ResponseData) {
        self.events
            .lock()
            .unwrap()
            .push(Observed::Completed(description.to_string(), data.clone()));
    }

    fn request_failed(&self, error: &HttpResponseError) {
        self.events
            .lock()
            .unwrap()
            .push(Observed::Failed(error.status_code()));
    }
}
