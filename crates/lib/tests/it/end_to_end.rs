//! Tests driving the reqwest transport against a local axum server.
//!
//! The server runs on its own tokio runtime in a background thread so the
//! blocking client can be used from the test thread.

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    thread::JoinHandle,
    time::Duration,
};

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header::LOCATION},
    response::{IntoResponse, Response},
};
use precog::{ClientConfig, Precog, auth::Token};
use serde_json::json;
use tokio::sync::oneshot;

/// Request as seen by the server.
#[derive(Debug, Clone)]
struct Received {
    method: Method,
    path: String,
    query: Option<String>,
    content_type: Option<String>,
    body: String,
}

impl Received {
    /// Decoded query parameters in wire order.
    fn params(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.query.as_deref().unwrap_or_default().as_bytes())
            .into_owned()
            .collect()
    }
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

type Log = Arc<Mutex<Vec<Received>>>;

struct TestServer {
    addr: SocketAddr,
    log: Log,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    fn start() -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind test server");
        listener
            .set_nonblocking(true)
            .expect("nonblocking listener");
        let addr = listener.local_addr().expect("local address");

        let log: Log = Arc::default();
        let router = Router::new().fallback(handle).with_state(log.clone());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .expect("test runtime");
            runtime.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("tokio listener");
                axum::serve(listener, router)
                    .with_graceful_shutdown(async move {
                        let _ = shutdown_rx.await;
                    })
                    .await
                    .expect("test server");
            });
        });

        Self {
            addr,
            log,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    fn config(&self) -> ClientConfig {
        ClientConfig::new("e2e-token").with_endpoint("127.0.0.1", self.addr.port())
    }

    fn precog(&self) -> Precog {
        Precog::from_config(&self.config()).expect("client")
    }

    fn received(&self) -> Vec<Received> {
        self.log.lock().unwrap().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Minimal stand-in for the service: stores succeed, queries count, listing
/// returns children, token lookup returns bare text, `moved` redirects, `slow`
/// stalls, `echo` returns the decoded `q` parameter, anything else is 404.
async fn handle(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    let query = uri.query().map(str::to_string);
    log.lock().unwrap().push(Received {
        method: method.clone(),
        path: path.clone(),
        query: query.clone(),
        content_type: headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let q = url::form_urlencoded::parse(query.as_deref().unwrap_or_default().as_bytes())
        .find(|(name, _)| name == "q")
        .map(|(_, value)| value.into_owned());
    match (method, path.as_str()) {
        (_, p) if p.starts_with("/v1/vfs/moved") => {
            (StatusCode::FOUND, [(LOCATION, "/v1/vfs/users/")], "moved").into_response()
        }
        (_, "/v1/vfs/slow") => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            (StatusCode::OK, "late").into_response()
        }
        (Method::GET, "/v1/vfs/echo") => {
            (StatusCode::OK, serde_json::to_string(&q).unwrap_or_default()).into_response()
        }
        (Method::POST, p) if p.starts_with("/v1/vfs/") => {
            (StatusCode::OK, r#"{"stored": 1}"#).into_response()
        }
        (Method::POST, "/v1/auth/tokens") => (StatusCode::OK, r#""tok-42""#).into_response(),
        (Method::GET, "/v1/vfs/users") if q.is_some() => (StatusCode::OK, "3").into_response(),
        (Method::GET, "/v1/vfs/users/") => {
            (StatusCode::OK, r#"["alice", "bob"]"#).into_response()
        }
        (Method::GET, "/v1/auth/tokens") => (StatusCode::OK, "plain text").into_response(),
        _ => (StatusCode::NOT_FOUND, "no such path").into_response(),
    }
}

#[test]
fn store_and_query_round_trip_over_http() {
    let server = TestServer::start();
    let precog = server.precog();

    let stored = precog.store("users//alice", &json!({"age": 31})).unwrap();
    assert_eq!(stored, json!({"stored": 1}));

    let count = precog.query("users", "count(//users)").unwrap();
    assert_eq!(count, json!(3));

    let received = server.received();
    assert_eq!(received.len(), 2);

    assert_eq!(received[0].method, Method::POST);
    assert_eq!(received[0].path, "/v1/vfs/users/alice");
    assert_eq!(received[0].params(), pairs(&[("tokenId", "e2e-token")]));
    assert_eq!(received[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(received[0].body, r#"{"age":31}"#);

    assert_eq!(received[1].method, Method::GET);
    assert_eq!(
        received[1].params(),
        pairs(&[("tokenId", "e2e-token"), ("q", "count(//users)")])
    );
    assert!(received[1].body.is_empty());
}

#[test]
fn list_children_and_token_calls_over_http() {
    let server = TestServer::start();
    let precog = server.precog();

    assert_eq!(
        precog.list_children("users/").unwrap(),
        json!(["alice", "bob"])
    );
    assert_eq!(precog.get_token().unwrap(), json!("plain text"));
    assert_eq!(
        precog.create_token(&Token::readonly("/users/")).unwrap(),
        json!("tok-42")
    );

    let received = server.received();
    let token_body: serde_json::Value = serde_json::from_str(&received[2].body).unwrap();
    assert_eq!(token_body["permissions"]["path"][0]["pathSpec"]["subtree"], "/users/");
    assert_eq!(token_body["expired"], false);
}

#[test]
fn unknown_path_reports_404_over_http() {
    let server = TestServer::start();
    let precog = server.precog();

    let err = precog.delete_token("t-1").unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert!(err.message().contains("no such path"));

    let received = server.received();
    assert_eq!(received[0].method, Method::DELETE);
    assert_eq!(
        received[0].params(),
        pairs(&[("tokenId", "e2e-token"), ("delete", "t-1")])
    );
}

#[test]
fn refused_connection_reports_500() {
    // Bind and release a port so nothing is listening on it.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = ClientConfig::new("e2e-token").with_endpoint("127.0.0.1", port);
    let precog = Precog::from_config(&config).unwrap();

    let err = precog.list_children("users").unwrap_err();
    assert_eq!(err.status_code(), 500);
    assert!(err.is_transport_failure());
    assert!(err.message().starts_with(&format!("GET to 127.0.0.1:{port}v1/vfs/users")));
}

#[test]
fn redirect_is_reported_not_followed() {
    let server = TestServer::start();
    let precog = server.precog();

    let err = precog.list_children("moved").unwrap_err();
    assert_eq!(err.status_code(), 302);
    assert!(!err.is_transport_failure());
    assert!(err.message().contains("non-200 status (302)"));

    let err = precog.store("moved/here", &json!({"a": 1})).unwrap_err();
    assert_eq!(err.status_code(), 302);

    let received = server.received();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].method, Method::GET);
    assert_eq!(received[0].path, "/v1/vfs/moved");
    assert_eq!(received[1].method, Method::POST);
    assert_eq!(received[1].path, "/v1/vfs/moved/here");
}

#[test]
fn reserved_characters_in_a_query_reach_the_service() {
    let server = TestServer::start();
    let precog = server.precog();

    let query = r##"//a where x = "#1" & y+z = 50%"##;
    let echoed = precog.query("echo", query).unwrap();
    assert_eq!(echoed, json!(query));

    let received = server.received();
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0].params(),
        pairs(&[("tokenId", "e2e-token"), ("q", query)])
    );
}

#[test]
fn configured_timeout_reports_500() {
    let server = TestServer::start();
    let config = server.config().with_timeout(Duration::from_millis(200));
    let precog = Precog::from_config(&config).unwrap();

    let err = precog.list_children("slow").unwrap_err();
    assert_eq!(err.status_code(), 500);
    assert!(err.is_transport_failure());
    let expected = format!("GET to 127.0.0.1:{}v1/vfs/slow", server.addr.port());
    assert!(err.message().starts_with(&expected), "{}", err.message());
}
