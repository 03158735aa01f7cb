//! Mock paste backend for integration tests.
//!
//! Runs an axum router on a loopback ephemeral port in a background thread
//! with its own runtime, and records every create request it receives.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use quickpaste_client::{spawn_backend, HttpPasteApi, PasteSession};
use quickpaste_core::Config;
use std::net::{SocketAddr, TcpListener};
use std::sync::{mpsc, Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

pub const CATALOG_BODY: &str = r#"[
    {"Language":"none","Name":"Plain Text"},
    {"Language":"rust","Name":"Rust"},
    {"Language":"python","Name":"Python"}
]"#;

#[derive(Clone, Debug)]
pub struct MockBehavior {
    pub langs_status: u16,
    pub langs_body: String,
    pub create_status: u16,
    pub create_body: String,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            langs_status: 200,
            langs_body: CATALOG_BODY.to_string(),
            create_status: 200,
            create_body: "abc123".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct MockState {
    behavior: Arc<MockBehavior>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).expect("valid status code")
}

async fn langs(State(state): State<MockState>) -> (StatusCode, String) {
    (
        status(state.behavior.langs_status),
        state.behavior.langs_body.clone(),
    )
}

async fn create(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
    state
        .requests
        .lock()
        .expect("requests lock")
        .push(RecordedRequest { content_type, body });
    (
        status(state.behavior.create_status),
        state.behavior.create_body.clone(),
    )
}

pub struct MockBackend {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl MockBackend {
    pub fn start(behavior: MockBehavior) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            behavior: Arc::new(behavior),
            requests: requests.clone(),
        };
        let app = Router::new()
            .route("/langs", get(langs))
            .route("/p-create", post(create))
            .with_state(state);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let thread = thread::Builder::new()
            .name("quickpaste-mock-backend".into())
            .spawn(move || {
                let rt = tokio::runtime::Builder::new_multi_thread()
                    .worker_threads(1)
                    .enable_all()
                    .build()
                    .expect("mock runtime");
                let listener = rt
                    .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
                    .expect("bind mock backend");
                ready_tx
                    .send(listener.local_addr().expect("mock addr"))
                    .expect("report addr");
                let shutdown = async move {
                    let _ = shutdown_rx.await;
                };
                rt.block_on(async move {
                    axum::serve(listener, app)
                        .with_graceful_shutdown(shutdown)
                        .await
                        .expect("mock backend serve");
                });
            })
            .expect("spawn mock backend");

        let addr = ready_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("mock backend ready");
        Self {
            addr,
            requests,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// URL of a loopback port with nothing listening on it.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{}", addr)
}

pub fn test_config(server_url: &str) -> Config {
    Config {
        server_url: server_url.to_string(),
        site_url: None,
        request_timeout_secs: 5,
    }
}

/// Mount a session against `server_url` and wait for the catalog to settle.
pub fn mount_session(server_url: &str) -> PasteSession {
    let api = HttpPasteApi::new(&test_config(server_url)).expect("http api");
    let backend = spawn_backend(api).expect("spawn backend");
    let mut session = PasteSession::mount(backend).expect("mount session");
    settle(&mut session);
    session
}

/// Wait until the session is no longer waiting on the worker.
pub fn settle(session: &mut PasteSession) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while session.is_pending() {
        assert!(Instant::now() < deadline, "session did not settle in time");
        session.wait_for_event(Duration::from_millis(100));
    }
}
