// Common utilities for unit tests

use startdeliver::prelude::*;
use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;
use tracing::subscriber::DefaultGuard;

/// Transport that records every request and replays queued outcomes
///
/// When the queue is empty it answers `200 {}`.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<TransportRequest>>,
    outcomes: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_response(&self, response: TransportResponse) {
        self.outcomes.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_error(&self, error: TransportError) {
        self.outcomes.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> TransportRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(TransportResponse::new(200, json!({}))))
    }
}

/// Creates a client on top of a fresh recording transport
pub fn client_with(settings: impl Into<Settings>) -> (Client, Arc<RecordingTransport>) {
    let transport = RecordingTransport::new();
    let client = Client::with_transport(settings, transport.clone());
    (client, transport)
}

/// Decodes the `query` parameter of a recorded URL
pub fn decode_query(url: &str) -> Value {
    let (_, encoded) = url.split_once("?query=").expect("url has no query");
    let decoded = urlencoding::decode(encoded).expect("query is not valid UTF-8");
    serde_json::from_str(&decoded).expect("query is not JSON")
}

/// In-memory sink for the log lines written on the current thread
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Installs a thread-local subscriber writing into a fresh capture
    ///
    /// Logs are captured until the returned guard is dropped.
    pub fn install() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Number of captured lines logged at `ERROR` level
    pub fn error_lines(&self) -> usize {
        self.contents()
            .lines()
            .filter(|line| line.contains(" ERROR "))
            .count()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
