//! Scripted in-memory transport for unit tests.
use crate::{
    CloudWatchClient,
    time::Clock,
    transport::{HttpRequest, HttpResponse, Transport, TransportFuture},
};
use serde_json::Value;
use std::{
    collections::VecDeque,
    io,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

enum Scripted {
    Respond { status: u16, body: Vec<u8> },
    Fail(String),
}

/// Answers requests from a queue of scripted responses and records every request it sees.
pub(crate) struct MockTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<RecordedRequest>>,
    responses: AtomicUsize,
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Value,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            responses: AtomicUsize::new(0),
        })
    }

    pub fn respond_ok(&self, body: Value) {
        self.respond(200, body);
    }

    pub fn respond(&self, status: u16, body: Value) {
        self.respond_raw(status, &serde_json::to_vec(&body).unwrap());
    }

    pub fn respond_raw(&self, status: u16, body: &[u8]) {
        self.script.lock().unwrap().push_back(Scripted::Respond {
            status,
            body: body.to_vec(),
        });
    }

    pub fn fail(&self, message: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Fail(message.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
        let body = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        self.requests.lock().unwrap().push(RecordedRequest {
            url: request.url,
            headers: request.headers,
            body,
        });
        let next = self.script.lock().unwrap().pop_front();
        let n = self.responses.fetch_add(1, Ordering::Relaxed) + 1;

        Box::pin(async move {
            match next {
                Some(Scripted::Respond { status, body }) => Ok(HttpResponse {
                    status,
                    request_id: Some(format!("mock-request-{n}")),
                    error_type: None,
                    body,
                }),
                Some(Scripted::Fail(message)) => Err(message.into()),
                None => Err("no scripted response left".into()),
            }
        })
    }
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn target(&self) -> &str {
        self.header("x-amz-target").unwrap_or_default()
    }
}

pub(crate) fn test_client(transport: &Arc<MockTransport>) -> CloudWatchClient {
    CloudWatchClient::builder()
        .region("us-east-1")
        .access_key_id("AKIDEXAMPLE")
        .secret_access_key("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
        .transport(transport.clone())
        .build()
        .unwrap()
}

pub(crate) fn test_client_with_clock(
    transport: &Arc<MockTransport>,
    clock: impl Clock,
) -> CloudWatchClient {
    CloudWatchClient::builder()
        .region("us-east-1")
        .access_key_id("AKIDEXAMPLE")
        .secret_access_key("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
        .transport(transport.clone())
        .clock(clock)
        .build()
        .unwrap()
}

/// Formatted tracing output captured on the current thread.
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Route events on the current thread into a fresh buffer until the guard is dropped.
    ///
    /// Only works with the current-thread runtime of `#[tokio::test]`.
    pub fn start() -> (Self, tracing::subscriber::DefaultGuard) {
        let logs = Self::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        (logs, tracing::subscriber::set_default(subscriber))
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn lines_at(&self, level: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(level))
            .map(str::to_owned)
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
