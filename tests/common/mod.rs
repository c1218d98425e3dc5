//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use workamajig_api::clients::{HttpRequest, HttpResponse, Transport, TransportError};
use workamajig_api::{AccessToken, UserToken, Workamajig, WorkamajigConfig};

/// Records every request and answers each with the same canned response.
#[derive(Debug)]
pub struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    status: u16,
    headers: HashMap<String, Vec<String>>,
    body: String,
}

impl RecordingTransport {
    pub fn respond(status: u16, body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            status,
            headers: HashMap::from([(
                "request-id".to_string(),
                vec!["req_test".to_string()],
            )]),
            body: body.into(),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests()
            .pop()
            .expect("no request was sent")
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        Ok(HttpResponse::new(
            self.status,
            self.headers.clone(),
            self.body.clone(),
        ))
    }
}

/// Fails every request before a response arrives.
#[derive(Debug)]
pub struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError::Other("connection reset by peer".to_string()))
    }
}

/// Never answers; counts how many in-flight requests were dropped.
#[derive(Debug, Default)]
pub struct HangingTransport {
    started: AtomicUsize,
    aborted: Arc<AtomicUsize>,
}

impl HangingTransport {
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn aborted(&self) -> usize {
        self.aborted.load(Ordering::SeqCst)
    }
}

/// Counts a drop unless disarmed first.
struct AbortGuard {
    aborted: Arc<AtomicUsize>,
    armed: bool,
}

impl AbortGuard {
    fn new(aborted: &Arc<AtomicUsize>) -> Self {
        Self {
            aborted: Arc::clone(aborted),
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for AbortGuard {
    fn drop(&mut self) {
        if self.armed {
            self.aborted.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl Transport for HangingTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let _guard = AbortGuard::new(&self.aborted);
        std::future::pending::<()>().await;
        unreachable!("pending never resolves")
    }
}

/// Answers only after `delay`, with either a response or a transport error.
#[derive(Debug)]
pub struct DelayedTransport {
    delay: Duration,
    outcome: Result<(u16, String), String>,
    started: AtomicUsize,
    delivered: AtomicUsize,
    aborted: Arc<AtomicUsize>,
}

impl DelayedTransport {
    pub fn respond_after(delay: Duration, status: u16, body: impl Into<String>) -> Arc<Self> {
        Self::with_outcome(delay, Ok((status, body.into())))
    }

    pub fn fail_after(delay: Duration, message: impl Into<String>) -> Arc<Self> {
        Self::with_outcome(delay, Err(message.into()))
    }

    fn with_outcome(delay: Duration, outcome: Result<(u16, String), String>) -> Arc<Self> {
        Arc::new(Self {
            delay,
            outcome,
            started: AtomicUsize::new(0),
            delivered: AtomicUsize::new(0),
            aborted: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Requests whose outcome was handed back to the caller.
    pub fn delivered(&self) -> usize {
        self.delivered.load(Ordering::SeqCst)
    }

    pub fn aborted(&self) -> usize {
        self.aborted.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for DelayedTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let guard = AbortGuard::new(&self.aborted);
        tokio::time::sleep(self.delay).await;
        guard.disarm();
        self.delivered.fetch_add(1, Ordering::SeqCst);

        match &self.outcome {
            Ok((status, body)) => Ok(HttpResponse::new(*status, HashMap::new(), body.clone())),
            Err(message) => Err(TransportError::Other(message.clone())),
        }
    }
}

/// A configuration with both tokens set.
pub fn config() -> WorkamajigConfig {
    WorkamajigConfig::builder()
        .access_token(AccessToken::new("AT").unwrap())
        .user_token(UserToken::new("UT").unwrap())
        .build()
        .unwrap()
}

/// A client sending through `transport`.
pub fn client(transport: Arc<dyn Transport>) -> Workamajig {
    Workamajig::with_transport(config(), transport)
}
