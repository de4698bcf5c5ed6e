//! `Transport` doubles.
//!
//! Every double counts how often `send` was entered, so tests can assert on
//! transmission attempts independently of what the dispatcher observed.

use acontext_telemetry::{Error, Result, TelemetryEvent, Transport};
use futures::future::{BoxFuture, FutureExt};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Accepts every event and keeps a copy.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events.lock().expect("recording lock poisoned").clone()
    }

    pub fn attempts(&self) -> usize {
        self.events.lock().expect("recording lock poisoned").len()
    }

    /// The only recorded event; panics unless exactly one was sent.
    pub fn single(&self) -> TelemetryEvent {
        let events = self.events();
        assert_eq!(events.len(), 1, "expected exactly one event, got {:?}", events);
        events.into_iter().next().expect("one event")
    }
}

impl Transport for RecordingTransport {
    fn send<'a>(&'a self, event: &'a TelemetryEvent) -> BoxFuture<'a, Result<()>> {
        self.events
            .lock()
            .expect("recording lock poisoned")
            .push(event.clone());
        futures::future::ready(Ok(())).boxed()
    }
}

/// Fails every send as if the collector answered with `status`.
#[derive(Debug)]
pub struct FailingTransport {
    status: u16,
    attempts: AtomicUsize,
}

impl FailingTransport {
    pub fn new(status: u16) -> Arc<Self> {
        Arc::new(Self {
            status,
            attempts: AtomicUsize::new(0),
        })
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Transport for FailingTransport {
    fn send<'a>(&'a self, _event: &'a TelemetryEvent) -> BoxFuture<'a, Result<()>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        futures::future::ready(Err(Error::Rejected(self.status))).boxed()
    }
}

/// Takes `delay` (tokio time) before succeeding, to exercise the ceiling.
#[derive(Debug)]
pub struct StallingTransport {
    delay: Duration,
    attempts: AtomicUsize,
    completed: AtomicBool,
}

impl StallingTransport {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            attempts: AtomicUsize::new(0),
            completed: AtomicBool::new(false),
        })
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Whether a send ran to completion (possibly after the caller left).
    pub fn completed(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }
}

impl Transport for StallingTransport {
    fn send<'a>(&'a self, _event: &'a TelemetryEvent) -> BoxFuture<'a, Result<()>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        async move {
            tokio::time::sleep(self.delay).await;
            self.completed.store(true, Ordering::SeqCst);
            Ok(())
        }
        .boxed()
    }
}

/// Panics inside the send task.
#[derive(Debug, Default)]
pub struct PanickingTransport {
    attempts: AtomicUsize,
}

impl PanickingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Transport for PanickingTransport {
    fn send<'a>(&'a self, _event: &'a TelemetryEvent) -> BoxFuture<'a, Result<()>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        async move { explode() }.boxed()
    }
}

fn explode() -> Result<()> {
    panic!("collector client exploded")
}

/// Parks the send on tokio's blocking pool for `delay` of wall-clock time,
/// the way a stuck DNS lookup does inside the HTTP client.
#[derive(Debug)]
pub struct BlockingTransport {
    delay: Duration,
    attempts: AtomicUsize,
}

impl BlockingTransport {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            attempts: AtomicUsize::new(0),
        })
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Transport for BlockingTransport {
    fn send<'a>(&'a self, _event: &'a TelemetryEvent) -> BoxFuture<'a, Result<()>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let delay = self.delay;
        async move {
            let _ = tokio::task::spawn_blocking(move || std::thread::sleep(delay)).await;
            Ok(())
        }
        .boxed()
    }
}
