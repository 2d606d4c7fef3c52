//! Deferred work.
//!
//! `load-json` hands the console a [`DeferredOp`]; the [`TaskRunner`] runs
//! the fetch on a worker thread and queues the settled result. The console
//! drains the queue on its own thread (on every tick), so widget state and
//! the scrollback keep a single writer. Results arrive in completion order,
//! and nothing is cancelled: two overlapping loads both settle, and the last
//! one applied wins.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use serde_json::Value;
use web_time::Instant;

use crate::error::LoadError;
use crate::outcome::DeferredOp;

/// Fetches the body behind a URL.
pub trait RemoteLoader: fmt::Debug + Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, LoadError>;
}

/// Reads local files; accepts plain paths and `file://` URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl RemoteLoader for FileLoader {
    fn fetch(&self, url: &str) -> Result<String, LoadError> {
        let path = PathBuf::from(url.strip_prefix("file://").unwrap_or(url));
        std::fs::read_to_string(&path).map_err(|source| LoadError::Io { path, source })
    }
}

/// Serves fixed bodies by URL.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    bodies: BTreeMap<String, String>,
}

impl MemoryLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }
}

impl RemoteLoader for MemoryLoader {
    fn fetch(&self, url: &str) -> Result<String, LoadError> {
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(url.to_owned()))
    }
}

/// Refuses every URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableLoader;

impl RemoteLoader for UnavailableLoader {
    fn fetch(&self, url: &str) -> Result<String, LoadError> {
        Err(LoadError::Unsupported(url.to_owned()))
    }
}

/// A finished load.
#[derive(Debug)]
pub struct Settled {
    pub url: String,
    pub result: Result<Value, LoadError>,
}

/// Runs deferred operations off the event path.
#[derive(Debug)]
pub struct TaskRunner {
    loader: Arc<dyn RemoteLoader>,
    tx: Sender<Settled>,
    rx: Receiver<Settled>,
    outstanding: usize,
}

impl TaskRunner {
    #[must_use]
    pub fn new(loader: Arc<dyn RemoteLoader>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            loader,
            tx,
            rx,
            outstanding: 0,
        }
    }

    /// Operations issued but not yet drained.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Start `op` on a worker thread.
    pub fn spawn(&mut self, op: DeferredOp) {
        let DeferredOp::LoadDashboard { url } = op;
        tracing::debug!(target: "dterm.tasks", url = %url, "load issued");
        let loader = Arc::clone(&self.loader);
        let tx = self.tx.clone();
        let fallback = self.tx.clone();
        let task_url = url.clone();
        let spawned = thread::Builder::new()
            .name("dterm-load".into())
            .spawn(move || {
                let result = loader
                    .fetch(&task_url)
                    .and_then(|body| serde_json::from_str::<Value>(&body).map_err(LoadError::from));
                // The receiver only goes away with the runner itself.
                let _ = tx.send(Settled {
                    url: task_url,
                    result,
                });
            });
        self.outstanding += 1;
        if let Err(err) = spawned {
            tracing::warn!(target: "dterm.tasks", url = %url, error = %err, "load worker not started");
            let _ = fallback.send(Settled {
                url,
                result: Err(LoadError::Disconnected),
            });
        }
    }

    /// Collect whatever has settled, without blocking.
    pub fn try_drain(&mut self) -> Vec<Settled> {
        let mut done = Vec::new();
        while let Ok(settled) = self.rx.try_recv() {
            done.push(settled);
        }
        self.settle(done)
    }

    /// Block until every outstanding operation settles or `timeout` passes.
    pub fn wait(&mut self, timeout: Duration) -> Vec<Settled> {
        let deadline = Instant::now() + timeout;
        let mut done = Vec::new();
        while done.len() < self.outstanding {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(settled) => done.push(settled),
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => break,
            }
        }
        self.settle(done)
    }

    fn settle(&mut self, done: Vec<Settled>) -> Vec<Settled> {
        self.outstanding = self.outstanding.saturating_sub(done.len());
        for s in &done {
            tracing::debug!(target: "dterm.tasks", url = %s.url, ok = s.result.is_ok(), "load settled");
        }
        done
    }
}
