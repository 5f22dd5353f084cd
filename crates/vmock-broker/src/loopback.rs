//! `LoopbackBroker` — an in-memory [`DataBroker`] for tests and demos.
//!
//! Holds metadata and published values in process memory and lets a test
//! inject actuator-target or value events as if they arrived from a real
//! data source.  The handle is cheaply clonable: keep one clone for
//! injection/inspection and give the other to the engine.

use std::sync::{Arc, Mutex, MutexGuard};

use crossbeam_channel::Sender;
use rustc_hash::FxHashMap;
use tracing::debug;

use vmock_core::{Event, EventKind, Value};

use crate::{BrokerError, BrokerResult, DataBroker, Metadata};

struct Subscription {
    paths: Vec<String>,
    sender: Sender<Event>,
}

#[derive(Default)]
struct Inner {
    metadata: FxHashMap<String, Metadata>,
    published: FxHashMap<String, Value>,
    /// Every `publish` call in order, including writes of an unchanged value.
    publish_log: Vec<(String, Value)>,
    subscriptions: Vec<Subscription>,
    connected: bool,
}

/// Cheaply clonable in-memory broker.
#[derive(Clone)]
pub struct LoopbackBroker {
    inner: Arc<Mutex<Inner>>,
}

impl LoopbackBroker {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                connected: true,
                ..Inner::default()
            })),
        }
    }

    pub fn with_metadata(metadata: impl IntoIterator<Item = Metadata>) -> Self {
        let broker = Self::new();
        {
            let mut inner = broker.lock();
            for m in metadata {
                inner.metadata.insert(m.path.clone(), m);
            }
        }
        broker
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means a panicking test; the data is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Flip the "still connected" signal seen by the engine loop.
    pub fn set_connected(&self, connected: bool) {
        self.lock().connected = connected;
    }

    /// Deliver an actuator-target event to every subscriber of `path`.
    pub fn inject_actuator_target(&self, path: &str, value: impl Into<Value>) {
        self.inject(EventKind::ActuatorTarget, path, value.into());
    }

    /// Deliver a current-value event to every subscriber of `path`.
    pub fn inject_value(&self, path: &str, value: impl Into<Value>) {
        self.inject(EventKind::Value, path, value.into());
    }

    fn inject(&self, kind: EventKind, path: &str, value: Value) {
        let inner = self.lock();
        for sub in &inner.subscriptions {
            if sub.paths.iter().any(|p| p == path) {
                debug!(%kind, path, %value, "loopback: delivering event");
                // A dropped receiver just means the engine is gone.
                let _ = sub.sender.send(Event::new(kind, path, value.clone()));
            }
        }
    }

    /// The most recently published value for `path`, if any.
    pub fn published(&self, path: &str) -> Option<Value> {
        self.lock().published.get(path).cloned()
    }

    /// Every `publish` call so far, in order.
    pub fn publish_log(&self) -> Vec<(String, Value)> {
        self.lock().publish_log.clone()
    }
}

impl Default for LoopbackBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl DataBroker for LoopbackBroker {
    fn metadata(&self, paths: &[String]) -> BrokerResult<Vec<Metadata>> {
        let inner = self.lock();
        if !inner.connected {
            return Err(BrokerError::ConnectionLost("loopback disconnected".into()));
        }
        Ok(paths
            .iter()
            .filter_map(|p| inner.metadata.get(p).cloned())
            .collect())
    }

    fn subscribe(&mut self, paths: &[String], events: Sender<Event>) -> BrokerResult<()> {
        let mut inner = self.lock();
        if !inner.connected {
            return Err(BrokerError::ConnectionLost("loopback disconnected".into()));
        }
        inner.subscriptions.push(Subscription {
            paths: paths.to_vec(),
            sender: events,
        });
        Ok(())
    }

    fn publish(&mut self, path: &str, value: Value) -> BrokerResult<()> {
        let mut inner = self.lock();
        if !inner.connected {
            return Err(BrokerError::ConnectionLost("loopback disconnected".into()));
        }
        if !inner.metadata.contains_key(path) {
            return Err(BrokerError::UnknownPath(path.to_string()));
        }
        inner.published.insert(path.to_string(), value.clone());
        inner.publish_log.push((path.to_string(), value));
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.lock().connected
    }
}
