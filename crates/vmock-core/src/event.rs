//! Broker events and the pending-event queue.
//!
//! # Lifecycle
//!
//! Events are produced by the broker's subscription bridge, appended to the
//! engine's [`PendingEvents`] at the start of a tick, and consumed exactly
//! once by the first event trigger whose kind and path match.  Unmatched
//! events persist until matched or the process ends — there is no TTL.  A
//! declaration bug (mismatched path or kind) therefore accumulates entries
//! forever; [`PendingEvents::len`] exists so the engine can at least warn
//! about a growing backlog.

use std::fmt;

use crate::Value;

// ── EventKind ─────────────────────────────────────────────────────────────────

/// The two subscription channels of the external broker.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// A new target value was requested for an actuator.
    ActuatorTarget,
    /// The current value of a datapoint changed.
    Value,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::ActuatorTarget => write!(f, "actuator_target"),
            EventKind::Value => write!(f, "value"),
        }
    }
}

// ── Event ─────────────────────────────────────────────────────────────────────

/// A single update received from the broker.  Immutable once constructed.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub kind: EventKind,
    pub path: String,
    pub value: Value,
}

impl Event {
    pub fn new(kind: EventKind, path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            kind,
            path: path.into(),
            value: value.into(),
        }
    }
}

// ── PendingEvents ─────────────────────────────────────────────────────────────

/// Insertion-ordered queue of events awaiting a matching trigger.
///
/// Owned exclusively by the engine loop; the subscription bridge hands
/// events over via a channel, never by touching this structure directly.
#[derive(Default, Debug)]
pub struct PendingEvents {
    inner: Vec<Event>,
}

impl PendingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event at the back of the queue.
    pub fn push(&mut self, event: Event) {
        self.inner.push(event);
    }

    /// Remove and return the earliest-inserted event matching both `kind`
    /// and `path`.  At most one event is consumed per call; non-matching
    /// events are left untouched in their original order.
    pub fn take_matching(&mut self, kind: EventKind, path: &str) -> Option<Event> {
        let idx = self
            .inner
            .iter()
            .position(|e| e.kind == kind && e.path == path)?;
        Some(self.inner.remove(idx))
    }

    /// Non-destructive view, in insertion order.  Conditions may inspect
    /// the queue but only a trigger's check consumes from it.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
