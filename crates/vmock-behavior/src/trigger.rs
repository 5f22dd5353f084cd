//! Triggers — the stateful predicates that activate behaviors.
//!
//! A trigger activates at most once per satisfied condition per tick cycle.
//! Clock triggers are the only ones with a terminal state (`expired` after
//! a one-shot fires); event triggers re-arm on every check and simply scan
//! the pending queue afresh.

use vmock_core::{Event, EventKind};

use crate::context::ExecutionContext;

/// How a trigger fired.  Event activations carry the consumed event so the
/// action can resolve `$event.value` against it.
#[derive(Clone, PartialEq, Debug)]
pub enum TriggerFired {
    Clock,
    Event(Event),
}

impl TriggerFired {
    /// The consumed event, if this was an event activation.
    pub fn event(&self) -> Option<&Event> {
        match self {
            TriggerFired::Event(e) => Some(e),
            TriggerFired::Clock => None,
        }
    }
}

// ── Trigger ───────────────────────────────────────────────────────────────────

/// A behavior's activation source, matched exhaustively by the executor.
#[derive(Debug)]
pub enum Trigger {
    Clock(ClockTrigger),
    Event(EventTrigger),
}

impl Trigger {
    /// One-shot clock trigger: fires once after `interval_sec`, never again.
    pub fn clock(interval_sec: f64) -> Self {
        Trigger::Clock(ClockTrigger::new(interval_sec, false))
    }

    /// Recurring clock trigger: fires every `interval_sec`.
    pub fn every(interval_sec: f64) -> Self {
        Trigger::Clock(ClockTrigger::new(interval_sec, true))
    }

    /// Event trigger bound to the owning datapoint's own path.
    pub fn on_event(kind: EventKind) -> Self {
        Trigger::Event(EventTrigger::new(kind))
    }

    /// Event trigger bound to an explicit path.
    pub fn on_event_at(kind: EventKind, path: impl Into<String>) -> Self {
        Trigger::Event(EventTrigger::at_path(kind, path))
    }

    /// Check for activation this tick.
    pub fn check(&mut self, ctx: &mut ExecutionContext<'_>) -> Option<TriggerFired> {
        match self {
            Trigger::Clock(t) => t.check(ctx.delta_time).then_some(TriggerFired::Clock),
            Trigger::Event(t) => t.check(ctx).map(TriggerFired::Event),
        }
    }

    /// `true` if the trigger can activate more than once over its lifetime.
    pub fn is_recurring(&self) -> bool {
        match self {
            Trigger::Clock(t) => t.recurring,
            Trigger::Event(_) => true,
        }
    }
}

// ── ClockTrigger ──────────────────────────────────────────────────────────────

/// Time-based trigger counting down against delta-time.
#[derive(Clone, Debug)]
pub struct ClockTrigger {
    pub interval_sec: f64,
    pub recurring: bool,
    time_left: f64,
    expired: bool,
}

impl ClockTrigger {
    pub fn new(interval_sec: f64, recurring: bool) -> Self {
        Self {
            interval_sec,
            recurring,
            time_left: interval_sec,
            expired: false,
        }
    }

    /// Advance by `delta_time`; `true` when the interval elapsed this tick.
    ///
    /// Recurring triggers carry the negative remainder into the next
    /// interval (`time_left = interval - time_left`), so phase is preserved
    /// even when ticks drift past the boundary.  A one-shot trigger's first
    /// activation is terminal.
    pub fn check(&mut self, delta_time: f64) -> bool {
        if self.expired {
            return false;
        }
        self.time_left -= delta_time;
        if self.time_left > 0.0 {
            return false;
        }
        if self.recurring {
            self.time_left = self.interval_sec - self.time_left;
        } else {
            self.time_left = 0.0;
            self.expired = true;
        }
        true
    }

    /// Re-arm the trigger so it can activate again.
    pub fn reset(&mut self) {
        self.time_left = self.interval_sec;
        self.expired = false;
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

// ── EventTrigger ──────────────────────────────────────────────────────────────

/// Broker-event trigger.  Stateless between checks; every check scans the
/// pending queue afresh.
#[derive(Clone, Debug)]
pub struct EventTrigger {
    pub kind: EventKind,
    /// Path whose events activate the trigger.  `None` binds to the owning
    /// datapoint's path at check time.
    pub path: Option<String>,
}

impl EventTrigger {
    pub fn new(kind: EventKind) -> Self {
        Self { kind, path: None }
    }

    pub fn at_path(kind: EventKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: Some(path.into()),
        }
    }

    /// Consume and return the earliest matching pending event, if any.
    pub fn check(&self, ctx: &mut ExecutionContext<'_>) -> Option<Event> {
        let path = self.path.as_deref().unwrap_or(ctx.calling_path);
        ctx.events.take_matching(self.kind, path)
    }
}
