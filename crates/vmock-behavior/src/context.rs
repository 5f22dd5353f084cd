//! Contexts handed to conditions, triggers, and actions during a tick.

use vmock_core::{DataType, PendingEvents, Value};

use crate::trigger::TriggerFired;

/// Read-only access to the current values of other datapoints.
///
/// Implemented by the engine's datapoint table; behaviors never get a
/// mutable handle — all writes flow through the action's return value so
/// the executor remains the sole mutator.
pub trait DatapointRead {
    /// Current value of the datapoint at `path`, if known.
    fn value_of(&self, path: &str) -> Option<Value>;

    /// Declared type of the datapoint at `path`, if known.
    fn data_type_of(&self, path: &str) -> Option<DataType>;
}

/// Per-behavior evaluation context, rebuilt for every behavior each tick.
///
/// Conditions receive `&ExecutionContext` (reads only); trigger checks
/// receive `&mut ExecutionContext` because consuming an event mutates the
/// pending queue.
pub struct ExecutionContext<'a> {
    /// Path of the datapoint whose behavior is being evaluated.
    pub calling_path: &'a str,

    /// Seconds elapsed since the previous tick.
    pub delta_time: f64,

    /// Events awaiting a matching trigger, in insertion order.
    pub events: &'a mut PendingEvents,

    /// Read-only view of all datapoint values.
    pub data: &'a dyn DatapointRead,
}

/// Context in which an activated behavior's action runs.
pub struct ActionContext<'a> {
    /// Path of the owning datapoint.
    pub path: &'a str,

    /// The owning datapoint's value *before* the action applies —
    /// what `$self` resolves to.
    pub current_value: Value,

    /// The owning datapoint's declared type.
    pub data_type: DataType,

    /// How the trigger fired; carries the consumed event for event triggers.
    pub fired: TriggerFired,

    /// Read-only view of all datapoint values (for `$<path>` references).
    pub data: &'a dyn DatapointRead,
}
