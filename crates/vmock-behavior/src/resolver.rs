//! Dynamic value expressions, resolved at action-execution time.
//!
//! # Grammar
//!
//! String values beginning with the `$` marker are dynamic; everything else
//! is a literal passthrough, so a single animation can mix literals and
//! expressions (`[0.0, "$event.value"]`).
//!
//! | Literal          | Resolves to                                        |
//! |------------------|----------------------------------------------------|
//! | `$self`          | owning datapoint's value *before* the action       |
//! | `$event.value`   | the consumed event's value (event triggers only)   |
//! | `$<path>`        | current value of the datapoint at `<path>`         |
//!
//! Expressions are parsed once at declaration time into a [`ValueSpec`] and
//! resolved late — at the moment the owning behavior's action executes —
//! against the [`ActionContext`].
//!
//! # Failure policy
//!
//! Resolution fails loudly: `$event.value` outside an event-triggered
//! behavior and `$<path>` against an unknown datapoint both return an error
//! instead of a default.  The executor logs and abandons that single action
//! invocation.

use vmock_core::Value;

use crate::context::ActionContext;
use crate::error::{BehaviorError, BehaviorResult};
use crate::trigger::TriggerFired;

const MARKER: char = '$';

/// A literal value or a dynamic expression, parsed at declaration time.
#[derive(Clone, PartialEq, Debug)]
pub enum ValueSpec {
    /// Plain value, returned unchanged.
    Literal(Value),
    /// `$self` — the owning datapoint's pre-action value.
    OwnValue,
    /// `$event.value` — the value of the event that fired the trigger.
    EventValue,
    /// `$<path>` — another datapoint's current value.
    Datapoint(String),
}

impl ValueSpec {
    /// Apply the marker grammar.  Only string values participate; anything
    /// else is a literal.
    pub fn parse(value: Value) -> Self {
        let Value::String(s) = &value else {
            return ValueSpec::Literal(value);
        };
        match s.strip_prefix(MARKER) {
            None => ValueSpec::Literal(value),
            Some("self") => ValueSpec::OwnValue,
            Some("event.value") => ValueSpec::EventValue,
            Some(path) => ValueSpec::Datapoint(path.to_string()),
        }
    }

    /// Resolve against the executing action's context.
    pub fn resolve(&self, ctx: &ActionContext<'_>) -> BehaviorResult<Value> {
        match self {
            ValueSpec::Literal(v) => Ok(v.clone()),
            ValueSpec::OwnValue => Ok(ctx.current_value.clone()),
            ValueSpec::EventValue => match &ctx.fired {
                TriggerFired::Event(event) => Ok(event.value.clone()),
                TriggerFired::Clock => Err(BehaviorError::EventValueWithoutEvent),
            },
            ValueSpec::Datapoint(path) => ctx
                .data
                .value_of(path)
                .ok_or_else(|| BehaviorError::UnresolvedReference(path.clone())),
        }
    }

    /// The referenced datapoint path, if this spec reads one.  Used by the
    /// loader to register referenced-but-not-mocked datapoints.
    pub fn referenced_path(&self) -> Option<&str> {
        match self {
            ValueSpec::Datapoint(path) => Some(path),
            _ => None,
        }
    }
}

impl From<Value> for ValueSpec {
    fn from(v: Value) -> Self {
        ValueSpec::parse(v)
    }
}

impl From<&str> for ValueSpec {
    fn from(v: &str) -> Self {
        ValueSpec::parse(Value::from(v))
    }
}

impl From<f64> for ValueSpec {
    fn from(v: f64) -> Self {
        ValueSpec::Literal(Value::Float(v))
    }
}

impl From<i32> for ValueSpec {
    fn from(v: i32) -> Self {
        ValueSpec::Literal(Value::Int(v as i64))
    }
}

impl From<i64> for ValueSpec {
    fn from(v: i64) -> Self {
        ValueSpec::Literal(Value::Int(v))
    }
}

impl From<u32> for ValueSpec {
    fn from(v: u32) -> Self {
        ValueSpec::Literal(Value::Uint(v as u64))
    }
}

impl From<bool> for ValueSpec {
    fn from(v: bool) -> Self {
        ValueSpec::Literal(Value::Bool(v))
    }
}
