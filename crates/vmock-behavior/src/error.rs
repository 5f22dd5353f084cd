use thiserror::Error;

use vmock_core::{DataType, Value};

/// Errors from behavior construction and action execution.
///
/// Resolution errors are fatal only to the single action invocation that
/// raised them; the executor logs them with context (path, behavior index)
/// and carries on with the tick.
#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("\"$event.value\" used in a behavior not activated by an event trigger")]
    EventValueWithoutEvent,

    #[error("reference to unknown datapoint {0:?}")]
    UnresolvedReference(String),

    #[error("animation needs at least two values, got {0}")]
    TooFewValues(usize),

    #[error("animation duration must be positive, got {0}")]
    NonPositiveDuration(f64),

    #[error("cannot animate non-numeric value {0:?}")]
    NonNumericValue(Value),

    #[error("cannot animate datapoint with discrete type {0}")]
    DiscreteAnimation(DataType),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
