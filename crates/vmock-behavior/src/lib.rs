//! `vmock-behavior` — the programmable behavior model of a mocked datapoint.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                         |
//! |--------------|------------------------------------------------------------------|
//! | [`trigger`]  | `Trigger` enum (clock / event), `TriggerFired`                   |
//! | [`action`]   | `Action` enum (`Set` / `Animate`)                                |
//! | [`behavior`] | `Behavior` — one trigger, one guard condition, one action        |
//! | [`resolver`] | `ValueSpec` — late-bound dynamic value expressions (`$self`, …)  |
//! | [`animator`] | `ValueAnimator` — piecewise-linear interpolation over time       |
//! | [`context`]  | `ExecutionContext`, `ActionContext`, `DatapointRead`             |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                             |
//!
//! # Design notes
//!
//! Per datapoint and tick, the executor (in `vmock-engine`) evaluates each
//! behavior in declaration order:
//!
//! 1. **Condition** first — event consumption is destructive, so a behavior
//!    whose guard is false must not get a chance to swallow a queued event
//!    that a later behavior could consume.
//! 2. **Trigger** — clock triggers count down against delta-time; event
//!    triggers take at most one matching event out of the pending queue.
//! 3. **Action** — resolves its dynamic values *now* (late-bound) and either
//!    returns a value to set or installs a fresh animator.
//!
//! The first behavior that activates wins; the rest of that datapoint's
//! behaviors are skipped for the tick.

pub mod action;
pub mod animator;
pub mod behavior;
pub mod context;
pub mod error;
pub mod resolver;
pub mod trigger;


pub use action::{Action, AnimationAction, SetAction};
pub use animator::{RepeatMode, ValueAnimator};
pub use behavior::{Behavior, Condition};
pub use context::{ActionContext, DatapointRead, ExecutionContext};
pub use error::{BehaviorError, BehaviorResult};
pub use resolver::ValueSpec;
pub use trigger::{ClockTrigger, EventTrigger, Trigger, TriggerFired};
