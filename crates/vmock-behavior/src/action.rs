//! Actions — the effect applied to a datapoint when its behavior activates.

use vmock_core::Value;

use crate::animator::{RepeatMode, ValueAnimator};
use crate::context::ActionContext;
use crate::error::{BehaviorError, BehaviorResult};
use crate::resolver::ValueSpec;

/// What a behavior does on activation, matched exhaustively by the executor.
#[derive(Debug)]
pub enum Action {
    Set(SetAction),
    Animate(AnimationAction),
}

impl Action {
    /// Set the datapoint to `value` (literal or dynamic expression).
    pub fn set(value: impl Into<ValueSpec>) -> Self {
        Action::Set(SetAction {
            value: value.into(),
        })
    }

    /// Animate over `values` for `duration` seconds, once.
    pub fn animate(values: Vec<ValueSpec>, duration: f64) -> Self {
        Action::Animate(AnimationAction::new(values, duration, RepeatMode::Once))
    }

    /// Animate over `values` every `duration` seconds, forever.
    pub fn animate_repeat(values: Vec<ValueSpec>, duration: f64) -> Self {
        Action::Animate(AnimationAction::new(values, duration, RepeatMode::Repeat))
    }

    /// Execute on activation.  `Ok(Some(value))` asks the executor to set
    /// the owning datapoint; `Ok(None)` means the effect is deferred (an
    /// animator was installed and will produce values on later ticks).
    pub fn execute(&mut self, ctx: &ActionContext<'_>) -> BehaviorResult<Option<Value>> {
        match self {
            Action::Set(a) => a.execute(ctx).map(Some),
            Action::Animate(a) => a.execute(ctx).map(|()| None),
        }
    }

    /// Advance a live animation, returning the next sample.  Finished
    /// animators are dropped here; `None` means nothing to apply.
    pub fn advance_animation(&mut self, delta_time: f64) -> Option<f64> {
        match self {
            Action::Set(_) => None,
            Action::Animate(a) => a.advance(delta_time),
        }
    }

    /// `true` for actions that drive the datapoint through an animator —
    /// the loader rejects these on discrete-typed datapoints.
    pub fn animates(&self) -> bool {
        matches!(self, Action::Animate(_))
    }

    /// Datapoint paths read by this action's value expressions.
    pub fn referenced_paths(&self) -> impl Iterator<Item = &str> {
        let specs = match self {
            Action::Set(a) => std::slice::from_ref(&a.value),
            Action::Animate(a) => a.values.as_slice(),
        };
        specs.iter().filter_map(ValueSpec::referenced_path)
    }
}

// ── SetAction ─────────────────────────────────────────────────────────────────

/// Replaces the datapoint's current value with a resolved one.
#[derive(Debug)]
pub struct SetAction {
    pub value: ValueSpec,
}

impl SetAction {
    fn execute(&self, ctx: &ActionContext<'_>) -> BehaviorResult<Value> {
        self.value.resolve(ctx)
    }
}

// ── AnimationAction ───────────────────────────────────────────────────────────

/// Drives the datapoint through a [`ValueAnimator`].
///
/// Each activation resolves the value expressions afresh and installs a new
/// animator, discarding any prior one — re-triggering restarts the
/// animation from the newly resolved values.
#[derive(Debug)]
pub struct AnimationAction {
    pub duration: f64,
    pub repeat_mode: RepeatMode,
    pub values: Vec<ValueSpec>,
    animator: Option<ValueAnimator>,
}

impl AnimationAction {
    pub fn new(values: Vec<ValueSpec>, duration: f64, repeat_mode: RepeatMode) -> Self {
        Self {
            duration,
            repeat_mode,
            values,
            animator: None,
        }
    }

    /// The currently installed animator, if an activation is in flight.
    pub fn animator(&self) -> Option<&ValueAnimator> {
        self.animator.as_ref()
    }

    fn execute(&mut self, ctx: &ActionContext<'_>) -> BehaviorResult<()> {
        // Load-time validation catches declared discrete types; this guards
        // referenced datapoints whose type only became known later.
        if ctx.data_type.is_discrete() {
            return Err(BehaviorError::DiscreteAnimation(ctx.data_type));
        }

        let mut resolved = Vec::with_capacity(self.values.len());
        for spec in &self.values {
            let value = spec.resolve(ctx)?;
            let number = value
                .as_f64()
                .ok_or(BehaviorError::NonNumericValue(value))?;
            resolved.push(number);
        }

        self.animator = Some(ValueAnimator::new(resolved, self.duration, self.repeat_mode)?);
        Ok(())
    }

    fn advance(&mut self, delta_time: f64) -> Option<f64> {
        let animator = self.animator.as_mut()?;
        if animator.is_done() {
            self.animator = None;
            return None;
        }
        Some(animator.tick(delta_time))
    }
}
