//! `Behavior` — one trigger, one guard condition, one action.

use std::fmt;

use vmock_core::Value;

use crate::action::Action;
use crate::context::{ActionContext, ExecutionContext};
use crate::error::BehaviorResult;
use crate::trigger::{Trigger, TriggerFired};

/// Guard predicate evaluated before the trigger is checked.
pub type Condition = Box<dyn Fn(&ExecutionContext<'_>) -> bool + Send>;

/// Programmable behavior of a mocked datapoint.
///
/// Immutable in shape after construction (trigger/condition/action never
/// change), owned by exactly one mocked datapoint; only the trigger's
/// countdown state and the action's live animator mutate at runtime.
pub struct Behavior {
    trigger: Trigger,
    condition: Option<Condition>,
    action: Action,
}

impl Behavior {
    /// Behavior with no guard — the condition always holds.
    pub fn new(trigger: Trigger, action: Action) -> Self {
        Self {
            trigger,
            condition: None,
            action,
        }
    }

    /// Attach a guard condition.
    ///
    /// The condition is evaluated **before** the trigger each tick; while it
    /// is false the trigger is never checked, so a pending event stays in
    /// the queue for another behavior to consume.
    pub fn when(mut self, condition: impl Fn(&ExecutionContext<'_>) -> bool + Send + 'static) -> Self {
        self.condition = Some(Box::new(condition));
        self
    }

    /// Evaluate the guard condition.
    pub fn condition_holds(&self, ctx: &ExecutionContext<'_>) -> bool {
        match &self.condition {
            Some(condition) => condition(ctx),
            None => true,
        }
    }

    /// Check the trigger for activation this tick.
    pub fn check_trigger(&mut self, ctx: &mut ExecutionContext<'_>) -> Option<TriggerFired> {
        self.trigger.check(ctx)
    }

    /// Run the action.  See [`Action::execute`] for the return contract.
    pub fn execute(&mut self, ctx: &ActionContext<'_>) -> BehaviorResult<Option<Value>> {
        self.action.execute(ctx)
    }

    /// Advance this behavior's live animation, if any.
    pub fn advance_animation(&mut self, delta_time: f64) -> Option<f64> {
        self.action.advance_animation(delta_time)
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Datapoint paths this behavior reads (explicit trigger paths and
    /// `$<path>` expressions).  The loader registers them as unmocked
    /// entries so resolution can find them.
    pub fn referenced_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.action.referenced_paths().collect();
        if let Trigger::Event(t) = &self.trigger
            && let Some(path) = &t.path
        {
            paths.push(path);
        }
        paths
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behavior")
            .field("trigger", &self.trigger)
            .field("condition", &self.condition.as_ref().map(|_| "<fn>"))
            .field("action", &self.action)
            .finish()
    }
}
