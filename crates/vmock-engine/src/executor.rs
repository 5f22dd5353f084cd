//! Per-tick behavior evaluation.

use tracing::{debug, error, info};

use vmock_behavior::{ActionContext, BehaviorError, ExecutionContext};
use vmock_core::{PendingEvents, Value};

use crate::loader::MockedDatapoint;
use crate::table::DatapointTable;

/// Evaluate every mocked datapoint's behaviors for one tick.
///
/// Datapoints run in declaration order.  Within a datapoint, behaviors are
/// evaluated condition → trigger → action, and the first one that activates
/// wins — the rest are skipped until the next tick.  The condition is
/// checked *before* the trigger because event consumption is destructive: a
/// guarded-off behavior must not swallow an event a later behavior could
/// use.
///
/// An action error abandons that activation (logged with the datapoint path
/// and behavior index) but never stops other datapoints.
pub(crate) fn execute_behaviors(
    mocks: &mut [MockedDatapoint],
    table: &mut DatapointTable,
    pending: &mut PendingEvents,
    delta_time: f64,
) {
    for mock in mocks.iter_mut() {
        let MockedDatapoint { id, path, behaviors } = mock;
        let path = path.as_str();

        for (index, behavior) in behaviors.iter_mut().enumerate() {
            let mut ctx = ExecutionContext {
                calling_path: path,
                delta_time,
                events: &mut *pending,
                data: &*table,
            };
            if !behavior.condition_holds(&ctx) {
                continue;
            }
            let Some(fired) = behavior.check_trigger(&mut ctx) else {
                continue;
            };
            info!(path, behavior = index, "behavior activated");

            let result = {
                let entry = table.entry(*id);
                match entry.value.clone() {
                    Some(current_value) => {
                        let ctx = ActionContext {
                            path,
                            current_value,
                            data_type: entry.data_type,
                            fired,
                            data: &*table,
                        };
                        behavior.execute(&ctx)
                    }
                    // Mocked entries are seeded at load; a valueless one is
                    // a resolution failure, never a default.
                    None => Err(BehaviorError::UnresolvedReference(path.to_string())),
                }
            };
            match result {
                Ok(Some(value)) => {
                    if table.set_value(*id, value) {
                        debug!(path, "value set by behavior");
                    }
                }
                Ok(None) => {} // animator installed; applied in the advance phase
                Err(e) => error!(path, behavior = index, error = %e, "action failed"),
            }
            break; // first activation wins for this datapoint
        }
    }
}

/// Advance every live animator by `delta_time` and write the samples back.
///
/// Runs after behavior evaluation, so an animator installed this tick
/// already produces its first sample this tick.  Finished animators are
/// dropped inside `advance_animation`.
pub(crate) fn advance_animations(
    mocks: &mut [MockedDatapoint],
    table: &mut DatapointTable,
    delta_time: f64,
) {
    for mock in mocks.iter_mut() {
        for behavior in &mut mock.behaviors {
            if let Some(sample) = behavior.advance_animation(delta_time) {
                table.set_value(mock.id, Value::Float(sample));
            }
        }
    }
}
