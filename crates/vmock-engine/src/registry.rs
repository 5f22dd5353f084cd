//! Declaration registry — the mocked-datapoint catalog handed to the loader.

use vmock_behavior::Behavior;
use vmock_core::Value;

/// One mocked-datapoint declaration, unvalidated until load.
#[derive(Debug)]
pub struct MockSpec {
    pub path: String,
    pub initial_value: Value,
    pub behaviors: Vec<Behavior>,
}

/// Collects declarations before the engine starts.
///
/// Purely additive: validation (metadata resolution, duplicate detection,
/// discrete-animation checks) happens in the loader, which consumes the
/// registry once.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = MockRegistry::new();
/// registry.mock_datapoint(
///     "Vehicle.Speed",
///     0.0,
///     vec![Behavior::new(
///         Trigger::clock(0.0),
///         Action::animate_repeat(vec![0.0.into(), 100.0.into(), 0.0.into()], 10.0),
///     )],
/// );
/// ```
#[derive(Default, Debug)]
pub struct MockRegistry {
    specs: Vec<MockSpec>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a mocked datapoint with its initial value and behaviors.
    ///
    /// Declaration order is execution order: the loader and executor keep
    /// it, and within a datapoint the behaviors run in the order given here.
    pub fn mock_datapoint(
        &mut self,
        path: impl Into<String>,
        initial_value: impl Into<Value>,
        behaviors: Vec<Behavior>,
    ) -> &mut Self {
        self.specs.push(MockSpec {
            path: path.into(),
            initial_value: initial_value.into(),
            behaviors,
        });
        self
    }

    pub fn specs(&self) -> &[MockSpec] {
        &self.specs
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub(crate) fn into_specs(self) -> Vec<MockSpec> {
        self.specs
    }

    /// Every path the declarations touch: mocked paths plus paths referenced
    /// by triggers and value expressions, deduplicated in first-seen order.
    /// This is the set the engine resolves metadata for.
    pub fn all_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = Vec::new();
        let mut push = |p: &str, paths: &mut Vec<String>| {
            if !paths.iter().any(|q| q == p) {
                paths.push(p.to_string());
            }
        };
        for spec in &self.specs {
            push(&spec.path, &mut paths);
            for behavior in &spec.behaviors {
                for path in behavior.referenced_paths() {
                    push(path, &mut paths);
                }
            }
        }
        paths
    }
}
