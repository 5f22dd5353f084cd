//! Builder for [`Engine`] — the connect-and-load phase.

use tracing::{info, warn};

use vmock_broker::DataBroker;
use vmock_core::{EngineConfig, MockError, MockResult};

use crate::engine::Engine;
use crate::loader;
use crate::registry::MockRegistry;

/// Builds a ready-to-run [`Engine`] from a declaration registry and a broker.
///
/// `build` performs the whole startup sequence: resolve metadata for every
/// declared and referenced path, run the loader, subscribe to events for
/// all known paths, and publish each mocked datapoint's initial value so
/// the data source starts from a consistent picture.
///
/// # Example
///
/// ```rust,ignore
/// let engine = EngineBuilder::new(registry, broker)
///     .config(EngineConfig::default())
///     .build()?;
/// engine.run();
/// ```
pub struct EngineBuilder<B: DataBroker> {
    registry: MockRegistry,
    broker: B,
    config: EngineConfig,
}

impl<B: DataBroker> EngineBuilder<B> {
    pub fn new(registry: MockRegistry, broker: B) -> Self {
        Self {
            registry,
            broker,
            config: EngineConfig::default(),
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate, load, subscribe, and seed initial values.
    pub fn build(mut self) -> MockResult<Engine<B>> {
        if self.registry.is_empty() {
            return Err(MockError::Config("no mocked datapoints declared".into()));
        }

        // ── Resolve metadata and load ─────────────────────────────────────
        let paths = self.registry.all_paths();
        let metadata = self
            .broker
            .metadata(&paths)
            .map_err(|e| MockError::Broker(e.to_string()))?;
        let loaded = loader::load(self.registry, &metadata)?;
        if loaded.mocks.is_empty() {
            return Err(MockError::Config(
                "no mocked datapoint survived validation".into(),
            ));
        }
        info!(
            mocked = loaded.mocks.len(),
            entries = loaded.table.len(),
            "datapoints loaded"
        );

        // ── Subscribe every known path ────────────────────────────────────
        //
        // Mocked paths for actuator targets and external writes, referenced
        // paths so their current values flow into the table.
        let (tx, rx) = crossbeam_channel::unbounded();
        let subscribed: Vec<String> = loaded
            .table
            .entries()
            .map(|e| e.path.clone())
            .collect();
        self.broker
            .subscribe(&subscribed, tx)
            .map_err(|e| MockError::Broker(e.to_string()))?;

        // ── Seed initial values ───────────────────────────────────────────
        for entry in loaded.table.entries().filter(|e| e.is_mocked) {
            let Some(value) = entry.value.clone() else {
                continue;
            };
            if let Err(e) = self.broker.publish(&entry.path, value) {
                if e.is_fatal() {
                    return Err(MockError::Broker(e.to_string()));
                }
                warn!(path = %entry.path, error = %e, "initial value rejected");
            }
        }

        Ok(Engine::new(
            self.config,
            self.broker,
            loaded.table,
            loaded.mocks,
            rx,
        ))
    }
}
