//! The engine — event intake, behavior evaluation, animation, publishing.

use std::thread;
use std::time::Instant;

use crossbeam_channel::Receiver;
use tracing::{debug, error, info, warn};

use vmock_broker::DataBroker;
use vmock_core::{EngineConfig, Event, EventKind, PendingEvents};

use crate::executor;
use crate::loader::MockedDatapoint;
use crate::table::DatapointTable;

/// The running mock: owns the table, the behaviors, and the broker handle.
///
/// Built via [`EngineBuilder`][crate::EngineBuilder].  Drive it with
/// [`run`](Engine::run) for wall-clock operation or [`step`](Engine::step)
/// to advance virtual time deterministically (tests, embedders).
pub struct Engine<B: DataBroker> {
    pub(crate) config: EngineConfig,
    pub(crate) broker: B,
    pub(crate) table: DatapointTable,
    pub(crate) mocks: Vec<MockedDatapoint>,

    /// Receiving end of the subscription bridge.  The only cross-thread
    /// structure in the engine; drained at the start of every tick.
    pub(crate) events: Receiver<Event>,
    pub(crate) pending: PendingEvents,

    /// Set on a fatal broker error; [`run`](Engine::run) stops cycling
    /// domain logic until the broker reports connected again.
    paused: bool,
    backlog_warned: bool,
}

impl<B: DataBroker> Engine<B> {
    pub(crate) fn new(
        config: EngineConfig,
        broker: B,
        table: DatapointTable,
        mocks: Vec<MockedDatapoint>,
        events: Receiver<Event>,
    ) -> Self {
        Self {
            config,
            broker,
            table,
            mocks,
            events,
            pending: PendingEvents::new(),
            paused: false,
            backlog_warned: false,
        }
    }

    /// `true` after a fatal broker error, until the next reconnect.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Read access to the datapoint table.
    pub fn table(&self) -> &DatapointTable {
        &self.table
    }

    /// Run forever on the wall clock.
    ///
    /// Each cycle measures the real elapsed time since the previous one,
    /// calls [`step`](Engine::step) with it, then sleeps the configured
    /// tick interval — so animation speed tracks the wall clock even when
    /// a tick runs long.  While the broker is disconnected (or after a
    /// fatal error) the loop sleeps without cycling domain logic and
    /// re-bases its clock on resume, so downtime produces no delta-time
    /// jump.
    pub fn run(&mut self) {
        let interval = self.config.tick_interval();
        let mut last_tick = Instant::now();
        loop {
            if !self.broker.is_connected() {
                if !self.paused {
                    warn!("data source disconnected; pausing");
                    self.paused = true;
                }
                thread::sleep(interval);
                last_tick = Instant::now();
                continue;
            }
            if self.paused {
                info!("data source connected; resuming");
                self.paused = false;
                last_tick = Instant::now();
            }

            let now = Instant::now();
            let delta_time = now.duration_since(last_tick).as_secs_f64();
            last_tick = now;

            self.step(delta_time);
            thread::sleep(interval);
        }
    }

    /// Advance the mock by `delta_time` seconds of virtual time.
    ///
    /// One deterministic tick: drain the event channel, evaluate behaviors,
    /// advance live animators, publish the values that changed.
    pub fn step(&mut self, delta_time: f64) {
        self.drain_events();
        executor::execute_behaviors(
            &mut self.mocks,
            &mut self.table,
            &mut self.pending,
            delta_time,
        );
        executor::advance_animations(&mut self.mocks, &mut self.table, delta_time);
        self.publish_changes();
    }

    /// Move everything the bridge delivered since the last tick into the
    /// pending queue, and fold current-value updates for unmocked entries
    /// into the table so `$<path>` expressions see fresh data.
    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            if event.kind == EventKind::Value
                && let Some(id) = self.table.id_of(&event.path)
                && !self.table.entry(id).is_mocked
            {
                self.table.set_value(id, event.value.clone());
            }
            self.pending.push(event);
        }

        // Unmatched events never expire; a growing queue means a
        // declaration mismatch somewhere.
        if self.pending.len() > self.config.event_backlog_warn {
            if !self.backlog_warned {
                warn!(
                    backlog = self.pending.len(),
                    "pending events are piling up without a consuming trigger"
                );
                self.backlog_warned = true;
            }
        } else {
            self.backlog_warned = false;
        }
    }

    /// Publish this tick's changed mocked values.  A fatal broker error
    /// pauses the engine and abandons the rest of the batch; transient
    /// errors are logged per datapoint and skipped.
    fn publish_changes(&mut self) {
        let changes = self.table.take_changes();
        for (i, &id) in changes.iter().enumerate() {
            let entry = self.table.entry(id);
            if !entry.is_mocked {
                continue; // unmocked entries mirror the data source; never echoed back
            }
            let Some(value) = entry.value.clone() else {
                continue;
            };
            match self.broker.publish(&entry.path, value.clone()) {
                Ok(()) => debug!(path = %entry.path, %value, "published"),
                Err(e) if e.is_fatal() => {
                    error!(path = %entry.path, error = %e, "fatal broker error; pausing");
                    self.paused = true;
                    // The unpublished tail goes out on the first tick after
                    // reconnect, even if those values never change again.
                    self.table.requeue_changes(&changes[i..]);
                    return;
                }
                Err(e) => warn!(path = %entry.path, error = %e, "publish failed; skipping"),
            }
        }
    }
}
