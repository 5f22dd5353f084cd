//! vehicle — smallest runnable demo of the mock behavior engine.
//!
//! Mocks three VSS-style vehicle datapoints against the in-memory loopback
//! broker: a speed sensor cycling through an acceleration/deceleration
//! curve, a seat position actuator gliding toward injected targets, and a
//! wiper mode actuator that follows targets directly.  A side thread plays
//! the role of a client sending actuation requests.
//!
//! Run with `RUST_LOG=info` for activations, `RUST_LOG=debug` to also see
//! every published value.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vmock_behavior::{Action, Behavior, Trigger};
use vmock_broker::{EntryKind, LoopbackBroker, Metadata};
use vmock_core::{DataType, EngineConfig, EventKind, Value};
use vmock_engine::{EngineBuilder, MockRegistry};

// ── Datapoint paths ───────────────────────────────────────────────────────────

const SPEED: &str = "Vehicle.Speed";
const SEAT_POSITION: &str = "Vehicle.Cabin.Seat.Row1.DriverSide.Position";
const WIPER_MODE: &str = "Vehicle.Body.Windshield.Front.Wiping.Mode";
const WIPER_TARGET: &str = "Vehicle.Body.Windshield.Front.Wiping.System.TargetPosition";
const WIPER_ACTUAL: &str = "Vehicle.Body.Windshield.Front.Wiping.System.ActualPosition";

// ── Broker catalog ────────────────────────────────────────────────────────────

/// What a real data source would answer during metadata resolution.
fn catalog() -> Vec<Metadata> {
    vec![
        Metadata {
            path: SPEED.to_string(),
            data_type: DataType::Float,
            entry_kind: EntryKind::Sensor,
        },
        Metadata {
            path: SEAT_POSITION.to_string(),
            data_type: DataType::Uint32,
            entry_kind: EntryKind::Actuator,
        },
        Metadata {
            path: WIPER_MODE.to_string(),
            data_type: DataType::String,
            entry_kind: EntryKind::Actuator,
        },
        Metadata {
            path: WIPER_TARGET.to_string(),
            data_type: DataType::Float,
            entry_kind: EntryKind::Actuator,
        },
        Metadata {
            path: WIPER_ACTUAL.to_string(),
            data_type: DataType::Float,
            entry_kind: EntryKind::Sensor,
        },
    ]
}

// ── Mock declarations ─────────────────────────────────────────────────────────

fn declarations() -> MockRegistry {
    let mut registry = MockRegistry::new();

    // Speed: start immediately, cycle a 10-second curve forever.
    registry.mock_datapoint(
        SPEED,
        0.0,
        vec![Behavior::new(
            Trigger::clock(0.0),
            Action::animate_repeat(
                vec![
                    0.0.into(),
                    30.0.into(),
                    50.0.into(),
                    70.0.into(),
                    100.0.into(),
                    70.0.into(),
                    50.0.into(),
                    30.0.into(),
                    0.0.into(),
                ],
                10.0,
            ),
        )],
    );

    // Seat position: glide from wherever it is to each requested target.
    registry.mock_datapoint(
        SEAT_POSITION,
        0u32,
        vec![Behavior::new(
            Trigger::on_event(EventKind::ActuatorTarget),
            Action::animate(vec!["$self".into(), "$event.value".into()], 10.0),
        )],
    );

    // Wiper mode: discrete, so targets are applied directly.
    registry.mock_datapoint(
        WIPER_MODE,
        "STOP_HOLD",
        vec![Behavior::new(
            Trigger::on_event(EventKind::ActuatorTarget),
            Action::set("$event.value"),
        )],
    );

    // Wiper position: an emergency stop snaps the blade home; in any other
    // mode it sweeps toward the requested target.
    registry.mock_datapoint(
        WIPER_ACTUAL,
        0.0,
        vec![
            Behavior::new(
                Trigger::on_event_at(EventKind::ActuatorTarget, WIPER_TARGET),
                Action::set(0.0),
            )
            .when(|ctx| {
                ctx.data.value_of(WIPER_MODE) == Some(Value::from("EMERGENCY_STOP"))
            }),
            Behavior::new(
                Trigger::on_event_at(EventKind::ActuatorTarget, WIPER_TARGET),
                Action::animate(vec!["$self".into(), "$event.value".into()], 10.0),
            ),
        ],
    );

    registry
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let broker = LoopbackBroker::with_metadata(catalog());

    // A pretend client: move the seat, then turn the wipers on.
    let client = broker.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(2));
        info!(target: "client", "requesting seat position 1000");
        client.inject_actuator_target(SEAT_POSITION, 1000u32);

        thread::sleep(Duration::from_secs(5));
        info!(target: "client", "requesting wiper mode RAIN");
        client.inject_actuator_target(WIPER_MODE, "RAIN");

        thread::sleep(Duration::from_secs(1));
        info!(target: "client", "requesting wiper sweep to 1500");
        client.inject_actuator_target(WIPER_TARGET, 1500.0);

        // Mid-sweep emergency stop: the next target snaps the blade to 0.
        thread::sleep(Duration::from_secs(4));
        info!(target: "client", "requesting wiper mode EMERGENCY_STOP");
        client.inject_actuator_target(WIPER_MODE, "EMERGENCY_STOP");
        client.inject_actuator_target(WIPER_TARGET, 0.0);
    });

    let mut engine = EngineBuilder::new(declarations(), broker)
        .config(EngineConfig::default())
        .build()?;
    engine.run();
    Ok(())
}
