//! Engine tests, driven through `step()` against the loopback broker.

use vmock_behavior::{Action, Behavior, Trigger};
use vmock_broker::{EntryKind, LoopbackBroker, Metadata};
use vmock_core::{DataType, EventKind, MockError, Value};

use crate::{Engine, EngineBuilder, MockRegistry};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sensor(path: &str, data_type: DataType) -> Metadata {
    Metadata {
        path: path.to_string(),
        data_type,
        entry_kind: EntryKind::Sensor,
    }
}

fn actuator(path: &str, data_type: DataType) -> Metadata {
    Metadata {
        path: path.to_string(),
        data_type,
        entry_kind: EntryKind::Actuator,
    }
}

fn build(registry: MockRegistry, broker: &LoopbackBroker) -> Engine<LoopbackBroker> {
    EngineBuilder::new(registry, broker.clone())
        .build()
        .unwrap()
}

// ── Table ─────────────────────────────────────────────────────────────────────

mod table {
    use super::*;
    use crate::DatapointTable;
    use vmock_core::DatapointId;

    #[test]
    fn set_value_coerces_and_tracks_changes() {
        let mut table = DatapointTable::new();
        let id = table
            .insert("Vehicle.Speed", DataType::Uint32, Some(Value::Uint(0)), true)
            .unwrap();

        assert!(table.set_value(id, Value::Float(49.7)));
        assert_eq!(table.entry(id).value, Some(Value::Uint(50)));
        // Same value after coercion: no change recorded.
        assert!(!table.set_value(id, Value::Float(50.4)));
        assert_eq!(table.take_changes(), vec![id]);
        assert_eq!(table.take_changes(), Vec::<DatapointId>::new());
    }

    #[test]
    fn duplicate_path_insert_is_an_error() {
        let mut table = DatapointTable::new();
        table
            .insert("Vehicle.Speed", DataType::Float, None, true)
            .unwrap();
        assert!(matches!(
            table.insert("Vehicle.Speed", DataType::Float, None, false),
            Err(MockError::DuplicateDatapoint(_))
        ));
    }
}

// ── Builder and loader ────────────────────────────────────────────────────────

mod loading {
    use super::*;

    #[test]
    fn empty_registry_is_rejected() {
        let broker = LoopbackBroker::new();
        let result = EngineBuilder::new(MockRegistry::new(), broker).build();
        assert!(matches!(result, Err(MockError::Config(_))));
    }

    #[test]
    fn a_registry_with_no_valid_datapoint_is_rejected() {
        // No metadata for the path: the loader skips it, leaving nothing.
        let broker = LoopbackBroker::new();
        let mut registry = MockRegistry::new();
        registry.mock_datapoint("Vehicle.Speed", 0.0, vec![]);
        let result = EngineBuilder::new(registry, broker).build();
        assert!(matches!(result, Err(MockError::Config(_))));
    }

    #[test]
    fn initial_values_are_seeded_on_build() {
        let broker =
            LoopbackBroker::with_metadata([sensor("Vehicle.Speed", DataType::Float)]);
        let mut registry = MockRegistry::new();
        registry.mock_datapoint("Vehicle.Speed", 42.5, vec![]);
        build(registry, &broker);

        assert_eq!(broker.published("Vehicle.Speed"), Some(Value::Float(42.5)));
    }

    #[test]
    fn duplicate_declaration_keeps_the_first() {
        let broker =
            LoopbackBroker::with_metadata([sensor("Vehicle.Speed", DataType::Float)]);
        let mut registry = MockRegistry::new();
        registry.mock_datapoint("Vehicle.Speed", 1.0, vec![]);
        registry.mock_datapoint("Vehicle.Speed", 2.0, vec![]);
        build(registry, &broker);

        assert_eq!(broker.published("Vehicle.Speed"), Some(Value::Float(1.0)));
    }

    #[test]
    fn discrete_animation_declaration_is_skipped() {
        let broker = LoopbackBroker::with_metadata([
            actuator("Vehicle.Wiper.Mode", DataType::String),
            sensor("Vehicle.Speed", DataType::Float),
        ]);
        let mut registry = MockRegistry::new();
        registry.mock_datapoint(
            "Vehicle.Wiper.Mode",
            "STOP_HOLD",
            vec![Behavior::new(
                Trigger::clock(0.0),
                Action::animate(vec![0.0.into(), 1.0.into()], 1.0),
            )],
        );
        registry.mock_datapoint("Vehicle.Speed", 0.0, vec![]);
        let engine = build(registry, &broker);

        assert!(engine.table().id_of("Vehicle.Wiper.Mode").is_none());
        assert!(engine.table().id_of("Vehicle.Speed").is_some());
    }
}

// ── Tick cycle ────────────────────────────────────────────────────────────────

mod ticking {
    use super::*;

    #[test]
    fn repeating_speed_animation_hits_the_midpoint() {
        let broker =
            LoopbackBroker::with_metadata([sensor("Vehicle.Speed", DataType::Float)]);
        let mut registry = MockRegistry::new();
        registry.mock_datapoint(
            "Vehicle.Speed",
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
        let mut engine = build(registry, &broker);

        engine.step(5.0);
        assert_eq!(broker.published("Vehicle.Speed"), Some(Value::Float(100.0)));
        engine.step(5.0);
        assert_eq!(broker.published("Vehicle.Speed"), Some(Value::Float(0.0)));
    }

    #[test]
    fn actuator_animates_from_own_value_to_injected_target() {
        let path = "Vehicle.Cabin.Seat.Row1.DriverSide.Position";
        let broker = LoopbackBroker::with_metadata([actuator(path, DataType::Uint32)]);
        let mut registry = MockRegistry::new();
        registry.mock_datapoint(
            path,
            100u32,
            vec![Behavior::new(
                Trigger::on_event(EventKind::ActuatorTarget),
                Action::animate(vec!["$self".into(), "$event.value".into()], 10.0),
            )],
        );
        let mut engine = build(registry, &broker);

        broker.inject_actuator_target(path, 900u32);
        engine.step(5.0);
        assert_eq!(broker.published(path), Some(Value::Uint(500)));
        engine.step(5.0);
        assert_eq!(broker.published(path), Some(Value::Uint(900)));
        // Animation finished; nothing further is published.
        engine.step(5.0);
        assert_eq!(broker.published(path), Some(Value::Uint(900)));
    }

    #[test]
    fn guarded_behavior_leaves_the_event_for_the_next_one() {
        let path = "Vehicle.Wiper.Mode";
        let broker = LoopbackBroker::with_metadata([actuator(path, DataType::String)]);
        let mut registry = MockRegistry::new();
        registry.mock_datapoint(
            path,
            "STOP_HOLD",
            vec![
                Behavior::new(
                    Trigger::on_event(EventKind::ActuatorTarget),
                    Action::set("NEVER"),
                )
                .when(|_| false),
                Behavior::new(
                    Trigger::on_event(EventKind::ActuatorTarget),
                    Action::set("$event.value"),
                ),
            ],
        );
        let mut engine = build(registry, &broker);

        broker.inject_actuator_target(path, "RAIN");
        engine.step(0.1);
        assert_eq!(broker.published(path), Some(Value::from("RAIN")));
    }

    #[test]
    fn equal_values_are_not_republished() {
        let broker =
            LoopbackBroker::with_metadata([sensor("Vehicle.Speed", DataType::Float)]);
        let mut registry = MockRegistry::new();
        registry.mock_datapoint(
            "Vehicle.Speed",
            0.0,
            vec![Behavior::new(Trigger::every(1.0), Action::set(5.0))],
        );
        let mut engine = build(registry, &broker);

        engine.step(1.0);
        engine.step(1.0);
        engine.step(1.0);

        // One initial seed plus exactly one change.
        let log = broker.publish_log();
        assert_eq!(
            log,
            vec![
                ("Vehicle.Speed".to_string(), Value::Float(0.0)),
                ("Vehicle.Speed".to_string(), Value::Float(5.0)),
            ]
        );
    }

    #[test]
    fn referenced_datapoint_values_flow_into_expressions() {
        let broker = LoopbackBroker::with_metadata([
            sensor("Vehicle.A", DataType::Float),
            sensor("Vehicle.B", DataType::Float),
        ]);
        let mut registry = MockRegistry::new();
        registry.mock_datapoint(
            "Vehicle.A",
            0.0,
            vec![Behavior::new(Trigger::every(1.0), Action::set("$Vehicle.B"))],
        );
        let mut engine = build(registry, &broker);

        broker.inject_value("Vehicle.B", 7.5);
        engine.step(1.0);

        assert_eq!(broker.published("Vehicle.A"), Some(Value::Float(7.5)));
        // The referenced entry mirrors the source but is never echoed back.
        assert_eq!(broker.published("Vehicle.B"), None);
    }

    #[test]
    fn conditions_can_read_other_datapoints() {
        const MODE: &str = "Vehicle.Body.Windshield.Front.Wiping.Mode";
        const TARGET: &str = "Vehicle.Body.Windshield.Front.Wiping.System.TargetPosition";
        const ACTUAL: &str = "Vehicle.Body.Windshield.Front.Wiping.System.ActualPosition";

        let broker = LoopbackBroker::with_metadata([
            actuator(MODE, DataType::String),
            actuator(TARGET, DataType::Float),
            sensor(ACTUAL, DataType::Float),
        ]);
        let mut registry = MockRegistry::new();
        registry.mock_datapoint(
            MODE,
            "STOP_HOLD",
            vec![Behavior::new(
                Trigger::on_event(EventKind::ActuatorTarget),
                Action::set("$event.value"),
            )],
        );
        registry.mock_datapoint(
            ACTUAL,
            0.0,
            vec![
                // Emergency stop overrides: the wiper snaps home.
                Behavior::new(
                    Trigger::on_event_at(EventKind::ActuatorTarget, TARGET),
                    Action::set(0.0),
                )
                .when(|ctx| {
                    ctx.data.value_of(MODE) == Some(Value::from("EMERGENCY_STOP"))
                }),
                // Otherwise glide toward the requested position.
                Behavior::new(
                    Trigger::on_event_at(EventKind::ActuatorTarget, TARGET),
                    Action::animate(vec!["$self".into(), "$event.value".into()], 10.0),
                ),
            ],
        );
        let mut engine = build(registry, &broker);

        // STOP_HOLD: the guard on the first behavior is false, so the
        // target event falls through to the animating one.
        broker.inject_actuator_target(TARGET, 1500.0);
        engine.step(5.0);
        assert_eq!(broker.published(ACTUAL), Some(Value::Float(750.0)));
        engine.step(5.0);
        assert_eq!(broker.published(ACTUAL), Some(Value::Float(1500.0)));
        engine.step(5.0); // retires the finished animator

        // EMERGENCY_STOP: the same target event now snaps the position.
        broker.inject_actuator_target(MODE, "EMERGENCY_STOP");
        engine.step(0.1);
        broker.inject_actuator_target(TARGET, 1500.0);
        engine.step(0.1);
        assert_eq!(broker.published(ACTUAL), Some(Value::Float(0.0)));
    }

    #[test]
    fn intra_tick_writes_coalesce_into_one_publish() {
        const MODE: &str = "Vehicle.Mode";
        const TARGET: &str = "Vehicle.Target";
        const ACTUAL: &str = "Vehicle.Actual";

        let broker = LoopbackBroker::with_metadata([
            actuator(MODE, DataType::String),
            actuator(TARGET, DataType::Float),
            sensor(ACTUAL, DataType::Float),
        ]);
        let mut registry = MockRegistry::new();
        registry.mock_datapoint(
            MODE,
            "RUN",
            vec![Behavior::new(
                Trigger::on_event(EventKind::ActuatorTarget),
                Action::set("$event.value"),
            )],
        );
        registry.mock_datapoint(
            ACTUAL,
            0.0,
            vec![
                Behavior::new(
                    Trigger::on_event_at(EventKind::ActuatorTarget, TARGET),
                    Action::set(0.0),
                )
                .when(|ctx| ctx.data.value_of(MODE) == Some(Value::from("STOP"))),
                Behavior::new(
                    Trigger::on_event_at(EventKind::ActuatorTarget, TARGET),
                    Action::animate(vec!["$self".into(), "$event.value".into()], 10.0),
                ),
            ],
        );
        let mut engine = build(registry, &broker);

        // Start an animation, then snap to 0 while it is still running:
        // the snap and the animator sample land in the same tick, and only
        // the tick's final value reaches the broker.
        broker.inject_actuator_target(TARGET, 1500.0);
        engine.step(2.5);
        broker.inject_actuator_target(MODE, "STOP");
        engine.step(0.0);
        broker.inject_actuator_target(TARGET, 1500.0);
        engine.step(2.5);

        let log: Vec<Value> = broker
            .publish_log()
            .into_iter()
            .filter(|(p, _)| p == ACTUAL)
            .map(|(_, v)| v)
            .collect();
        assert_eq!(
            log,
            vec![Value::Float(0.0), Value::Float(375.0), Value::Float(750.0)]
        );
    }

    #[test]
    fn fatal_publish_error_pauses_the_engine() {
        let broker =
            LoopbackBroker::with_metadata([sensor("Vehicle.Speed", DataType::Float)]);
        let mut registry = MockRegistry::new();
        registry.mock_datapoint(
            "Vehicle.Speed",
            0.0,
            vec![Behavior::new(Trigger::every(1.0), Action::set(1.0))],
        );
        let mut engine = build(registry, &broker);
        assert!(!engine.is_paused());

        broker.set_connected(false);
        engine.step(1.0);
        assert!(engine.is_paused());
    }

    #[test]
    fn unpublished_changes_survive_a_fatal_error() {
        let broker =
            LoopbackBroker::with_metadata([sensor("Vehicle.Speed", DataType::Float)]);
        let mut registry = MockRegistry::new();
        registry.mock_datapoint(
            "Vehicle.Speed",
            0.0,
            vec![Behavior::new(Trigger::every(1.0), Action::set(1.0))],
        );
        let mut engine = build(registry, &broker);

        // The change made while disconnected never reached the broker...
        broker.set_connected(false);
        engine.step(1.0);
        assert!(engine.is_paused());
        assert_eq!(broker.published("Vehicle.Speed"), Some(Value::Float(0.0)));

        // ...but is not lost: it goes out on the first tick after reconnect
        // even though the value does not change again.
        broker.set_connected(true);
        engine.step(1.0);
        assert_eq!(broker.published("Vehicle.Speed"), Some(Value::Float(1.0)));
    }
}

// ── Executor edge cases ───────────────────────────────────────────────────────

mod executing {
    use super::*;
    use crate::loader::MockedDatapoint;
    use crate::{DatapointTable, executor};
    use vmock_core::PendingEvents;

    #[test]
    fn behavior_on_a_valueless_entry_fails_without_writing() {
        // Loading always seeds mocked entries; an entry with no value is a
        // resolution failure, not an implicit zero.
        let mut table = DatapointTable::new();
        let id = table
            .insert("Vehicle.Speed", DataType::Float, None, true)
            .unwrap();
        let mut mocks = vec![MockedDatapoint {
            id,
            path: "Vehicle.Speed".to_string(),
            behaviors: vec![Behavior::new(Trigger::clock(0.0), Action::set(1.0))],
        }];
        let mut pending = PendingEvents::new();

        executor::execute_behaviors(&mut mocks, &mut table, &mut pending, 0.1);

        assert_eq!(table.entry(id).value, None);
        assert!(table.take_changes().is_empty());
    }
}
