//! Unit tests for vmock-core primitives.

#[cfg(test)]
mod ids {
    use crate::DatapointId;

    #[test]
    fn index_roundtrip() {
        let id = DatapointId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(DatapointId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(DatapointId::INVALID.0, u32::MAX);
        assert_eq!(DatapointId::default(), DatapointId::INVALID);
    }
}

#[cfg(test)]
mod values {
    use crate::{DataType, Value};

    #[test]
    fn as_f64_numeric_kinds() {
        assert_eq!(Value::Int(-3).as_f64(), Some(-3.0));
        assert_eq!(Value::Uint(7).as_f64(), Some(7.0));
        assert_eq!(Value::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::Bool(true).as_f64(), None);
        assert_eq!(Value::from("STOP").as_f64(), None);
    }

    #[test]
    fn coerce_rounds_to_int() {
        assert_eq!(DataType::Int32.coerce(Value::Float(2.6)), Value::Int(3));
        assert_eq!(DataType::Int64.coerce(Value::Float(-2.6)), Value::Int(-3));
    }

    #[test]
    fn coerce_unsigned_saturates_at_zero() {
        assert_eq!(DataType::Uint32.coerce(Value::Float(-5.0)), Value::Uint(0));
        assert_eq!(DataType::Uint64.coerce(Value::Int(-1)), Value::Uint(0));
    }

    #[test]
    fn coerce_float_widens_integers() {
        assert_eq!(DataType::Double.coerce(Value::Int(4)), Value::Float(4.0));
        assert_eq!(DataType::Float.coerce(Value::Uint(4)), Value::Float(4.0));
    }

    #[test]
    fn coerce_discrete_passes_through() {
        let s = Value::from("EMERGENCY_STOP");
        assert_eq!(DataType::String.coerce(s.clone()), s);
        assert_eq!(DataType::Bool.coerce(Value::Bool(true)), Value::Bool(true));
        assert_eq!(DataType::Unknown.coerce(Value::Int(1)), Value::Int(1));
    }

    #[test]
    fn discrete_classification() {
        assert!(DataType::Bool.is_discrete());
        assert!(DataType::String.is_discrete());
        assert!(!DataType::Float.is_discrete());
        assert!(DataType::Uint32.is_numeric());
        assert!(!DataType::Unknown.is_numeric());
    }
}

#[cfg(test)]
mod events {
    use crate::{Event, EventKind, PendingEvents};

    fn target(path: &str, value: i64) -> Event {
        Event::new(EventKind::ActuatorTarget, path, value)
    }

    #[test]
    fn take_matching_consumes_earliest_inserted() {
        let mut q = PendingEvents::new();
        q.push(target("Vehicle.A", 1));
        q.push(target("Vehicle.A", 2));

        let taken = q.take_matching(EventKind::ActuatorTarget, "Vehicle.A").unwrap();
        assert_eq!(taken.value, 1.into());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn take_matching_requires_kind_and_path() {
        let mut q = PendingEvents::new();
        q.push(target("Vehicle.A", 1));

        assert!(q.take_matching(EventKind::Value, "Vehicle.A").is_none());
        assert!(q.take_matching(EventKind::ActuatorTarget, "Vehicle.B").is_none());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn non_matching_events_keep_their_order() {
        let mut q = PendingEvents::new();
        q.push(target("Vehicle.A", 1));
        q.push(target("Vehicle.B", 2));
        q.push(target("Vehicle.A", 3));

        q.take_matching(EventKind::ActuatorTarget, "Vehicle.A").unwrap();
        let remaining: Vec<&str> = q.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(remaining, ["Vehicle.B", "Vehicle.A"]);
    }
}
