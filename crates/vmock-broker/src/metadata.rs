//! Datapoint metadata returned by the broker's resolution call.

use vmock_core::DataType;

/// Whether a datapoint is written by hardware, by a consumer, or static.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntryKind {
    /// Measured by the vehicle; only ever carries current values.
    Sensor,
    /// Writable by consumers; carries both a current value and a target.
    Actuator,
    /// Static vehicle property.
    Attribute,
}

/// Per-path metadata resolved from the external broker at load time.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    pub path: String,
    pub data_type: DataType,
    pub entry_kind: EntryKind,
}

impl Metadata {
    pub fn new(path: impl Into<String>, data_type: DataType, entry_kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            data_type,
            entry_kind,
        }
    }
}
