//! The datapoint table — current value and declared type of every known path.

use rustc_hash::FxHashMap;

use vmock_behavior::DatapointRead;
use vmock_core::{DataType, DatapointId, MockError, MockResult, Value};

/// One row of the table.
#[derive(Clone, Debug)]
pub struct DatapointEntry {
    pub path: String,

    /// Declared kind, immutable after load.  Everything written through
    /// [`DatapointTable::set_value`] is coerced to it.
    pub data_type: DataType,

    /// Current value.  `None` until first observed — mocked entries start
    /// with their declared initial value, referenced-only entries stay
    /// `None` until the data source delivers one.
    pub value: Option<Value>,

    /// `true` for entries whose value this engine owns and publishes.
    pub is_mocked: bool,
}

/// Dense entry storage plus a path index, with per-tick change tracking.
///
/// `set_value` records the ids whose value actually changed; the engine
/// loop drains them via [`take_changes`](DatapointTable::take_changes) and
/// publishes the mocked ones.  Writes of an equal value leave no trace.
#[derive(Default, Debug)]
pub struct DatapointTable {
    entries: Vec<DatapointEntry>,
    index: FxHashMap<String, DatapointId>,
    changed: Vec<DatapointId>,
}

impl DatapointTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.  Paths are unique; re-inserting one is an error.
    pub fn insert(
        &mut self,
        path: impl Into<String>,
        data_type: DataType,
        value: Option<Value>,
        is_mocked: bool,
    ) -> MockResult<DatapointId> {
        let path = path.into();
        if self.index.contains_key(&path) {
            return Err(MockError::DuplicateDatapoint(path));
        }
        let id = DatapointId(self.entries.len() as u32);
        self.index.insert(path.clone(), id);
        self.entries.push(DatapointEntry {
            path,
            data_type,
            value: value.map(|v| data_type.coerce(v)),
            is_mocked,
        });
        Ok(id)
    }

    pub fn id_of(&self, path: &str) -> Option<DatapointId> {
        self.index.get(path).copied()
    }

    pub fn entry(&self, id: DatapointId) -> &DatapointEntry {
        &self.entries[id.index()]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &DatapointEntry> {
        self.entries.iter()
    }

    /// Write `raw` coerced to the entry's declared type.  Returns `true`
    /// (and records the id as changed) only when the stored value actually
    /// differs afterwards.
    pub fn set_value(&mut self, id: DatapointId, raw: Value) -> bool {
        let entry = &mut self.entries[id.index()];
        let coerced = entry.data_type.coerce(raw);
        if entry.value.as_ref() == Some(&coerced) {
            return false;
        }
        entry.value = Some(coerced);
        if !self.changed.contains(&id) {
            self.changed.push(id);
        }
        true
    }

    /// Drain the ids changed since the last call, in first-change order.
    pub fn take_changes(&mut self) -> Vec<DatapointId> {
        std::mem::take(&mut self.changed)
    }

    /// Put drained ids back at the front of the change set, keeping their
    /// order ahead of anything recorded since.  Used when publishing a
    /// batch is interrupted partway through.
    pub fn requeue_changes(&mut self, ids: &[DatapointId]) {
        for &id in ids.iter().rev() {
            if !self.changed.contains(&id) {
                self.changed.insert(0, id);
            }
        }
    }
}

impl DatapointRead for DatapointTable {
    fn value_of(&self, path: &str) -> Option<Value> {
        self.id_of(path)
            .and_then(|id| self.entry(id).value.clone())
    }

    fn data_type_of(&self, path: &str) -> Option<DataType> {
        self.id_of(path).map(|id| self.entry(id).data_type)
    }
}
