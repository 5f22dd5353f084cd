//! Strongly typed, zero-cost identifier for datapoint-table slots.
//!
//! The inner integer is `pub` to allow direct indexing into the table's
//! `Vec` via `id.0 as usize`, but callers should prefer the `.index()`
//! helper for clarity.

use std::fmt;

/// Index of a datapoint in the engine's table.  Max ~4.3 billion datapoints.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DatapointId(pub u32);

impl DatapointId {
    /// Sentinel meaning "no valid ID" — equivalent to `u32::MAX`.
    pub const INVALID: DatapointId = DatapointId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for DatapointId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for DatapointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DatapointId({})", self.0)
    }
}

impl From<DatapointId> for usize {
    #[inline(always)]
    fn from(id: DatapointId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for DatapointId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<DatapointId, Self::Error> {
        u32::try_from(n).map(DatapointId)
    }
}
