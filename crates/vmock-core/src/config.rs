//! Engine configuration.

use std::time::Duration;

/// Top-level engine configuration.
///
/// Typically constructed with `EngineConfig::default()` and adjusted where
/// needed; an application may also deserialize it from a config file via
/// the `serde` feature.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Fixed end-of-tick sleep quantum in milliseconds.  Default: 100.
    ///
    /// This bounds how often behaviors are evaluated and animators advance;
    /// delta-time is still measured from the wall clock, so a slow tick
    /// does not slow animations down.
    pub tick_interval_ms: u64,

    /// Warn once the pending-event backlog exceeds this many entries.
    ///
    /// Unmatched events never expire, so a mismatched declaration silently
    /// accumulates queue entries; the warning makes that visible.
    pub event_backlog_warn: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            event_backlog_warn: 256,
        }
    }
}

impl EngineConfig {
    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
