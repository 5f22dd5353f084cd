//! `vmock-core` — foundational types for the vmock behavior engine.
//!
//! This crate is a dependency of every other `vmock-*` crate.  It
//! intentionally has no `vmock-*` dependencies and minimal external ones
//! (only `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`ids`]    | `DatapointId`                                          |
//! | [`value`]  | `Value`, `DataType`, declared-type coercion            |
//! | [`event`]  | `Event`, `EventKind`, `PendingEvents`                  |
//! | [`config`] | `EngineConfig`                                         |
//! | [`error`]  | `MockError`, `MockResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.       |

pub mod config;
pub mod error;
pub mod event;
pub mod ids;
pub mod value;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::EngineConfig;
pub use error::{MockError, MockResult};
pub use event::{Event, EventKind, PendingEvents};
pub use ids::DatapointId;
pub use value::{DataType, Value};
