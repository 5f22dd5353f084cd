//! `vmock-engine` — the runtime that ties the behavior model to a data broker.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`registry`] | `MockRegistry` / `MockSpec` — the declaration API              |
//! | [`loader`]   | registry + metadata → `DatapointTable` + `MockedDatapoint`s    |
//! | [`table`]    | `DatapointTable` — values, declared types, change tracking     |
//! | `executor`   | per-tick condition → trigger → action evaluation               |
//! | [`engine`]   | `Engine` — `step()` / `run()` tick loop, publishing            |
//! | [`builder`]  | `EngineBuilder` — metadata resolution, subscribe, initial seed |
//!
//! # Tick cycle
//!
//! Every tick the engine drains the subscription channel into the pending
//! queue, evaluates each mocked datapoint's behaviors (first activation per
//! datapoint wins), advances live animators, and publishes every mocked
//! value that changed.  Delta-time comes from the wall clock in
//! [`Engine::run`] or from the caller in [`Engine::step`].

pub mod builder;
pub mod engine;
pub mod loader;
pub mod registry;
pub mod table;

mod executor;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use engine::Engine;
pub use loader::{Loaded, MockedDatapoint, load};
pub use registry::{MockRegistry, MockSpec};
pub use table::{DatapointEntry, DatapointTable};
