//! `vmock-broker` — the boundary to the external data source.
//!
//! The engine is a library, not a network service; everything it needs from
//! the outside world is captured by the [`DataBroker`] trait: metadata
//! resolution, a subscription feed of [`Event`](vmock_core::Event)s, and a
//! "set current value" publish call.  Transport concerns (gRPC, retries,
//! reconnection) live entirely behind implementations of this trait.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`metadata`] | `Metadata`, `EntryKind`                               |
//! | [`broker`]   | `DataBroker` trait, `BrokerError`, `BrokerResult`     |
//! | [`loopback`] | `LoopbackBroker` — in-memory broker for tests/demos   |

pub mod broker;
pub mod loopback;
pub mod metadata;


pub use broker::{BrokerError, BrokerResult, DataBroker};
pub use loopback::LoopbackBroker;
pub use metadata::{EntryKind, Metadata};
