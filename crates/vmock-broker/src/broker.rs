//! The `DataBroker` trait — everything the engine consumes from outside.

use crossbeam_channel::Sender;
use thiserror::Error;

use vmock_core::{Event, Value};

use crate::Metadata;

/// Errors surfaced by a broker implementation.
///
/// The implementation classifies failures; the engine loop only acts on
/// [`is_fatal`](BrokerError::is_fatal) (pause until reconnected) versus
/// transient (log and move on).  The engine never retries internally.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// The connection to the data source is gone.  Fatal: the engine pauses
    /// domain logic until `is_connected` reports true again.
    #[error("connection to data source lost: {0}")]
    ConnectionLost(String),

    /// The broker does not know the requested path.
    #[error("broker does not know path {0:?}")]
    UnknownPath(String),

    /// The broker rejected a call (bad value, permission, …).
    #[error("broker rejected request: {0}")]
    Rejected(String),
}

impl BrokerError {
    /// `true` for errors that mean the connection itself is unusable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BrokerError::ConnectionLost(_))
    }
}

pub type BrokerResult<T> = Result<T, BrokerError>;

/// Contract between the engine and the external data source.
///
/// # Threading
///
/// `subscribe` hands the broker a channel sender; the broker owns whatever
/// thread of execution feeds it (the *subscription bridge*).  That channel
/// is the only structure shared across threads — the engine drains the
/// receiving end at the start of each tick and owns all other state.
pub trait DataBroker: Send + 'static {
    /// Resolve metadata for `paths`.  Paths unknown to the data source are
    /// simply absent from the result; the loader decides how to react.
    fn metadata(&self, paths: &[String]) -> BrokerResult<Vec<Metadata>>;

    /// Start delivering update events for `paths` to `events`.
    ///
    /// Actuator paths yield [`EventKind::ActuatorTarget`] events, everything
    /// else [`EventKind::Value`] events.
    ///
    /// [`EventKind::ActuatorTarget`]: vmock_core::EventKind::ActuatorTarget
    /// [`EventKind::Value`]: vmock_core::EventKind::Value
    fn subscribe(&mut self, paths: &[String], events: Sender<Event>) -> BrokerResult<()>;

    /// Publish the new current value of a mocked datapoint.
    fn publish(&mut self, path: &str, value: Value) -> BrokerResult<()>;

    /// The "still connected" signal consumed by the engine loop.
    fn is_connected(&self) -> bool;
}
