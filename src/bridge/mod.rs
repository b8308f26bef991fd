//! Event bridge between the meter and whatever drives it upstream.
//!
//! The UI loop only sees [`EventBridge`]: a stream of [`InboundEvent`]s and
//! a way to publish [`OutboundEvent`]s. Transports (TCP, the local
//! simulator, tests) sit on the other side of an [`EventChannel`].

mod channel;
pub mod simulator;
pub mod tcp;
pub mod wire;

use std::fmt;
use std::future::Future;

use thiserror::Error;

use crate::meter::{Phase, UnknownPhase};

pub use channel::{BridgeHandle, BridgeLink, EventChannel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    Disconnected,
    Error(String),
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Connecting => f.write_str("Connecting"),
            ConnectionState::Connected => f.write_str("Connected"),
            ConnectionState::Disconnected => f.write_str("Disconnected"),
            ConnectionState::Error(_) => f.write_str("Connection Error"),
        }
    }
}

/// Notifications flowing from upstream into the meter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    PhaseChanged(Phase),
    /// Raw reading; normalized by the meter.
    TargetAnnounced(String),
    /// Upstream detected a subject. Optional text for the message box.
    Signal { text: Option<String> },
    /// Advisory only, never touches the animation.
    Connection(ConnectionState),
}

/// Requests flowing from the meter to upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundEvent {
    RequestScan,
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("event bridge disconnected")]
    Disconnected,

    #[error("event bridge queue is full")]
    Backpressure,

    #[error("failed to decode upstream message: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    UnknownPhase(#[from] UnknownPhase),

    #[error("upstream io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Subscribe/publish capability the meter runtime depends on.
pub trait EventBridge: Send {
    /// Next inbound event, or `None` once upstream is gone for good.
    fn next_event(&mut self) -> impl Future<Output = Option<InboundEvent>> + Send;

    /// Queue an event for upstream without waiting.
    fn publish(&self, event: OutboundEvent) -> Result<(), BridgeError>;
}
