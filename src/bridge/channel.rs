use std::future::Future;

use tokio::sync::mpsc;

use super::{BridgeError, EventBridge, InboundEvent, OutboundEvent};

const BRIDGE_BUFFER: usize = 64;

/// In-memory bridge: the meter side gets a [`BridgeHandle`], the transport
/// side gets a [`BridgeLink`].
pub struct EventChannel;

impl EventChannel {
    pub fn new() -> (BridgeHandle, BridgeLink) {
        let (event_tx, event_rx) = mpsc::channel(BRIDGE_BUFFER);
        let (request_tx, request_rx) = mpsc::channel(BRIDGE_BUFFER);
        (
            BridgeHandle {
                events: event_rx,
                requests: request_tx,
            },
            BridgeLink {
                events: event_tx,
                requests: request_rx,
            },
        )
    }
}

pub struct BridgeHandle {
    events: mpsc::Receiver<InboundEvent>,
    requests: mpsc::Sender<OutboundEvent>,
}

impl EventBridge for BridgeHandle {
    fn next_event(&mut self) -> impl Future<Output = Option<InboundEvent>> + Send {
        self.events.recv()
    }

    fn publish(&self, event: OutboundEvent) -> Result<(), BridgeError> {
        self.requests.try_send(event).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => BridgeError::Backpressure,
            mpsc::error::TrySendError::Closed(_) => BridgeError::Disconnected,
        })
    }
}

/// Transport side of an [`EventChannel`].
///
/// Fields are public so a transport can await `requests` and send on
/// `events` from the same `select!`.
pub struct BridgeLink {
    pub events: mpsc::Sender<InboundEvent>,
    pub requests: mpsc::Receiver<OutboundEvent>,
}

impl BridgeLink {
    pub async fn emit(&self, event: InboundEvent) -> Result<(), BridgeError> {
        self.events
            .send(event)
            .await
            .map_err(|_| BridgeError::Disconnected)
    }

    pub async fn next_request(&mut self) -> Option<OutboundEvent> {
        self.requests.recv().await
    }
}
