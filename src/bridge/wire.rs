//! JSON wire format, one message per line.
//!
//! ```text
//! {"event":"change_phase","data":"SHUFFLE"}
//! {"event":"start_settling","data":{"target":"1.048596"}}
//! {"event":"nao_event","data":{"message":"person","text":"Target confirmed.","face_count":1,"session_id":"default"}}
//! {"event":"request_scan"}
//! ```
//!
//! Detection events are also accepted under the short name `signal`. Fields
//! other than `text` are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{BridgeError, InboundEvent, OutboundEvent};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum WireMessage {
    ChangePhase(String),
    StartSettling {
        #[serde(default)]
        target: Value,
    },
    #[serde(rename = "nao_event", alias = "signal")]
    Signal {
        #[serde(default)]
        text: Option<String>,
    },
    RequestScan,
}

/// Decode one upstream line into an inbound event.
pub fn decode(line: &str) -> Result<InboundEvent, BridgeError> {
    let message: WireMessage = serde_json::from_str(line)?;
    match message {
        WireMessage::ChangePhase(phase) => Ok(InboundEvent::PhaseChanged(phase.parse()?)),
        WireMessage::StartSettling { target } => {
            Ok(InboundEvent::TargetAnnounced(target_text(&target)))
        }
        WireMessage::Signal { text } => Ok(InboundEvent::Signal { text }),
        // Echo of our own request from a loopback upstream.
        WireMessage::RequestScan => Err(BridgeError::Decode(serde::de::Error::custom(
            "request_scan is an outbound-only event",
        ))),
    }
}

/// Encode an outbound event as a single line, without the trailing newline.
pub fn encode(event: OutboundEvent) -> Result<String, BridgeError> {
    let message = match event {
        OutboundEvent::RequestScan => WireMessage::RequestScan,
    };
    serde_json::to_string(&message).map_err(BridgeError::Encode)
}

/// Numbers are stringified; anything else is left for the formatter to
/// reject.
fn target_text(target: &Value) -> String {
    match target {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    }
}
