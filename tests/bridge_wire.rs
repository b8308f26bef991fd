//! Wire codec and channel bridge, exercised from outside the crate.

use divergence_meter::bridge::wire::{decode, encode, WireMessage};
use divergence_meter::bridge::{
    BridgeError, EventBridge, EventChannel, InboundEvent, OutboundEvent,
};
use divergence_meter::meter::Phase;

#[test]
fn upstream_session_transcript_decodes_in_order() {
    let transcript = [
        r#"{"event":"change_phase","data":"SHUFFLE"}"#,
        r#"{"event":"start_settling","data":{"target":"0.409431"}}"#,
        r#"{"event":"change_phase","data":"RESULT"}"#,
        r#"{"event":"nao_event","data":{"message":"person","text":"Subject detected.","face_count":1,"session_id":"default"}}"#,
    ];
    let events: Vec<InboundEvent> = transcript
        .iter()
        .map(|line| decode(line).expect("decode"))
        .collect();
    assert_eq!(
        events,
        vec![
            InboundEvent::PhaseChanged(Phase::Shuffle),
            InboundEvent::TargetAnnounced("0.409431".to_string()),
            InboundEvent::PhaseChanged(Phase::Result),
            InboundEvent::Signal {
                text: Some("Subject detected.".to_string())
            },
        ]
    );
}

#[test]
fn null_target_becomes_empty_text() {
    let event = decode(r#"{"event":"start_settling","data":{"target":null}}"#).expect("decode");
    assert_eq!(event, InboundEvent::TargetAnnounced(String::new()));
}

#[test]
fn bad_phase_reports_the_offending_name() {
    let err = decode(r#"{"event":"change_phase","data":"TIMELEAP"}"#).unwrap_err();
    assert!(matches!(err, BridgeError::UnknownPhase(_)));
    assert!(err.to_string().contains("TIMELEAP"));
}

#[test]
fn request_scan_encodes_without_data() {
    let line = encode(OutboundEvent::RequestScan).expect("encode");
    let message: WireMessage = serde_json::from_str(&line).expect("parse back");
    assert_eq!(message, WireMessage::RequestScan);
    assert!(!line.contains("data"));
}

#[tokio::test]
async fn channel_delivers_events_in_order() {
    let (mut handle, link) = EventChannel::new();
    for phase in [Phase::Shuffle, Phase::Settling, Phase::Result] {
        link.emit(InboundEvent::PhaseChanged(phase))
            .await
            .expect("emit");
    }
    drop(link);

    let mut received = Vec::new();
    while let Some(event) = handle.next_event().await {
        received.push(event);
    }
    assert_eq!(
        received,
        vec![
            InboundEvent::PhaseChanged(Phase::Shuffle),
            InboundEvent::PhaseChanged(Phase::Settling),
            InboundEvent::PhaseChanged(Phase::Result),
        ]
    );
}
