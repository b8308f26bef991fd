use std::time::Duration;

use tokio::time::Instant;

use crate::bridge::{BridgeError, ConnectionState, InboundEvent, OutboundEvent};
use crate::config::Config;
use crate::meter::{DigitSource, MeterView, Phase, RevealMachine, TimerKind};

pub const DEFAULT_MESSAGE: &str = "Listening for signal...";
pub const SIGNAL_FALLBACK: &str = "Target confirmed.";

pub struct App {
    should_quit: bool,
    meter: RevealMachine,
    connection: ConnectionState,
    /// Text of the AI message box.
    message: String,
    /// Single-line system status.
    status_log: String,
    glitch_for: Duration,
    glitch_until: Option<Instant>,
}

impl App {
    pub fn new(config: &Config, seed: Option<u64>) -> Self {
        let digits = match seed {
            Some(seed) => DigitSource::seeded(seed),
            None => DigitSource::from_entropy(),
        };
        Self {
            should_quit: false,
            meter: RevealMachine::with_source(
                config.meter.timing(),
                config.meter.initial_target(),
                digits,
            ),
            connection: ConnectionState::Disconnected,
            message: DEFAULT_MESSAGE.to_string(),
            status_log: "System Initialized.".to_string(),
            glitch_for: config.ui.glitch(),
            glitch_until: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn meter(&self) -> &RevealMachine {
        &self.meter
    }

    pub fn view(&self) -> MeterView {
        self.meter.view()
    }

    pub fn connection(&self) -> &ConnectionState {
        &self.connection
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_log(&self) -> &str {
        &self.status_log
    }

    pub fn is_glitching(&self) -> bool {
        self.glitch_until.is_some()
    }

    /// Scan control. Returns the request to publish, or `None` while the
    /// meter is animating.
    pub fn request_scan(&mut self) -> Option<OutboundEvent> {
        let request = self.meter.begin_scan()?;
        tracing::info!("scan requested");
        self.status_log = "Scan requested. Shuffling world lines...".to_string();
        Some(request)
    }

    pub fn on_publish_error(&mut self, err: &BridgeError) {
        tracing::warn!(error = %err, "failed to publish scan request");
        self.status_log = format!("Error: {err}");
    }

    pub fn on_inbound(&mut self, event: InboundEvent) {
        match event {
            InboundEvent::PhaseChanged(phase) => {
                self.meter.phase_changed(phase);
                if phase == Phase::Shuffle {
                    self.status_log = "Upstream scanning...".to_string();
                }
            }
            InboundEvent::TargetAnnounced(raw) => {
                self.meter.target_announced(&raw);
                self.status_log = format!("Settling on {}", self.meter.state().target);
            }
            InboundEvent::Signal { text } => self.on_signal(text),
            InboundEvent::Connection(state) => self.on_connection(state),
        }
    }

    /// Clears an expired glitch flash.
    pub fn on_tick(&mut self) {
        if self
            .glitch_until
            .is_some_and(|until| Instant::now() >= until)
        {
            self.glitch_until = None;
        }
    }

    pub async fn next_timer(&mut self) -> TimerKind {
        self.meter.next_timer().await
    }

    pub fn on_timer(&mut self, kind: TimerKind) {
        self.meter.on_timer(kind);
    }

    pub fn shutdown(&mut self) {
        self.meter.shutdown();
    }

    fn on_signal(&mut self, text: Option<String>) {
        let text = text
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| SIGNAL_FALLBACK.to_string());
        self.glitch_until = Some(Instant::now() + self.glitch_for);
        let reading = self.meter.settle_on_world_line();
        tracing::info!(%reading, "signal detected");
        self.status_log = format!("Signal Detected. AI Response: \"{text}\"");
        self.message = text;
    }

    fn on_connection(&mut self, state: ConnectionState) {
        self.status_log = match &state {
            ConnectionState::Connecting => "Connecting to upstream...".to_string(),
            ConnectionState::Connected => {
                "Connection Established. Waiting for signal...".to_string()
            }
            ConnectionState::Disconnected => "Connection lost.".to_string(),
            ConnectionState::Error(message) => format!("Error: {message}"),
        };
        self.connection = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(&Config::default(), Some(3))
    }

    #[test]
    fn starts_idle_showing_initial_value() {
        let app = app();
        assert_eq!(app.view().text(), "0.000000");
        assert_eq!(app.message(), DEFAULT_MESSAGE);
        assert_eq!(app.connection(), &ConnectionState::Disconnected);
    }

    #[test]
    fn scan_is_refused_while_animating() {
        let mut app = app();
        assert_eq!(app.request_scan(), Some(OutboundEvent::RequestScan));
        assert_eq!(app.request_scan(), None);
    }

    #[test]
    fn connection_error_reaches_status_log() {
        let mut app = app();
        app.on_inbound(InboundEvent::Connection(ConnectionState::Error(
            "refused".to_string(),
        )));
        assert_eq!(app.status_log(), "Error: refused");
        assert_eq!(app.connection().to_string(), "Connection Error");
    }

    #[test]
    fn blank_signal_text_uses_fallback() {
        let mut app = app();
        app.on_inbound(InboundEvent::Signal {
            text: Some("  ".to_string()),
        });
        assert_eq!(app.message(), SIGNAL_FALLBACK);
        assert!(app.is_glitching());
        assert_eq!(app.meter().phase(), Phase::Settling);
    }
}
