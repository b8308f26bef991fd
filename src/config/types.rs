use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::meter::{MeterTiming, TargetValue, FALLBACK};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub meter: MeterConfig,
    pub upstream: UpstreamConfig,
    pub simulator: SimulatorConfig,
    pub ui: UiConfig,
}

/// Reveal animation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterConfig {
    /// Shuffle ticker period in milliseconds (default: 30).
    #[serde(default = "default_shuffle_period_ms")]
    pub shuffle_period_ms: u64,
    /// Lock scheduler period in milliseconds (default: 400).
    #[serde(default = "default_lock_period_ms")]
    pub lock_period_ms: u64,
    /// Reading shown before the first scan.
    #[serde(default = "default_initial_value")]
    pub initial_value: String,
}

impl MeterConfig {
    pub fn timing(&self) -> MeterTiming {
        MeterTiming {
            shuffle_period: Duration::from_millis(self.shuffle_period_ms),
            lock_period: Duration::from_millis(self.lock_period_ms),
        }
    }

    /// Initial reading, normalized like any announced target.
    pub fn initial_target(&self) -> TargetValue {
        TargetValue::parse(&self.initial_value)
    }
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            shuffle_period_ms: default_shuffle_period_ms(),
            lock_period_ms: default_lock_period_ms(),
            initial_value: default_initial_value(),
        }
    }
}

/// Where scan requests go and phase events come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamMode {
    #[default]
    Simulator,
    Tcp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default)]
    pub mode: UpstreamMode,
    /// `host:port` of the JSON-lines upstream (tcp mode only).
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
}

impl UpstreamConfig {
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            mode: UpstreamMode::default(),
            address: default_address(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Time between the shuffle announcement and the target (default: 3000).
    #[serde(default = "default_scan_delay_ms")]
    pub scan_delay_ms: u64,
    /// Probability that a reading is exactly the Steins;Gate world line.
    #[serde(default = "default_steins_gate_chance")]
    pub steins_gate_chance: f64,
}

impl SimulatorConfig {
    pub fn scan_delay(&self) -> Duration {
        Duration::from_millis(self.scan_delay_ms)
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            scan_delay_ms: default_scan_delay_ms(),
            steins_gate_chance: default_steins_gate_chance(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Redraw interval in milliseconds (default: 100).
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Length of the detection glitch flash in milliseconds (default: 500).
    #[serde(default = "default_glitch_ms")]
    pub glitch_ms: u64,
}

impl UiConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn glitch(&self) -> Duration {
        Duration::from_millis(self.glitch_ms)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            glitch_ms: default_glitch_ms(),
        }
    }
}

fn default_shuffle_period_ms() -> u64 {
    30
}

fn default_lock_period_ms() -> u64 {
    400
}

fn default_initial_value() -> String {
    FALLBACK.to_string()
}

fn default_address() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_reconnect_delay_ms() -> u64 {
    2000
}

fn default_scan_delay_ms() -> u64 {
    3000
}

fn default_steins_gate_chance() -> f64 {
    0.2
}

fn default_tick_ms() -> u64 {
    100
}

fn default_glitch_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config: Config = toml::from_str("").expect("parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.meter.timing(), MeterTiming::default());
        assert_eq!(config.upstream.mode, UpstreamMode::Simulator);
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config: Config = toml::from_str(
            r#"
            [upstream]
            mode = "tcp"

            [meter]
            lock_period_ms = 250
            "#,
        )
        .expect("parse");
        assert_eq!(config.upstream.mode, UpstreamMode::Tcp);
        assert_eq!(config.upstream.address, "127.0.0.1:8000");
        assert_eq!(config.meter.lock_period_ms, 250);
        assert_eq!(config.meter.shuffle_period_ms, 30);
    }

    #[test]
    fn initial_value_is_normalized() {
        let meter = MeterConfig {
            initial_value: "1.5".to_string(),
            ..MeterConfig::default()
        };
        assert_eq!(meter.initial_target().to_string(), "1.500000");
    }
}
