//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use divergence_meter::config::Config;
use divergence_meter::meter::{
    DigitSource, MeterTiming, Phase, RevealMachine, TargetValue, TimerKind,
};
use divergence_meter::ui::app::App;
use std::path::PathBuf;
use tempfile::TempDir;

/// Upper bound on timer firings while driving a machine; a full reveal needs
/// far fewer.
pub const MAX_STEPS: usize = 10_000;

pub fn seeded_machine(seed: u64) -> RevealMachine {
    RevealMachine::with_source(
        MeterTiming::default(),
        TargetValue::default(),
        DigitSource::seeded(seed),
    )
}

pub fn test_app() -> App {
    App::new(&Config::default(), Some(42))
}

/// Timer firings observed while driving a machine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub shuffles: usize,
    pub locks: usize,
}

impl Fired {
    fn record(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::Shuffle => self.shuffles += 1,
            TimerKind::Lock => self.locks += 1,
        }
    }
}

/// Fire the next `count` timers, whatever their kind.
pub async fn fire(machine: &mut RevealMachine, count: usize) -> Fired {
    let mut fired = Fired::default();
    for _ in 0..count {
        let kind = machine.next_timer().await;
        fired.record(kind);
        machine.on_timer(kind);
    }
    fired
}

/// Fire timers until the machine leaves the animating phases.
pub async fn run_until_settled(machine: &mut RevealMachine) -> Fired {
    let mut fired = Fired::default();
    for _ in 0..MAX_STEPS {
        if !machine.state().is_animating() {
            return fired;
        }
        let kind = machine.next_timer().await;
        fired.record(kind);
        machine.on_timer(kind);
    }
    panic!("machine still animating after {MAX_STEPS} timer firings");
}

/// Fire timers until `locks` lock ticks have been handled.
pub async fn run_lock_ticks(machine: &mut RevealMachine, locks: usize) -> Fired {
    let mut fired = Fired::default();
    while fired.locks < locks {
        assert!(fired.shuffles < MAX_STEPS, "lock ticks never arrived");
        let kind = machine.next_timer().await;
        fired.record(kind);
        machine.on_timer(kind);
    }
    fired
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn press_key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}
