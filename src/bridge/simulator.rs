//! Local stand-in for the upstream scanner.
//!
//! Answers every scan request the way the real backend does: announce the
//! shuffle, think for a while, then settle on a reading. Every so often the
//! reading lands exactly on the Steins;Gate world line.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{BridgeLink, ConnectionState, InboundEvent, OutboundEvent};
use crate::meter::{Phase, PRECISION};
use crate::shutdown::ShutdownHandle;

pub const STEINS_GATE: &str = "1.048596";

/// Upper bound of ordinary readings.
const READING_CEILING: f64 = 1.048596;

/// Simulator seed for a run seeded with `seed`. The meter draws from `seed`
/// itself, so the two streams must not coincide.
pub fn run_seed(seed: u64) -> u64 {
    seed.wrapping_add(1)
}

pub struct Simulator<R = StdRng> {
    scan_delay: Duration,
    steins_gate_chance: f64,
    rng: R,
}

impl Simulator<StdRng> {
    pub fn new(scan_delay: Duration, steins_gate_chance: f64) -> Self {
        Self::with_rng(scan_delay, steins_gate_chance, StdRng::from_entropy())
    }

    pub fn seeded(scan_delay: Duration, steins_gate_chance: f64, seed: u64) -> Self {
        Self::with_rng(scan_delay, steins_gate_chance, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulator<R> {
    /// `steins_gate_chance` is clamped to `[0, 1]`; NaN counts as zero.
    pub fn with_rng(scan_delay: Duration, steins_gate_chance: f64, rng: R) -> Self {
        let steins_gate_chance = if steins_gate_chance.is_nan() {
            0.0
        } else {
            steins_gate_chance.clamp(0.0, 1.0)
        };
        Self {
            scan_delay,
            steins_gate_chance,
            rng,
        }
    }

    /// Next reading, already in canonical form.
    pub fn reading(&mut self) -> String {
        if self.rng.gen_bool(self.steins_gate_chance) {
            return STEINS_GATE.to_string();
        }
        let value = self.rng.gen_range(0.0..=READING_CEILING);
        format!("{:.*}", PRECISION, value)
    }

    /// Serve scan requests until shutdown or until the meter side of `link`
    /// is dropped.
    pub async fn run(mut self, mut link: BridgeLink, shutdown: ShutdownHandle) {
        if link
            .emit(InboundEvent::Connection(ConnectionState::Connected))
            .await
            .is_err()
        {
            return;
        }
        tracing::info!("simulated upstream ready");

        loop {
            let request = tokio::select! {
                request = link.next_request() => request,
                _ = shutdown.wait() => break,
            };
            match request {
                Some(OutboundEvent::RequestScan) => {
                    tracing::info!("scan requested, shuffling");
                    if link
                        .emit(InboundEvent::PhaseChanged(Phase::Shuffle))
                        .await
                        .is_err()
                    {
                        break;
                    }
                    tokio::select! {
                        _ = tokio::time::sleep(self.scan_delay) => {}
                        _ = shutdown.wait() => break,
                    }
                    let target = self.reading();
                    tracing::info!(%target, "scan complete");
                    if link
                        .emit(InboundEvent::TargetAnnounced(target))
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                None => break,
            }
        }
    }
}
