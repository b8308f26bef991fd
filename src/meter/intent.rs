//! Intents for the reveal animation.

use super::format::DISPLAY_WIDTH;
use super::state::Phase;
use crate::mvi::Intent;

#[derive(Debug, Clone)]
pub enum MeterIntent {
    /// Local user asked for a reading.
    RequestScan,

    /// Upstream switched the phase.
    PhaseChanged(Phase),

    /// Upstream announced the reading to settle on. Raw text, normalized by
    /// the reducer.
    TargetAnnounced { raw: String },

    /// Shuffle ticker fired. `draws` holds one random digit per position;
    /// the reducer uses only the ones for unlocked digit positions.
    ShuffleTick { draws: [char; DISPLAY_WIDTH] },

    /// Lock scheduler fired. `pick` indexes the remaining unlocked
    /// positions in display order (taken modulo their count).
    LockTick { pick: usize },
}

impl Intent for MeterIntent {}
