use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::display::{DisplayValue, TargetValue};
use super::format::DECIMAL_INDEX;
use super::lock_set::LockSet;
use super::view::{Cell, CellKind, MeterView};
use crate::mvi::UiState;

/// Stage of the reveal animation, as named on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Shuffle,
    Settling,
    Result,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "IDLE",
            Phase::Shuffle => "SHUFFLE",
            Phase::Settling => "SETTLING",
            Phase::Result => "RESULT",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown phase '{0}'")]
pub struct UnknownPhase(pub String);

impl FromStr for Phase {
    type Err = UnknownPhase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IDLE" => Ok(Phase::Idle),
            "SHUFFLE" => Ok(Phase::Shuffle),
            "SETTLING" => Ok(Phase::Settling),
            "RESULT" => Ok(Phase::Result),
            _ => Err(UnknownPhase(s.to_string())),
        }
    }
}

/// Phase plus the data that only exists in that phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Display frozen on the stored target.
    Idle,
    /// Every digit in flux. `scan_requested` is set when the local user
    /// asked for this reading and no target has arrived yet.
    Shuffle { scan_requested: bool },
    /// Converging on the target one position at a time.
    Settling { locks: LockSet },
    /// Display frozen on the target after a full reveal.
    Result,
}

impl Stage {
    pub fn phase(&self) -> Phase {
        match self {
            Stage::Idle => Phase::Idle,
            Stage::Shuffle { .. } => Phase::Shuffle,
            Stage::Settling { .. } => Phase::Settling,
            Stage::Result => Phase::Result,
        }
    }
}

/// Full state of the meter.
///
/// `episode` increments every time a stage is entered (including
/// re-entering the same stage), so the owner knows when its timers have to
/// be replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterState {
    pub stage: Stage,
    pub shown: DisplayValue,
    pub target: TargetValue,
    pub episode: u64,
}

impl Default for MeterState {
    fn default() -> Self {
        Self::with_initial(TargetValue::default())
    }
}

impl UiState for MeterState {}

impl MeterState {
    pub fn with_initial(target: TargetValue) -> Self {
        Self {
            stage: Stage::Idle,
            shown: target.as_display(),
            target,
            episode: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.stage.phase()
    }

    pub fn locks(&self) -> Option<&LockSet> {
        match &self.stage {
            Stage::Settling { locks } => Some(locks),
            _ => None,
        }
    }

    pub fn remaining_locks(&self) -> usize {
        self.locks().map_or(0, |locks| locks.remaining().count())
    }

    /// Shuffling or settling: scan initiation is unavailable.
    pub fn is_animating(&self) -> bool {
        matches!(self.stage, Stage::Shuffle { .. } | Stage::Settling { .. })
    }

    pub fn scan_requested(&self) -> bool {
        matches!(
            self.stage,
            Stage::Shuffle {
                scan_requested: true
            }
        )
    }

    /// Whether the character at `index` is final.
    pub fn is_locked(&self, index: usize) -> bool {
        if index == DECIMAL_INDEX {
            return true;
        }
        match &self.stage {
            Stage::Idle | Stage::Result => true,
            Stage::Shuffle { .. } => false,
            Stage::Settling { locks } => locks.contains(index),
        }
    }

    /// Move into `stage`, starting a new episode.
    pub(crate) fn enter(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self.episode = self.episode.wrapping_add(1);
        if matches!(stage, Stage::Idle | Stage::Result) {
            self.shown = self.target.as_display();
        }
        self
    }

    pub fn view(&self) -> MeterView {
        let chars = self.shown.chars();
        let cells = std::array::from_fn(|idx| Cell {
            ch: chars[idx],
            kind: if idx == DECIMAL_INDEX {
                CellKind::DecimalMarker
            } else {
                CellKind::Digit
            },
            locked: self.is_locked(idx),
        });
        MeterView {
            phase: self.phase(),
            cells,
            scan_enabled: !self.is_animating(),
            scan_requested: self.scan_requested(),
        }
    }
}
