//! Timer handle set owned by the reveal machine.
//!
//! Timers are plain deadlines, not spawned tasks: nothing fires unless the
//! owner is awaiting [`TimerSet::next`], and [`TimerSet::rearm`] replaces
//! both handles in one step. A tick from a replaced timer has nowhere to
//! come from.

use std::time::Duration;

use tokio::time::Instant;

use super::state::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeterTiming {
    /// Period of the shuffle ticker.
    pub shuffle_period: Duration,
    /// Period of the lock scheduler.
    pub lock_period: Duration,
}

impl Default for MeterTiming {
    fn default() -> Self {
        Self {
            shuffle_period: Duration::from_millis(30),
            lock_period: Duration::from_millis(400),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Shuffle,
    Lock,
}

/// Which timers a stage runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerPlan {
    pub shuffle: bool,
    pub lock: bool,
}

impl TimerPlan {
    pub fn for_stage(stage: &Stage) -> Self {
        match stage {
            Stage::Idle | Stage::Result => Self::default(),
            Stage::Shuffle { .. } => Self {
                shuffle: true,
                lock: false,
            },
            Stage::Settling { .. } => Self {
                shuffle: true,
                lock: true,
            },
        }
    }
}

#[derive(Debug)]
struct Ticker {
    period: Duration,
    deadline: Instant,
}

impl Ticker {
    fn start(period: Duration) -> Self {
        Self {
            period,
            deadline: Instant::now() + period,
        }
    }

    /// Schedule the next firing. Missed periods are skipped, not replayed.
    fn advance(&mut self) {
        let now = Instant::now();
        self.deadline += self.period;
        if self.deadline <= now {
            self.deadline = now + self.period;
        }
    }
}

#[derive(Debug)]
pub struct TimerSet {
    timing: MeterTiming,
    shuffle: Option<Ticker>,
    lock: Option<Ticker>,
}

impl TimerSet {
    pub fn new(timing: MeterTiming) -> Self {
        Self {
            timing,
            shuffle: None,
            lock: None,
        }
    }

    /// Cancel everything, then arm what `plan` asks for.
    pub fn rearm(&mut self, plan: TimerPlan) {
        self.cancel_all();
        if plan.shuffle {
            self.shuffle = Some(Ticker::start(self.timing.shuffle_period));
        }
        if plan.lock {
            self.lock = Some(Ticker::start(self.timing.lock_period));
        }
    }

    pub fn cancel_all(&mut self) {
        self.shuffle = None;
        self.lock = None;
    }

    pub fn active(&self) -> usize {
        usize::from(self.shuffle.is_some()) + usize::from(self.lock.is_some())
    }

    pub fn plan(&self) -> TimerPlan {
        TimerPlan {
            shuffle: self.shuffle.is_some(),
            lock: self.lock.is_some(),
        }
    }

    /// Wait for the earliest armed timer and report which one fired.
    ///
    /// Pending forever when nothing is armed. Cancel safe: a dropped call
    /// leaves both deadlines untouched.
    pub async fn next(&mut self) -> TimerKind {
        let Some((kind, deadline)) = self.earliest() else {
            return std::future::pending::<TimerKind>().await;
        };
        tokio::time::sleep_until(deadline).await;
        let ticker = match kind {
            TimerKind::Shuffle => self.shuffle.as_mut(),
            TimerKind::Lock => self.lock.as_mut(),
        };
        if let Some(ticker) = ticker {
            ticker.advance();
        }
        kind
    }

    fn earliest(&self) -> Option<(TimerKind, Instant)> {
        let shuffle = self
            .shuffle
            .as_ref()
            .map(|ticker| (TimerKind::Shuffle, ticker.deadline));
        let lock = self
            .lock
            .as_ref()
            .map(|ticker| (TimerKind::Lock, ticker.deadline));
        match (shuffle, lock) {
            (Some(s), Some(l)) => Some(if l.1 < s.1 { l } else { s }),
            (s, l) => s.or(l),
        }
    }
}
