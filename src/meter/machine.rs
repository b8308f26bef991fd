use rand::rngs::StdRng;
use rand::Rng;

use crate::bridge::OutboundEvent;
use crate::mvi::Reducer;

use super::display::TargetValue;
use super::intent::MeterIntent;
use super::random::DigitSource;
use super::reducer::MeterReducer;
use super::state::{MeterState, Phase};
use super::timers::{MeterTiming, TimerKind, TimerPlan, TimerSet};
use super::view::MeterView;

/// Reveal state machine.
///
/// Owns the meter state, the timer handle set and the digit source. Every
/// mutation goes through [`MeterReducer`]; whenever the reducer starts a new
/// episode the whole timer set is re-armed for the new stage before anything
/// else can observe it.
pub struct RevealMachine<R = StdRng> {
    state: MeterState,
    timers: TimerSet,
    digits: DigitSource<R>,
}

impl<R: Rng> RevealMachine<R> {
    pub fn with_source(timing: MeterTiming, initial: TargetValue, digits: DigitSource<R>) -> Self {
        Self {
            state: MeterState::with_initial(initial),
            timers: TimerSet::new(timing),
            digits,
        }
    }

    pub fn state(&self) -> &MeterState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn view(&self) -> MeterView {
        self.state.view()
    }

    pub fn active_timers(&self) -> usize {
        self.timers.active()
    }

    pub fn timer_plan(&self) -> TimerPlan {
        self.timers.plan()
    }

    /// Local scan request. Returns the event to publish upstream, or `None`
    /// when the meter is already animating.
    pub fn begin_scan(&mut self) -> Option<OutboundEvent> {
        if self.state.is_animating() {
            return None;
        }
        self.dispatch(MeterIntent::RequestScan);
        Some(OutboundEvent::RequestScan)
    }

    pub fn phase_changed(&mut self, phase: Phase) {
        self.dispatch(MeterIntent::PhaseChanged(phase));
    }

    pub fn target_announced(&mut self, raw: &str) {
        self.dispatch(MeterIntent::TargetAnnounced {
            raw: raw.to_string(),
        });
    }

    /// Settle on a decorative world-line reading. Returns the reading.
    pub fn settle_on_world_line(&mut self) -> String {
        let reading = self.digits.world_line();
        self.target_announced(&reading);
        reading
    }

    /// Wait for the next armed timer. Pending forever while idle.
    pub async fn next_timer(&mut self) -> TimerKind {
        self.timers.next().await
    }

    pub fn on_timer(&mut self, kind: TimerKind) {
        let intent = match kind {
            TimerKind::Shuffle => MeterIntent::ShuffleTick {
                draws: self.digits.draw_row(),
            },
            TimerKind::Lock => {
                let remaining = self.state.remaining_locks();
                MeterIntent::LockTick {
                    pick: self.digits.pick(remaining),
                }
            }
        };
        self.dispatch(intent);
    }

    /// Cancel every timer. The state is kept as is.
    pub fn shutdown(&mut self) {
        self.timers.cancel_all();
    }

    fn dispatch(&mut self, intent: MeterIntent) {
        let from = self.state.phase();
        let episode = self.state.episode;
        self.state = MeterReducer::reduce(std::mem::take(&mut self.state), intent);
        if self.state.episode != episode {
            self.timers.rearm(TimerPlan::for_stage(&self.state.stage));
            tracing::debug!(
                from = %from,
                to = %self.state.phase(),
                episode = self.state.episode,
                timers = self.timers.active(),
                "meter transition"
            );
        }
    }
}
