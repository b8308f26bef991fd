//! Transition table for the reveal animation.
//!
//! ```text
//!            RequestScan / PhaseChanged(SHUFFLE)
//!   IDLE ─────────────────────────────────────────→ SHUFFLE
//!    ↑                                                 │ TargetAnnounced
//!    │ PhaseChanged(IDLE)                              ↓
//!   any ←──────────────── RESULT ←──── last lock ── SETTLING ⟲ LockTick
//! ```
//!
//! `TargetAnnounced` and phase changes are accepted from every stage and
//! always start a new episode. Ticks only act in the stages that own the
//! matching timer and are no-ops elsewhere.

use crate::mvi::Reducer;

use super::display::TargetValue;
use super::intent::MeterIntent;
use super::lock_set::{digit_positions, LockSet};
use super::state::{MeterState, Phase, Stage};

pub struct MeterReducer;

impl Reducer for MeterReducer {
    type State = MeterState;
    type Intent = MeterIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            MeterIntent::RequestScan => match state.stage {
                Stage::Idle | Stage::Result => state.enter(Stage::Shuffle {
                    scan_requested: true,
                }),
                // Scan control is disabled while animating.
                Stage::Shuffle { .. } | Stage::Settling { .. } => state,
            },

            MeterIntent::PhaseChanged(phase) => match phase {
                Phase::Idle => state.enter(Stage::Idle),
                Phase::Shuffle => {
                    let scan_requested = state.scan_requested();
                    state.enter(Stage::Shuffle { scan_requested })
                }
                Phase::Settling => state.enter(Stage::Settling {
                    locks: LockSet::new(),
                }),
                Phase::Result => state.enter(Stage::Result),
            },

            MeterIntent::TargetAnnounced { raw } => {
                let mut state = state;
                state.target = TargetValue::parse(&raw);
                state.enter(Stage::Settling {
                    locks: LockSet::new(),
                })
            }

            MeterIntent::ShuffleTick { draws } => match state.stage {
                Stage::Shuffle { .. } => {
                    let mut state = state;
                    for (idx, ch) in draws.iter().enumerate() {
                        state.shown.set_digit(idx, *ch);
                    }
                    state
                }
                Stage::Settling { locks } => {
                    let mut state = state;
                    for idx in digit_positions() {
                        let ch = if locks.contains(idx) {
                            state.target.char_at(idx)
                        } else {
                            draws.get(idx).copied()
                        };
                        if let Some(ch) = ch {
                            state.shown.set_digit(idx, ch);
                        }
                    }
                    state
                }
                Stage::Idle | Stage::Result => state,
            },

            MeterIntent::LockTick { pick } => match state.stage {
                Stage::Settling { mut locks } => {
                    let remaining: Vec<usize> = locks.remaining().collect();
                    if remaining.is_empty() {
                        return state.enter(Stage::Result);
                    }
                    let idx = remaining[pick % remaining.len()];
                    locks.insert(idx);
                    if locks.is_full() {
                        return state.enter(Stage::Result);
                    }
                    let mut state = state;
                    if let Some(ch) = state.target.char_at(idx) {
                        state.shown.set_digit(idx, ch);
                    }
                    state.stage = Stage::Settling { locks };
                    state
                }
                Stage::Idle | Stage::Shuffle { .. } | Stage::Result => state,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meter::format::DISPLAY_WIDTH;
    use crate::meter::lock_set::DIGIT_COUNT;

    fn settling(target: &str) -> MeterState {
        MeterReducer::reduce(
            MeterState::default(),
            MeterIntent::TargetAnnounced {
                raw: target.to_string(),
            },
        )
    }

    #[test]
    fn request_scan_from_idle_enters_requested_shuffle() {
        let state = MeterReducer::reduce(MeterState::default(), MeterIntent::RequestScan);
        assert_eq!(
            state.stage,
            Stage::Shuffle {
                scan_requested: true
            }
        );
        assert_eq!(state.episode, 1);
    }

    #[test]
    fn request_scan_while_settling_is_noop() {
        let state = settling("2.123456");
        let episode = state.episode;
        let state = MeterReducer::reduce(state, MeterIntent::RequestScan);
        assert_eq!(state.phase(), Phase::Settling);
        assert_eq!(state.episode, episode);
    }

    #[test]
    fn upstream_shuffle_keeps_pending_request() {
        let state = MeterReducer::reduce(MeterState::default(), MeterIntent::RequestScan);
        let state = MeterReducer::reduce(state, MeterIntent::PhaseChanged(Phase::Shuffle));
        assert!(state.scan_requested());
        assert_eq!(state.episode, 2);
    }

    #[test]
    fn target_clears_request_and_locks() {
        let state = MeterReducer::reduce(MeterState::default(), MeterIntent::RequestScan);
        let state = MeterReducer::reduce(
            state,
            MeterIntent::TargetAnnounced {
                raw: "2.123456".to_string(),
            },
        );
        assert!(!state.scan_requested());
        assert_eq!(state.locks().map(LockSet::len), Some(0));
        assert_eq!(state.target.to_string(), "2.123456");
    }

    #[test]
    fn shuffle_tick_randomizes_all_digits_but_marker() {
        let state = MeterReducer::reduce(MeterState::default(), MeterIntent::RequestScan);
        let state = MeterReducer::reduce(
            state,
            MeterIntent::ShuffleTick {
                draws: ['9', 'x', '8', '7', '6', '5', '4', '3'],
            },
        );
        assert_eq!(state.shown.to_string(), "9.876543");
    }

    #[test]
    fn shuffle_tick_respects_locks() {
        let state = settling("2.123456");
        let state = MeterReducer::reduce(state, MeterIntent::LockTick { pick: 0 });
        let state = MeterReducer::reduce(
            state,
            MeterIntent::ShuffleTick {
                draws: ['9'; DISPLAY_WIDTH],
            },
        );
        assert_eq!(state.shown.to_string(), "2.999999");
    }

    #[test]
    fn shuffle_tick_in_idle_is_ignored() {
        let state = MeterReducer::reduce(
            MeterState::default(),
            MeterIntent::ShuffleTick {
                draws: ['5'; DISPLAY_WIDTH],
            },
        );
        assert_eq!(state, MeterState::default());
    }

    #[test]
    fn lock_ticks_converge_to_result() {
        let mut state = settling("2.123456");
        for tick in 1..DIGIT_COUNT {
            state = MeterReducer::reduce(state, MeterIntent::LockTick { pick: 3 });
            assert_eq!(state.locks().map(LockSet::len), Some(tick));
        }
        let episode = state.episode;
        state = MeterReducer::reduce(state, MeterIntent::LockTick { pick: 3 });
        assert_eq!(state.phase(), Phase::Result);
        assert_eq!(state.episode, episode + 1);
        assert_eq!(state.shown.to_string(), "2.123456");
    }

    #[test]
    fn lock_tick_reveals_position_immediately() {
        let state = settling("2.123456");
        let state = MeterReducer::reduce(state, MeterIntent::LockTick { pick: 1 });
        // remaining[1] is position 2
        assert_eq!(state.shown.char_at(2), Some('1'));
        assert!(state.is_locked(2));
    }

    #[test]
    fn lock_tick_with_nothing_left_goes_to_result() {
        let mut locks = LockSet::new();
        for idx in digit_positions() {
            locks.insert(idx);
        }
        let mut state = settling("3.141593");
        state.stage = Stage::Settling { locks };
        let state = MeterReducer::reduce(state, MeterIntent::LockTick { pick: 0 });
        assert_eq!(state.phase(), Phase::Result);
        assert_eq!(state.shown.to_string(), "3.141593");
    }

    #[test]
    fn repeated_target_restarts_lock_set() {
        let state = settling("2.123456");
        let state = MeterReducer::reduce(state, MeterIntent::LockTick { pick: 0 });
        let state = MeterReducer::reduce(state, MeterIntent::LockTick { pick: 0 });
        assert_eq!(state.locks().map(LockSet::len), Some(2));
        let state = MeterReducer::reduce(
            state,
            MeterIntent::TargetAnnounced {
                raw: "2.123456".to_string(),
            },
        );
        assert_eq!(state.locks().map(LockSet::len), Some(0));
    }

    #[test]
    fn idle_mid_settling_restores_target() {
        let state = settling("2.123456");
        let state = MeterReducer::reduce(
            state,
            MeterIntent::ShuffleTick {
                draws: ['0'; DISPLAY_WIDTH],
            },
        );
        let state = MeterReducer::reduce(state, MeterIntent::PhaseChanged(Phase::Idle));
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.shown.to_string(), "2.123456");
    }

    #[test]
    fn settling_phase_without_target_uses_stored_one() {
        let state = MeterState::with_initial(TargetValue::parse("1.048596"));
        let state = MeterReducer::reduce(state, MeterIntent::PhaseChanged(Phase::Settling));
        assert_eq!(state.locks().map(LockSet::len), Some(0));
        assert_eq!(state.target.to_string(), "1.048596");
    }

    #[test]
    fn malformed_target_settles_on_fallback() {
        let state = settling("abc");
        assert_eq!(state.target.to_string(), "0.000000");
    }
}
