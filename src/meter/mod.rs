//! Digit-reveal animation.
//!
//! # Architecture
//!
//! - `format.rs` - canonical fixed-width readings (fallback on bad input)
//! - `random.rs` - random digits, lock picks and decorative world lines
//! - `display.rs` / `lock_set.rs` - displayed characters, finalized positions
//! - `state.rs` / `intent.rs` / `reducer.rs` - MVI state and transition table
//! - `timers.rs` - shuffle ticker and lock scheduler as one handle set
//! - `machine.rs` - owner of state, timers and randomness
//! - `view.rs` - read-only projection for the renderer

mod display;
mod format;
mod intent;
mod lock_set;
mod machine;
mod random;
mod reducer;
mod state;
mod timers;
mod view;

pub use display::{DisplayValue, TargetValue};
pub use format::{canonical, DECIMAL_INDEX, DECIMAL_MARKER, DISPLAY_WIDTH, FALLBACK, PRECISION};
pub use intent::MeterIntent;
pub use lock_set::{digit_positions, LockSet, DIGIT_COUNT};
pub use machine::RevealMachine;
pub use random::{DigitSource, WORLD_LINE_RANGE};
pub use reducer::MeterReducer;
pub use state::{MeterState, Phase, Stage, UnknownPhase};
pub use timers::{MeterTiming, TimerKind, TimerPlan, TimerSet};
pub use view::{Cell, CellKind, MeterView};
