//! Model-View-Intent primitives.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! Reducers never touch timers, randomness sources or the event bridge.
//! Whatever owns the state draws random values up front, dispatches them
//! inside the intent, and performs side effects after inspecting the result.

/// Marker trait for state objects driven by a reducer.
///
/// States must be cheap to move through `std::mem::take`, so `Default` is
/// required.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

/// Marker trait for intents: local actions, upstream notifications and
/// timer firings.
pub trait Intent: Send + 'static {}

/// The only place where state transitions happen.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    /// Pure transition function: (State, Intent) -> State.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
