//! Terminal renderer.
//!
//! Purely presentational: the app model forwards keys and bridge events to
//! the reveal machine and the render pass draws whatever its view says.

pub mod app;
pub mod events;
pub mod footer;
pub mod header;
pub mod input;
pub mod layout;
pub mod meter_widget;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;

pub use runtime::run;
