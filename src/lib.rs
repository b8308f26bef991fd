pub mod bridge;
pub mod cli;
pub mod config;
pub mod logging;
pub mod meter;
pub mod mvi;
pub mod shutdown;
pub mod ui;
