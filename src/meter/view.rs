//! Read-only projection handed to the renderer.

use super::format::DISPLAY_WIDTH;
use super::state::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Digit,
    DecimalMarker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub kind: CellKind,
    /// Final character, as opposed to one still in flux.
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeterView {
    pub phase: Phase,
    pub cells: [Cell; DISPLAY_WIDTH],
    /// False while shuffling or settling.
    pub scan_enabled: bool,
    pub scan_requested: bool,
}

impl MeterView {
    pub fn text(&self) -> String {
        self.cells.iter().map(|cell| cell.ch).collect()
    }

    pub fn locked_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.kind == CellKind::Digit && cell.locked)
            .count()
    }
}
