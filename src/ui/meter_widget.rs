//! Nixie-tube rendering of the meter.
//!
//! Every digit cell is a 3x5 block glyph. Segments of a ghost `8` that the
//! current digit does not light are drawn dim behind it, the way an unlit
//! cathode shows through the glass.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use crate::meter::{Cell, CellKind, MeterView};
use crate::ui::layout::centered_rect_by_size;
use crate::ui::theme::{GLITCH, NIXIE_FLUX, NIXIE_GHOST, NIXIE_LIT};

pub const GLYPH_WIDTH: u16 = 3;
pub const GLYPH_HEIGHT: u16 = 5;
const MARKER_WIDTH: u16 = 1;
const GAP: u16 = 1;
const SEGMENT: &str = "█";

/// Rows of each digit glyph, most significant bit is the left column.
const GLYPHS: [[u8; GLYPH_HEIGHT as usize]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b001, 0b001, 0b001, 0b001, 0b001],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b001, 0b001, 0b001],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

const GHOST: [u8; GLYPH_HEIGHT as usize] = GLYPHS[8];
const BLANK: [u8; GLYPH_HEIGHT as usize] = [0; GLYPH_HEIGHT as usize];

pub fn glyph(ch: char) -> [u8; GLYPH_HEIGHT as usize] {
    ch.to_digit(10)
        .map(|digit| GLYPHS[digit as usize])
        .unwrap_or(BLANK)
}

pub struct MeterWidget<'a> {
    view: &'a MeterView,
    glitch: bool,
}

impl<'a> MeterWidget<'a> {
    pub fn new(view: &'a MeterView) -> Self {
        Self {
            view,
            glitch: false,
        }
    }

    pub fn glitch(mut self, glitch: bool) -> Self {
        self.glitch = glitch;
        self
    }

    /// Columns needed for the full glyph rendering.
    pub fn full_width(&self) -> u16 {
        let cells: u16 = self.view.cells.iter().map(|cell| cell_width(cell.kind)).sum();
        let gaps = GAP * (self.view.cells.len() as u16).saturating_sub(1);
        cells + gaps
    }

    fn lit_style(&self, cell: &Cell) -> Style {
        if self.glitch {
            return Style::default().fg(GLITCH).add_modifier(Modifier::BOLD);
        }
        if cell.locked {
            Style::default().fg(NIXIE_LIT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(NIXIE_FLUX)
        }
    }

    fn render_text(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let text = self.view.text();
        let target = centered_rect_by_size(area, text.chars().count() as u16, 1);
        for (offset, cell) in self.view.cells.iter().enumerate() {
            let x = target.x + offset as u16;
            if x >= target.x + target.width {
                break;
            }
            if let Some(slot) = buf.cell_mut((x, target.y)) {
                slot.set_char(cell.ch).set_style(self.lit_style(cell));
            }
        }
    }

    fn render_glyph(&self, cell: &Cell, x: u16, y: u16, buf: &mut Buffer) {
        let lit = self.lit_style(cell);
        let ghost = Style::default().fg(NIXIE_GHOST);
        let rows = glyph(cell.ch);
        for row in 0..GLYPH_HEIGHT {
            // Odd rows tear sideways while glitching.
            let shift = u16::from(self.glitch && row % 2 == 1);
            for col in 0..GLYPH_WIDTH {
                let bit = 1 << (GLYPH_WIDTH - 1 - col);
                let style = if rows[row as usize] & bit != 0 {
                    lit
                } else if GHOST[row as usize] & bit != 0 {
                    ghost
                } else {
                    continue;
                };
                if let Some(slot) = buf.cell_mut((x + col + shift, y + row)) {
                    slot.set_symbol(SEGMENT).set_style(style);
                }
            }
        }
    }
}

fn cell_width(kind: CellKind) -> u16 {
    match kind {
        CellKind::Digit => GLYPH_WIDTH,
        CellKind::DecimalMarker => MARKER_WIDTH,
    }
}

impl Widget for MeterWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = self.full_width();
        // One spare column for the glitch tear.
        if area.width < width + 1 || area.height < GLYPH_HEIGHT {
            self.render_text(area, buf);
            return;
        }

        let target = centered_rect_by_size(area, width, GLYPH_HEIGHT);
        let mut x = target.x;
        for cell in &self.view.cells {
            match cell.kind {
                CellKind::Digit => self.render_glyph(cell, x, target.y, buf),
                CellKind::DecimalMarker => {
                    let y = target.y + GLYPH_HEIGHT - 1;
                    if let Some(slot) = buf.cell_mut((x, y)) {
                        slot.set_symbol(SEGMENT).set_style(self.lit_style(cell));
                    }
                }
            }
            x += cell_width(cell.kind) + GAP;
        }
    }
}
