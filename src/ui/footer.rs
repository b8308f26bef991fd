use crate::meter::{MeterView, Phase, DIGIT_COUNT};
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, NIXIE_LIT};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const SCAN_HINTS: &str = " Enter/Space/S: Scan │ Q/Esc: Quit";
const BUSY_HINTS: &str = " Scanning... │ Q/Esc: Quit";
const LOCKED_MARK: char = '■';
const OPEN_MARK: char = '□';

/// Key hints on the left, lock progress and version on the right.
pub struct Footer {
    phase: Phase,
    locked: usize,
    scan_enabled: bool,
}

impl Footer {
    pub fn new(view: &MeterView) -> Self {
        Self {
            phase: view.phase,
            locked: view.locked_count(),
            scan_enabled: view.scan_enabled,
        }
    }

    pub fn hints(&self) -> &'static str {
        if self.scan_enabled {
            SCAN_HINTS
        } else {
            BUSY_HINTS
        }
    }

    /// Lock gauge, empty before the first settling episode.
    pub fn progress(&self) -> String {
        match self.phase {
            Phase::Settling | Phase::Result => {
                let locked = self.locked.min(DIGIT_COUNT);
                let mut gauge = String::from("LOCK ");
                gauge.extend(std::iter::repeat(LOCKED_MARK).take(locked));
                gauge.extend(std::iter::repeat(OPEN_MARK).take(DIGIT_COUNT - locked));
                gauge.push_str(" │ ");
                gauge
            }
            Phase::Idle | Phase::Shuffle => String::new(),
        }
    }

    pub fn widget(&self, area: Rect) -> Paragraph<'static> {
        let hints = self.hints();
        let progress = self.progress();
        let version = format!("v{} ", VERSION);

        // Char count, not bytes: the gauge marks are multi-byte.
        let used = hints.chars().count() + progress.chars().count() + version.chars().count();
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width.saturating_sub(used);

        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);

        let line = Line::from(vec![
            Span::styled(hints, text_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(progress, Style::default().fg(NIXIE_LIT)),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}
