use crate::bridge::OutboundEvent;
use crate::ui::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Applies a key to the app. Returns a request to publish upstream, if any.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<OutboundEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if is_ctrl_char(key, 'c') || matches!(key.code, KeyCode::Esc) {
        app.request_quit();
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.request_quit();
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('s') | KeyCode::Char('S') => {
            app.request_scan()
        }
        _ => None,
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
