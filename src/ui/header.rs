use crate::bridge::ConnectionState;
use crate::ui::theme::{
    GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, NIXIE_LIT, STATUS_ERROR, STATUS_OK,
    STATUS_PENDING,
};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header<'a> {
    connection: &'a ConnectionState,
}

impl<'a> Header<'a> {
    pub fn new(connection: &'a ConnectionState) -> Self {
        Self { connection }
    }

    pub fn widget(&self) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let title_style = Style::default().fg(NIXIE_LIT).add_modifier(Modifier::BOLD);
        let status_style = Style::default().fg(status_color(self.connection));
        let line = Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled("DIVERGENCE METER", title_style),
            Span::styled("  │  ", separator_style),
            Span::styled("NET STATUS: [", text_style),
            Span::styled(self.connection.to_string(), status_style),
            Span::styled("]", text_style),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

fn status_color(state: &ConnectionState) -> Color {
    match state {
        ConnectionState::Connected => STATUS_OK,
        ConnectionState::Connecting => STATUS_PENDING,
        ConnectionState::Disconnected | ConnectionState::Error(_) => STATUS_ERROR,
    }
}
