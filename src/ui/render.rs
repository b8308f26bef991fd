use crate::meter::Phase;
use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::layout_regions;
use crate::ui::meter_widget::MeterWidget;
use crate::ui::theme::{
    CONTROL_ACTIVE, CONTROL_DISABLED, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, NIXIE_LIT,
};
use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const SCAN_LABEL: &str = "[ INITIATE SCAN ]";

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let regions = layout_regions(frame.area());
    let view = app.view();

    frame.render_widget(Header::new(app.connection()).widget(), regions.header);
    frame.render_widget(
        MeterWidget::new(&view).glitch(app.is_glitching()),
        regions.meter,
    );

    let control_style = if view.scan_enabled {
        Style::default()
            .fg(CONTROL_ACTIVE)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(CONTROL_DISABLED)
            .add_modifier(Modifier::DIM)
    };
    let control = Line::from(vec![
        Span::styled(SCAN_LABEL, control_style),
        Span::styled(
            format!("  {}", phase_caption(view.phase)),
            Style::default().fg(HEADER_SEPARATOR),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(control).alignment(Alignment::Center),
        regions.control,
    );

    let message = Line::from(vec![
        Span::styled(
            "AI: ",
            Style::default().fg(NIXIE_LIT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.message().to_string(), Style::default().fg(HEADER_TEXT)),
    ]);
    frame.render_widget(
        Paragraph::new(message).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        ),
        regions.message,
    );

    let log = Line::from(vec![
        Span::styled(" > ", Style::default().fg(NIXIE_LIT)),
        Span::styled(
            app.status_log().to_string(),
            Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(log), regions.log);

    let footer = Footer::new(&view);
    frame.render_widget(footer.widget(regions.footer), regions.footer);
}

fn phase_caption(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "standing by",
        Phase::Shuffle => "shuffling",
        Phase::Settling => "settling",
        Phase::Result => "reading locked",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn draws_status_message_and_log() {
        let app = App::new(&Config::default(), Some(1));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("terminal");
        terminal.draw(|frame| draw(frame, &app)).expect("draw");
        let text = screen_text(&terminal);
        assert!(text.contains("NET STATUS: [Disconnected]"));
        assert!(text.contains("AI: Listening for signal..."));
        assert!(text.contains("> System Initialized."));
        assert!(text.contains(SCAN_LABEL));
    }

    #[tokio::test(start_paused = true)]
    async fn footer_tracks_settling_progress() {
        let mut app = App::new(&Config::default(), Some(1));
        app.on_inbound(crate::bridge::InboundEvent::TargetAnnounced(
            "0.571024".to_string(),
        ));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("terminal");
        terminal.draw(|frame| draw(frame, &app)).expect("draw");
        let text = screen_text(&terminal);
        assert!(text.contains("Scanning... │ Q/Esc: Quit"));
        assert!(text.contains("LOCK □□□□□□□"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let app = App::new(&Config::default(), Some(1));
        let mut terminal = Terminal::new(TestBackend::new(10, 4)).expect("terminal");
        terminal.draw(|frame| draw(frame, &app)).expect("draw");
    }
}
