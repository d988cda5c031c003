use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let status = app.status();

    let line1 = Line::styled(format!("Status: {}", status), t.status_message(status));

    let mut hints = vec![
        Span::styled(app.quit_key().to_string(), t.key_hint()),
        Span::styled(":quit  ", t.text_muted()),
        Span::styled("^N", t.key_hint()),
        Span::styled("/", t.text_muted()),
        Span::styled("^P", t.key_hint()),
        Span::styled(":layout  ", t.text_muted()),
        Span::styled("^T", t.key_hint()),
        Span::styled(format!(":{}  ", app.mode().toggled().title()), t.text_muted()),
        Span::styled("^L", t.key_hint()),
        Span::styled(":clear log", t.text_muted()),
    ];
    if !app.reports_releases() {
        hints.push(Span::styled(
            "  (releases simulated by this terminal)",
            t.text_muted(),
        ));
    }

    let footer = Paragraph::new(vec![line1, Line::from(hints)]).style(t.background());
    frame.render_widget(footer, area);
}
