use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let mode = app.mode();

    let line = Line::from(vec![
        // App name
        Span::styled("keytest ", t.text_primary().add_modifier(Modifier::BOLD)),
        // Mode badge
        Span::styled(format!("[{}]", mode.title().to_uppercase()), t.mode_badge(mode)),
        Span::raw(" "),
        // Selected layout
        Span::styled(app.visual.layout_name().to_string(), t.key_hint()),
        Span::styled(" | ", t.text_muted()),
        // Info label
        Span::styled(app.info().to_string(), t.info()),
    ]);

    let header = Paragraph::new(line)
        .alignment(Alignment::Left)
        .style(t.background());

    frame.render_widget(header, area);
}
