use ratatui::prelude::*;
use ratatui::widgets::*;

use keytest_core::LogMode;

use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, log: &LogMode, area: Rect) {
    let t = theme();

    let block = Block::default()
        .title(t.panel_title("EVENT LOG"))
        .title(
            Line::styled(format!(" {}/{} ", log.len(), log.max_lines()), t.text_muted())
                .right_aligned(),
        )
        .borders(Borders::ALL)
        .border_style(t.panel_border())
        .style(t.log_text());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if log.is_empty() {
        let empty = Paragraph::new(Line::styled(
            "No events yet. Press any key to log it here.",
            t.text_muted(),
        ));
        frame.render_widget(empty, inner);
        return;
    }

    // Newest lines stay in view
    let visible = inner.height as usize;
    let skip = log.len().saturating_sub(visible);
    let lines: Vec<Line> = log
        .lines()
        .skip(skip)
        .map(|line| Line::styled(line.to_string(), t.log_text()))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
