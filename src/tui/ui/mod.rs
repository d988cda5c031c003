mod footer;
mod header;
pub mod keyboard;
mod log_panel;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use keytest_core::ModeKind;

use crate::tui::app::App;
use crate::tui::theme::theme;

pub fn draw_ui(frame: &mut Frame, app: &App) {
    let t = theme();
    frame.render_widget(Block::default().style(t.background()), frame.area());

    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(8),    // Keyboard or log
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    header::render(frame, app, root[0]);
    match app.mode() {
        ModeKind::Visual => render_keyboard_panel(frame, app, root[1]),
        ModeKind::Log => log_panel::render(frame, &app.log, root[1]),
    }
    footer::render(frame, app, root[2]);
}

fn render_keyboard_panel(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let block = Block::default()
        .title(t.panel_title(app.visual.layout_name()))
        .borders(Borders::ALL)
        .border_style(t.panel_border())
        .style(t.content());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match app.visual.engine() {
        Some(engine) => keyboard::render(frame, engine, inner),
        None => {
            let message = Paragraph::new(Line::styled(app.status().to_string(), t.text_muted()));
            frame.render_widget(message, inner);
        }
    }
}
