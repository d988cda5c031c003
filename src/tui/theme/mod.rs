mod palette;

use ratatui::prelude::*;
use ratatui::widgets::BorderType;

use keytest_core::{KeyFill, KeyVisual, ModeKind, Relief};

pub use palette::Palette;

pub struct Theme {
    pub palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    pub fn new() -> Self {
        Self {
            palette: Palette::new(),
        }
    }

    // Whole-screen background
    pub fn background(&self) -> Style {
        Style::default().bg(self.palette.window_bg)
    }

    // Keyboard / log panel background
    pub fn content(&self) -> Style {
        Style::default().bg(self.palette.content_bg)
    }

    // Key face for a visual state
    pub fn key(&self, visual: KeyVisual) -> Style {
        match visual.fill {
            KeyFill::Idle => Style::default()
                .fg(self.palette.key_fg)
                .bg(self.palette.key_bg),
            KeyFill::Pressed => Style::default()
                .fg(self.palette.key_fg)
                .bg(self.palette.key_pressed),
            KeyFill::ActiveModifier => Style::default()
                .fg(self.palette.key_active_fg)
                .bg(self.palette.key_active),
        }
    }

    // Key outline: sunken keys get a heavier, darker border
    pub fn key_border(&self, visual: KeyVisual) -> (BorderType, Style) {
        match visual.relief {
            Relief::Flat => (
                BorderType::Rounded,
                self.key(visual).fg(self.palette.key_border),
            ),
            Relief::Sunken => (
                BorderType::Thick,
                self.key(visual).fg(self.palette.key_border_sunken),
            ),
        }
    }

    // Key caption; small-font keys are drawn without emphasis
    pub fn key_label(&self, visual: KeyVisual, small_font: bool) -> Style {
        if small_font {
            self.key(visual)
        } else {
            self.key(visual).add_modifier(Modifier::BOLD)
        }
    }

    // Panel border style
    pub fn panel_border(&self) -> Style {
        Style::default().fg(self.palette.border_default)
    }

    // Primary text
    pub fn text_primary(&self) -> Style {
        Style::default().fg(self.palette.text_primary)
    }

    // Muted text (hints, labels)
    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.palette.text_muted)
    }

    // Info label in the header
    pub fn info(&self) -> Style {
        Style::default().fg(self.palette.info_fg)
    }

    // Log lines
    pub fn log_text(&self) -> Style {
        Style::default()
            .fg(self.palette.text_primary)
            .bg(self.palette.log_bg)
    }

    // Key hint style (the key part like "Esc")
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.palette.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    // Status message style; errors stand out
    pub fn status_message(&self, status: &str) -> Style {
        if status.starts_with("Error") {
            Style::default()
                .fg(self.palette.accent_danger)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.accent_warning)
        }
    }

    // Mode badge in the header
    pub fn mode_badge(&self, mode: ModeKind) -> Style {
        let bg = match mode {
            ModeKind::Visual => self.palette.key_active,
            ModeKind::Log => self.palette.accent_primary,
        };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }

    // Panel title
    pub fn panel_title(&self, title: &str) -> Line<'_> {
        Line::styled(
            format!(" {} ", title),
            Style::default()
                .fg(self.palette.accent_primary)
                .add_modifier(Modifier::BOLD),
        )
    }
}

/// Global theme instance
pub static THEME: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::new)
}
