use ratatui::prelude::*;

/// Dark keyboard-tester palette
pub struct Palette {
    // Backgrounds
    pub window_bg: Color,
    pub content_bg: Color,
    pub log_bg: Color,

    // Keys
    pub key_bg: Color,
    pub key_fg: Color,
    pub key_pressed: Color,
    pub key_active: Color,
    pub key_active_fg: Color,
    pub key_border: Color,
    pub key_border_sunken: Color,

    // Text colors
    pub text_primary: Color,
    pub text_muted: Color,
    pub info_fg: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_warning: Color,
    pub accent_danger: Color,

    // UI
    pub border_default: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            window_bg: Color::Rgb(0x20, 0x22, 0x24),
            content_bg: Color::Rgb(0x28, 0x2a, 0x2e),
            log_bg: Color::Rgb(0x2c, 0x2f, 0x33),

            key_bg: Color::Rgb(0x3a, 0x3d, 0x42),
            key_fg: Color::Rgb(0xd4, 0xd4, 0xd4),
            key_pressed: Color::Rgb(0x62, 0x65, 0x69),
            key_active: Color::Rgb(0x4c, 0xaf, 0x50),     // Green
            key_active_fg: Color::Rgb(0x1b, 0x1d, 0x1f),
            key_border: Color::Rgb(0x52, 0x55, 0x5a),
            key_border_sunken: Color::Rgb(0x12, 0x13, 0x14),

            text_primary: Color::Rgb(0xd4, 0xd4, 0xd4),
            text_muted: Color::Rgb(0x80, 0x84, 0x8a),
            info_fg: Color::Rgb(0xd4, 0xd4, 0xd4),

            accent_primary: Color::Rgb(137, 180, 250),    // Blue
            accent_warning: Color::Rgb(249, 226, 175),    // Yellow
            accent_danger: Color::Rgb(243, 139, 168),     // Red

            border_default: Color::Rgb(69, 71, 90),
        }
    }
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }
}
