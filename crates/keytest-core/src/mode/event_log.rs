// Keytest Log Mode
// Raw key event log with bounded scroll-back

use std::collections::VecDeque;

use super::{DisplayMode, ModeKind};
use crate::event::{KeyAction, KeyEvent};

/// Scroll-back kept when nothing else is configured
pub const DEFAULT_MAX_LINES: usize = 800;

/// One log line for an event
///
/// # Examples
/// ```
/// use keytest_core::{format_event, KeyAction, KeyEvent};
/// let line = format_event(KeyAction::Press, &KeyEvent::new("a", "a").with_state(0x10));
/// assert_eq!(line, "Press      Keysym: 'a', Char: 'a', KeyCode: n/a, State: 0x10");
/// ```
pub fn format_event(action: KeyAction, event: &KeyEvent) -> String {
    let keycode = event
        .keycode
        .map(|code| code.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    format!(
        "{:<10} Keysym: '{}', Char: '{}', KeyCode: {}, State: {:#x}",
        action, event.keysym, event.text, keycode, event.state
    )
}

/// Appends one line per event; oldest lines fall off past `max_lines`
#[derive(Debug, Clone)]
pub struct LogMode {
    lines: VecDeque<String>,
    max_lines: usize,
    active: bool,
    status: String,
}

impl Default for LogMode {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES)
    }
}

impl LogMode {
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines: max_lines.max(1),
            active: false,
            status: String::new(),
        }
    }

    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.status = "Log cleared.".to_string();
    }

    fn record(&mut self, action: KeyAction, event: &KeyEvent) {
        if !self.active {
            log::debug!("Log mode inactive, skipping '{}'", event.keysym);
            return;
        }
        self.lines.push_back(format_event(action, event));
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
        self.status = format!("{}: {} (char: '{}')", action, event.keysym, event.text);
    }
}

impl DisplayMode for LogMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Log
    }

    fn activate(&mut self) {
        self.lines.clear();
        self.active = true;
        self.status = format!("{} active.", self.kind().title());
    }

    fn deactivate(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn on_key_press(&mut self, event: &KeyEvent) {
        self.record(KeyAction::Press, event);
    }

    fn on_key_release(&mut self, event: &KeyEvent) {
        self.record(KeyAction::Release, event);
    }

    fn status(&self) -> &str {
        &self.status
    }
}
