// Keytest Key Events
// Hardware-agnostic key event delivered to the display modes

use std::fmt;

/// X11-style modifier mask bits carried in [`KeyEvent::state`]
pub mod mask {
    pub const SHIFT: u32 = 0x1;
    pub const LOCK: u32 = 0x2;
    pub const CONTROL: u32 = 0x4;
    pub const MOD1: u32 = 0x8;
    /// Usually Num Lock
    pub const MOD2: u32 = 0x10;
    /// Usually Super
    pub const MOD4: u32 = 0x40;
}

/// Direction of a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
}

impl KeyAction {
    pub fn as_str(self) -> &'static str {
        match self {
            KeyAction::Press => "Press",
            KeyAction::Release => "Release",
        }
    }
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Forward so width / alignment flags apply
        f.pad(self.as_str())
    }
}

/// A key event as reported by the input backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Symbolic key name, e.g. `a`, `Shift_L`, `KP_7`
    pub keysym: String,
    /// Produced character; empty for non-printing keys
    pub text: String,
    /// Hardware keycode, when the backend exposes one
    pub keycode: Option<u32>,
    /// Modifier mask (see [`mask`])
    pub state: u32,
}

impl KeyEvent {
    pub fn new(keysym: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            keysym: keysym.into(),
            text: text.into(),
            keycode: None,
            state: 0,
        }
    }

    pub fn with_keycode(mut self, keycode: u32) -> Self {
        self.keycode = Some(keycode);
        self
    }

    pub fn with_state(mut self, state: u32) -> Self {
        self.state = state;
        self
    }
}
