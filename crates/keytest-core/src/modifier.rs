// Keytest Modifier System
// Fixed modifier set (momentary and toggle) and per-session modifier state

use std::fmt;
use std::str::FromStr;

use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount as EnumCountMacro, EnumIter, EnumString, IntoStaticStr};

/// How a modifier reacts to press / release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKind {
    /// Active while held
    Momentary,
    /// Flipped on each press, unaffected by release
    Toggle,
}

/// A modifier keysym tracked by the engine
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumString,
    EnumIter,
    EnumCountMacro,
    IntoStaticStr,
)]
pub enum Modifier {
    #[strum(serialize = "Shift_L")]
    ShiftL,
    #[strum(serialize = "Shift_R")]
    ShiftR,
    #[strum(serialize = "Control_L")]
    ControlL,
    #[strum(serialize = "Control_R")]
    ControlR,
    #[strum(serialize = "Alt_L")]
    AltL,
    #[strum(serialize = "Alt_R")]
    AltR,
    #[strum(serialize = "ISO_Level3_Shift")]
    IsoLevel3Shift,
    #[strum(serialize = "Caps_Lock")]
    CapsLock,
    #[strum(serialize = "Num_Lock")]
    NumLock,
    #[strum(serialize = "Super_L")]
    SuperL,
    #[strum(serialize = "Super_R")]
    SuperR,
    #[strum(serialize = "Meta_L")]
    MetaL,
    #[strum(serialize = "Meta_R")]
    MetaR,
}

impl Modifier {
    pub fn kind(self) -> ModifierKind {
        match self {
            Modifier::CapsLock | Modifier::NumLock => ModifierKind::Toggle,
            _ => ModifierKind::Momentary,
        }
    }

    pub fn is_toggle(self) -> bool {
        self.kind() == ModifierKind::Toggle
    }

    /// Keysym name, e.g. `Shift_L`
    pub fn keysym(self) -> &'static str {
        self.into()
    }

    /// Exact (case-sensitive) keysym match
    pub fn from_keysym(keysym: &str) -> Option<Self> {
        Modifier::from_str(keysym).ok()
    }

    /// Whether this modifier is on when a session starts
    pub fn initially_active(self) -> bool {
        self == Modifier::NumLock
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keysym())
    }
}

/// One boolean per modifier name.
///
/// Two physical keys reporting the same modifier share its flag, so releasing
/// either one clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifierState {
    active: [bool; Modifier::COUNT],
}

impl Default for ModifierState {
    /// Session start state: Num_Lock on, everything else off
    fn default() -> Self {
        let mut active = [false; Modifier::COUNT];
        for modifier in Modifier::iter() {
            active[modifier.index()] = modifier.initially_active();
        }
        Self { active }
    }
}

impl ModifierState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, modifier: Modifier) -> bool {
        self.active[modifier.index()]
    }

    pub fn set(&mut self, modifier: Modifier, active: bool) {
        self.active[modifier.index()] = active;
    }

    /// Flip and return the new value
    pub fn toggle(&mut self, modifier: Modifier) -> bool {
        let slot = &mut self.active[modifier.index()];
        *slot = !*slot;
        *slot
    }

    /// Active modifiers in declaration order
    pub fn active(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::iter().filter(move |m| self.is_active(*m))
    }
}
