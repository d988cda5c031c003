// Keytest Display Modes
// Interchangeable front-ends fed with key events by the application shell

mod event_log;
mod visual;

pub use self::event_log::{format_event, LogMode, DEFAULT_MAX_LINES};
pub use self::visual::VisualMode;

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::event::KeyEvent;

/// Which display mode is in front
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum ModeKind {
    #[default]
    Visual,
    Log,
}

impl ModeKind {
    /// Human-readable mode name
    pub fn title(self) -> &'static str {
        match self {
            ModeKind::Visual => "Visual Keyboard",
            ModeKind::Log => "Event Logger",
        }
    }

    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            ModeKind::Visual => ModeKind::Log,
            ModeKind::Log => ModeKind::Visual,
        }
    }
}

/// Contract between the shell and a display mode.
///
/// Exactly one mode is active at a time. Switching deactivates the current mode
/// before activating the next, synchronously.
pub trait DisplayMode {
    fn kind(&self) -> ModeKind;

    /// Build whatever state the mode renders from
    fn activate(&mut self);

    /// Tear that state down; later events are ignored until reactivation
    fn deactivate(&mut self);

    fn is_active(&self) -> bool;

    fn on_key_press(&mut self, event: &KeyEvent);

    fn on_key_release(&mut self, event: &KeyEvent);

    /// Latest one-line status message
    fn status(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_mode_kind_names() {
        assert_eq!(ModeKind::from_str("log").unwrap(), ModeKind::Log);
        assert_eq!(ModeKind::Visual.to_string(), "visual");
        assert_eq!(ModeKind::Log.title(), "Event Logger");
        assert_eq!(ModeKind::Visual.toggled(), ModeKind::Log);
        assert!(ModeKind::from_str("graph").is_err());
    }
}
