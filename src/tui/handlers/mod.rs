use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent as TermKeyEvent, KeyEventKind, KeyModifiers};

use crate::tui::app::App;
use crate::tui::input::translate;

/// Handle a terminal key event and return true if the app should quit.
///
/// Every key reaches the active mode first, so bindings show up on the
/// keyboard and in the log like any other key.
pub fn handle_key(app: &mut App, key: TermKeyEvent, now: Instant) -> bool {
    let Some(event) = translate(&key) else {
        log::debug!("No keysym for {:?}", key.code);
        return false;
    };

    match key.kind {
        KeyEventKind::Press => app.press(event.clone(), now),
        KeyEventKind::Release => {
            app.release(&event);
            return false;
        }
        // Held keys stay pressed until their release arrives
        KeyEventKind::Repeat => return false,
    }

    if app.is_quit_key(&event.keysym) {
        return true;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return handle_control(app, key.code);
    }
    false
}

fn handle_control(app: &mut App, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('c') => return true,
        KeyCode::Char('n') => app.next_layout(),
        KeyCode::Char('p') => app.previous_layout(),
        KeyCode::Char('t') => app.toggle_mode(),
        KeyCode::Char('l') => app.clear_log(),
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crossterm::event::KeyEventState;
    use keytest_core::{DisplayMode, LayoutCatalog, ModeKind, Settings, DEFAULT_LAYOUT};

    fn app(mode: ModeKind) -> App {
        let catalog = Rc::new(LayoutCatalog::builtin());
        App::new(catalog, &Settings::new(), DEFAULT_LAYOUT, mode).unwrap()
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> TermKeyEvent {
        TermKeyEvent::new(code, modifiers)
    }

    fn with_kind(code: KeyCode, kind: KeyEventKind) -> TermKeyEvent {
        TermKeyEvent::new_with_kind_and_state(code, KeyModifiers::NONE, kind, KeyEventState::NONE)
    }

    #[test]
    fn test_escape_quits() {
        let mut app = app(ModeKind::Visual);
        assert!(handle_key(&mut app, press(KeyCode::Esc, KeyModifiers::NONE), Instant::now()));
        assert!(handle_key(&mut app, press(KeyCode::Char('c'), KeyModifiers::CONTROL), Instant::now()));
        assert!(!handle_key(&mut app, press(KeyCode::Char('q'), KeyModifiers::NONE), Instant::now()));
    }

    #[test]
    fn test_ctrl_t_toggles_mode() {
        let mut app = app(ModeKind::Visual);
        handle_key(&mut app, press(KeyCode::Char('t'), KeyModifiers::CONTROL), Instant::now());
        assert_eq!(app.mode(), ModeKind::Log);
        handle_key(&mut app, press(KeyCode::Char('t'), KeyModifiers::CONTROL), Instant::now());
        assert_eq!(app.mode(), ModeKind::Visual);
    }

    #[test]
    fn test_ctrl_l_clears_log_after_delivery() {
        let mut app = app(ModeKind::Log);
        handle_key(&mut app, press(KeyCode::Char('a'), KeyModifiers::NONE), Instant::now());
        assert_eq!(app.log.len(), 1);
        handle_key(&mut app, press(KeyCode::Char('l'), KeyModifiers::CONTROL), Instant::now());
        assert!(app.log.is_empty());
        assert_eq!(app.status(), "Log cleared.");
    }

    #[test]
    fn test_ctrl_n_changes_layout() {
        let mut app = app(ModeKind::Visual);
        handle_key(&mut app, press(KeyCode::Char('n'), KeyModifiers::CONTROL), Instant::now());
        assert_ne!(app.visual.layout_name(), DEFAULT_LAYOUT);
    }

    #[test]
    fn test_repeat_ignored_and_release_delivered() {
        let mut app = app(ModeKind::Log);
        app.set_reports_releases(true);
        handle_key(&mut app, with_kind(KeyCode::Char('a'), KeyEventKind::Press), Instant::now());
        handle_key(&mut app, with_kind(KeyCode::Char('a'), KeyEventKind::Repeat), Instant::now());
        handle_key(&mut app, with_kind(KeyCode::Char('a'), KeyEventKind::Release), Instant::now());
        assert_eq!(app.log.len(), 2);
        assert!(app.log.is_active());
    }
}
