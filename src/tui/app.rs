use std::rc::Rc;
use std::time::{Duration, Instant};

use keytest_core::{
    DisplayMode, EngineError, KeyEvent, LayoutCatalog, LogMode, ModeKind, Settings, VisualMode,
};

/// A release owed to the active mode by a terminal that never reports one
#[derive(Clone, Debug)]
struct PendingRelease {
    event: KeyEvent,
    due: Instant,
}

pub struct App {
    pub visual: VisualMode,
    pub log: LogMode,
    active: ModeKind,
    info: String,
    quit_key: String,
    release_delay: Duration,
    reports_releases: bool,
    pending_releases: Vec<PendingRelease>,
}

impl App {
    pub fn new(
        catalog: Rc<LayoutCatalog>,
        settings: &Settings,
        layout: &str,
        mode: ModeKind,
    ) -> Result<Self, EngineError> {
        let mut app = Self {
            visual: VisualMode::new(catalog, layout)?,
            log: LogMode::new(settings.log_max_lines()),
            active: mode,
            info: String::new(),
            quit_key: settings.quit_key().to_string(),
            release_delay: Duration::from_millis(settings.release_delay_ms()),
            reports_releases: false,
            pending_releases: Vec::new(),
        };
        app.active_mut().activate();
        app.info = app.mode_banner();
        Ok(app)
    }

    pub fn mode(&self) -> ModeKind {
        self.active
    }

    pub fn active_mode(&self) -> &dyn DisplayMode {
        match self.active {
            ModeKind::Visual => &self.visual,
            ModeKind::Log => &self.log,
        }
    }

    pub fn active_mut(&mut self) -> &mut dyn DisplayMode {
        match self.active {
            ModeKind::Visual => &mut self.visual,
            ModeKind::Log => &mut self.log,
        }
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn status(&self) -> &str {
        self.active_mode().status()
    }

    pub fn quit_key(&self) -> &str {
        &self.quit_key
    }

    pub fn is_quit_key(&self, keysym: &str) -> bool {
        self.quit_key == keysym
    }

    /// Terminal reports key releases, no need to synthesize them
    pub fn set_reports_releases(&mut self, reports: bool) {
        self.reports_releases = reports;
        if reports {
            self.pending_releases.clear();
        }
    }

    pub fn reports_releases(&self) -> bool {
        self.reports_releases
    }

    pub fn switch_mode(&mut self, kind: ModeKind) {
        if kind == self.active {
            return;
        }
        self.active_mut().deactivate();
        self.active = kind;
        self.active_mut().activate();
        self.info = self.mode_banner();
        log::debug!("Switched to {} mode", kind);
    }

    pub fn toggle_mode(&mut self) {
        self.switch_mode(self.active.toggled());
    }

    pub fn next_layout(&mut self) {
        if let Err(e) = self.visual.next_layout() {
            log::warn!("Could not switch to the next layout: {}", e);
        }
        self.info = self.visual.status().to_string();
    }

    pub fn previous_layout(&mut self) {
        if let Err(e) = self.visual.previous_layout() {
            log::warn!("Could not switch to the previous layout: {}", e);
        }
        self.info = self.visual.status().to_string();
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Deliver a press; without release reporting, schedule a release for later
    pub fn press(&mut self, event: KeyEvent, now: Instant) {
        self.active_mut().on_key_press(&event);
        if self.reports_releases {
            return;
        }

        let due = now + self.release_delay;
        match self
            .pending_releases
            .iter_mut()
            .find(|pending| pending.event.keysym == event.keysym)
        {
            // Auto-repeat keeps the key down
            Some(pending) => pending.due = due,
            None => self.pending_releases.push(PendingRelease { event, due }),
        }
    }

    pub fn release(&mut self, event: &KeyEvent) {
        self.pending_releases
            .retain(|pending| pending.event.keysym != event.keysym);
        self.active_mut().on_key_release(event);
    }

    /// Deliver synthesized releases that are due; returns how many were sent
    pub fn expire_releases(&mut self, now: Instant) -> usize {
        let (due, waiting): (Vec<_>, Vec<_>) = self
            .pending_releases
            .drain(..)
            .partition(|pending| pending.due <= now);
        self.pending_releases = waiting;

        for pending in &due {
            self.active_mut().on_key_release(&pending.event);
        }
        due.len()
    }

    pub fn pending_release_count(&self) -> usize {
        self.pending_releases.len()
    }

    fn mode_banner(&self) -> String {
        format!("{} active. {} to close.", self.active.title(), self.quit_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keytest_core::{KeyVisual, DEFAULT_LAYOUT};

    fn app(mode: ModeKind) -> App {
        let catalog = Rc::new(LayoutCatalog::builtin());
        App::new(catalog, &Settings::new(), DEFAULT_LAYOUT, mode).unwrap()
    }

    fn a_key(app: &App) -> keytest_core::KeyId {
        app.visual.engine().unwrap().find_by_label("A")[0]
    }

    #[test]
    fn test_starts_in_requested_mode() {
        let app = app(ModeKind::Log);
        assert_eq!(app.mode(), ModeKind::Log);
        assert!(app.log.is_active());
        assert!(!app.visual.is_active());
        assert_eq!(app.info(), "Event Logger active. Escape to close.");
    }

    #[test]
    fn test_unknown_layout_rejected() {
        let catalog = Rc::new(LayoutCatalog::builtin());
        assert!(App::new(catalog, &Settings::new(), "Nope", ModeKind::Visual).is_err());
    }

    #[test]
    fn test_switch_mode_deactivates_previous() {
        let mut app = app(ModeKind::Visual);
        app.toggle_mode();
        assert_eq!(app.mode(), ModeKind::Log);
        assert!(!app.visual.is_active());
        assert!(app.log.is_active());
        assert_eq!(app.status(), "Event Logger active.");

        app.switch_mode(ModeKind::Visual);
        assert!(app.visual.is_active());
        assert!(!app.log.is_active());
    }

    #[test]
    fn test_synthesized_release() {
        let mut app = app(ModeKind::Visual);
        let start = Instant::now();
        app.press(KeyEvent::new("a", "a"), start);
        let a = a_key(&app);
        assert_eq!(app.visual.engine().unwrap().visual(a), Some(KeyVisual::PRESSED));
        assert_eq!(app.pending_release_count(), 1);

        assert_eq!(app.expire_releases(start), 0);
        assert_eq!(app.expire_releases(start + Duration::from_millis(150)), 1);
        assert_eq!(app.visual.engine().unwrap().visual(a), Some(KeyVisual::IDLE));
    }

    #[test]
    fn test_repeat_press_postpones_release() {
        let mut app = app(ModeKind::Visual);
        let start = Instant::now();
        app.press(KeyEvent::new("a", "a"), start);
        app.press(KeyEvent::new("a", "a"), start + Duration::from_millis(100));
        assert_eq!(app.pending_release_count(), 1);
        assert_eq!(app.expire_releases(start + Duration::from_millis(150)), 0);
        assert_eq!(app.expire_releases(start + Duration::from_millis(250)), 1);
    }

    #[test]
    fn test_real_release_cancels_pending() {
        let mut app = app(ModeKind::Log);
        let start = Instant::now();
        app.press(KeyEvent::new("a", "a"), start);
        app.release(&KeyEvent::new("a", "a"));
        assert_eq!(app.pending_release_count(), 0);
        assert_eq!(app.log.len(), 2);
    }

    #[test]
    fn test_no_synthesized_release_when_reported() {
        let mut app = app(ModeKind::Visual);
        app.set_reports_releases(true);
        app.press(KeyEvent::new("a", "a"), Instant::now());
        assert_eq!(app.pending_release_count(), 0);
    }

    #[test]
    fn test_layout_cycling_updates_info() {
        let mut app = app(ModeKind::Visual);
        app.next_layout();
        assert_ne!(app.visual.layout_name(), DEFAULT_LAYOUT);
        assert_eq!(app.info(), format!("Layout: {}", app.visual.layout_name()));
        app.previous_layout();
        assert_eq!(app.visual.layout_name(), DEFAULT_LAYOUT);
    }
}
