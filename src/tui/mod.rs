mod app;
mod handlers;
mod input;
mod theme;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyEvent, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use ratatui::prelude::*;

pub use app::App;
use handlers::handle_key;
use ui::draw_ui;

/// Upper bound on the wait for input, so synthesized releases fire on time
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run(mut app: App) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Release events and bare modifier keys need the kitty keyboard protocol
    let enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
            )
        )?;
    }
    app.set_reports_releases(enhanced);
    log::info!(
        "Terminal {} key releases",
        if enhanced { "reports" } else { "does not report" }
    );

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = loop {
        app.expire_releases(Instant::now());

        if let Err(err) = terminal.draw(|f| draw_ui(f, &app)) {
            break Err(err);
        }

        let key = match next_key(|| event::poll(POLL_INTERVAL), event::read) {
            Ok(Some(key)) => key,
            Ok(None) => continue,
            Err(err) => break Err(err),
        };

        if handle_key(&mut app, key, Instant::now()) {
            break Ok(());
        }
    };

    // Restore the terminal even when the loop failed
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

/// Wait for the next key event; `None` on timeout or a non-key event
fn next_key<P, R>(poll: P, read: R) -> io::Result<Option<KeyEvent>>
where
    P: FnOnce() -> io::Result<bool>,
    R: FnOnce() -> io::Result<Event>,
{
    if !poll()? {
        return Ok(None);
    }
    match read()? {
        Event::Key(key) => Ok(Some(key)),
        _ => Ok(None),
    }
}
