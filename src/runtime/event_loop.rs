use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::ui;

/// Lines moved by page up/down in a text report.
const PAGE: i16 = 10;

/// Main terminal event loop: draws the UI and handles input until the user
/// quits. Every action runs to completion before the next key is read.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key_event(key, app) {
                break;
            }
        }
    }

    Ok(())
}

/// Apply one key press to `app`. Returns `true` when the app should quit.
pub fn handle_key_event(key: KeyEvent, app: &mut App) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    // popups are dismissed by any key
    if app.popup.is_some() {
        app.dismiss_popup();
        return false;
    }

    if app.editing.is_some() {
        match key.code {
            KeyCode::Esc => app.cancel_edit(),
            KeyCode::Enter => app.commit_edit(),
            KeyCode::Backspace => app.pop_char(),
            KeyCode::Char(c) if !c.is_control() => app.push_char(c),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('o') => app.begin_load_prompt(),
        KeyCode::Char('[') => app.select_prev(),
        KeyCode::Char(']') => app.select_next(),
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::Char('a') | KeyCode::F(5) => app.analyze(),
        KeyCode::Char(' ') => app.toggle_focused(),
        KeyCode::Char('h') | KeyCode::Char('-') | KeyCode::Left => app.adjust_focused(-1),
        KeyCode::Char('l') | KeyCode::Char('+') | KeyCode::Right => app.adjust_focused(1),
        KeyCode::Char('i') | KeyCode::Enter => app.begin_edit(),
        KeyCode::Char('t') => app.add_top_artists(),
        KeyCode::Char('x') => app.remove_last_artist(),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_report(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_report(-1),
        KeyCode::PageDown => app.scroll_report(PAGE),
        KeyCode::PageUp => app.scroll_report(-PAGE),
        _ => {}
    }

    false
}
