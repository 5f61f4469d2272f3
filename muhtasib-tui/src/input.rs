//! Keyboard input dispatch: global keys, then keys for the focused pane.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Focus};
use crate::route::Route;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent, now: Instant) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char('t') => {
            app.directory.toggle();
            if !app.directory.visible && app.focus == Focus::Directory && app.view.is_some() {
                app.focus = Focus::Session;
            }
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.toggle_focus();
            return;
        }
        KeyCode::Esc => {
            app.navigate(Route::Directory, now);
            return;
        }
        _ => {}
    }

    // 2. Pane-specific keys.
    match app.focus {
        Focus::Directory => handle_directory_key(app, key, now),
        Focus::Session => handle_session_key(app, key),
    }
}

fn handle_directory_key(app: &mut AppState, key: KeyEvent, now: Instant) {
    if !app.directory.visible {
        return;
    }
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.directory.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.directory.move_up(),
        KeyCode::Enter => app.open_selected(now),
        _ => {}
    }
}

fn handle_session_key(app: &mut AppState, key: KeyEvent) {
    if let KeyCode::Char('D') = key.code {
        app.delete_current();
    }
}
