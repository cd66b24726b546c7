use crate::app::{App, Focus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(super) fn handle_search_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input_clear();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input_char(c);
        }
        KeyCode::Backspace => app.search_input_backspace(),
        KeyCode::Left => app.search_move_cursor(true),
        KeyCode::Right => app.search_move_cursor(false),
        KeyCode::Home => app.search_cursor_home_end(true),
        KeyCode::End => app.search_cursor_home_end(false),
        KeyCode::Down => app.suggestion_next(),
        KeyCode::Up => app.suggestion_previous(),
        KeyCode::Enter => {
            if !app.confirm_suggestion() {
                app.dismiss_suggestions();
                app.focus = Focus::Results;
            }
        }
        KeyCode::Esc => {
            if app.suggestions_visible() {
                app.dismiss_suggestions();
            } else {
                app.focus = Focus::Results;
            }
        }
        _ => {}
    }
}
