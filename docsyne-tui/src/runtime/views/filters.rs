use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::ActionTx;
use super::handle_shortcut_key;

pub(super) fn handle_filters_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.specialty_filter.is_some() {
        handle_specialty_filter_key(key, app);
        return;
    }

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.specialty_next(),
        KeyCode::Up | KeyCode::Char('k') => app.specialty_previous(),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_focused_specialty(),
        _ => {
            handle_shortcut_key(key, app, action_tx);
        }
    }
}

/// Keys while the specialty list is being narrowed: letters go to the filter.
fn handle_specialty_filter_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.close_specialty_filter(),
        KeyCode::Enter => app.toggle_focused_specialty(),
        KeyCode::Down => app.specialty_next(),
        KeyCode::Up => app.specialty_previous(),
        KeyCode::Backspace => {
            let empty = app
                .specialty_filter
                .as_ref()
                .map(|input| input.value.is_empty())
                .unwrap_or(true);
            if empty {
                app.close_specialty_filter();
            } else {
                app.specialty_filter_backspace();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.specialty_filter_char(c);
        }
        _ => {}
    }
}
