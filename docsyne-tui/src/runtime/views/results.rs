use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::ActionTx;
use super::handle_shortcut_key;

pub(super) fn handle_results_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.results_next(),
        KeyCode::Up | KeyCode::Char('k') => app.results_previous(),
        KeyCode::PageDown => app.results_page_down(),
        KeyCode::PageUp => app.results_page_up(),
        KeyCode::Home | KeyCode::Char('g') => app.results_index = 0,
        _ => {
            handle_shortcut_key(key, app, action_tx);
        }
    }
}
