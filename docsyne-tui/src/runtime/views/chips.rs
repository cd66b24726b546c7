use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::ActionTx;
use super::handle_shortcut_key;

pub(super) fn handle_chips_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.chip_previous(),
        KeyCode::Right | KeyCode::Char('l') => app.chip_next(),
        KeyCode::Delete | KeyCode::Backspace => app.remove_focused_chip(),
        _ => {
            handle_shortcut_key(key, app, action_tx);
        }
    }
}
