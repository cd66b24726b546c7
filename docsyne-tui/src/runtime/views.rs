use crate::app::{App, Focus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use doctor_directory::{ConsultType, SortKey};

use super::action_queue::{Action, ActionTx};

mod chips;
mod filters;
mod results;
mod search;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match key.code {
        KeyCode::Tab => {
            app.focus_next();
            return;
        }
        KeyCode::BackTab => {
            app.focus_previous();
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::Search => search::handle_search_key(key, app),
        Focus::Filters => filters::handle_filters_key(key, app, action_tx),
        Focus::Chips => chips::handle_chips_key(key, app, action_tx),
        Focus::Results => results::handle_results_key(key, app, action_tx),
    }
}

/// Single-letter shortcuts shared by every pane except the search bar.
/// Returns true if the key was consumed.
fn handle_shortcut_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }
    match key.code {
        KeyCode::Char('v') => app.set_consult_type(ConsultType::Video),
        KeyCode::Char('c') => app.set_consult_type(ConsultType::Clinic),
        KeyCode::Char('f') => app.set_sort_key(SortKey::Fees),
        KeyCode::Char('e') => app.set_sort_key(SortKey::Experience),
        KeyCode::Char('x') => app.clear_all(),
        KeyCode::Char('r') => enqueue_action(action_tx, Action::RetryLoad),
        KeyCode::Char('/') => app.open_specialty_filter(),
        KeyCode::Char('s') => app.focus = Focus::Search,
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Esc => app.focus = Focus::Search,
        _ => return false,
    }
    true
}
