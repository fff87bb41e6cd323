//! Keyboard input handling for the TUI.
//!
//! This module translates key events into application state changes and
//! controller actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, AppState};
use crate::controller::{Action, ControllerState};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    // Help overlay swallows everything except its dismiss keys
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
        ) {
            app.state = AppState::Normal;
        }
        return false;
    }

    match app.controller {
        ControllerState::Idle => handle_browse_input(app, key),
        ControllerState::ItemMenuOpen { .. } => {
            handle_item_menu_input(app, key);
            false
        }
        ControllerState::AddDialogOpen { .. } | ControllerState::EditDialogOpen { .. } => {
            handle_dialog_input(app, key);
            false
        }
    }
}

fn handle_browse_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::Quitting;
            return true;
        }
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Char('a') => app.dispatch(Action::OpenAddDialog),
        KeyCode::Char('r') => app.restore_from_api(),
        KeyCode::Enter => {
            if let Some(id) = app.selected_item().map(|i| i.id) {
                app.dispatch(Action::OpenItemMenu { id });
            }
        }
        _ => {}
    }
    false
}

fn handle_item_menu_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') => {
            app.dispatch(Action::MoveChoice)
        }
        KeyCode::Char('e') => app.dispatch(Action::ChooseEdit),
        KeyCode::Char('d') => app.dispatch(Action::ChooseDelete),
        KeyCode::Enter => app.dispatch(Action::Confirm),
        KeyCode::Esc => app.dispatch(Action::Cancel),
        _ => {}
    }
}

fn handle_dialog_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.dispatch(Action::Cancel),
        KeyCode::Enter => app.dispatch(Action::Confirm),
        KeyCode::Tab | KeyCode::Down => app.dispatch(Action::NextField),
        KeyCode::BackTab | KeyCode::Up => app.dispatch(Action::PrevField),
        KeyCode::Backspace => app.dispatch(Action::Backspace),
        KeyCode::Char(c) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                app.dispatch(Action::Input(c));
            }
        }
        _ => {}
    }
}
