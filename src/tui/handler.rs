//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers based on the current
//! application state.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::storage::KeyValueStore;

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::event::Event;

/// Handle an incoming event
pub fn handle_event<S: KeyValueStore>(app: &mut App<S>, event: Event) -> Result<()> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            handle_key_event(app, key);
            Ok(())
        }
        Event::Key(_) | Event::Resize(_, _) | Event::Tick => Ok(()),
    }
}

/// Handle a key event
pub fn handle_key_event<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match app.active_dialog {
        ActiveDialog::None => handle_normal_key(app, key),
        ActiveDialog::AddAllowance => dialogs::allowance::handle_key(app, key),
        ActiveDialog::AddExpense => dialogs::expense::handle_key(app, key),
        ActiveDialog::ConfirmReset => handle_confirm_reset_key(app, key),
    }
}

/// Handle keys when no dialog is open
fn handle_normal_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),

        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Home | KeyCode::Char('g') => app.selected_index = 0,
        KeyCode::End | KeyCode::Char('G') => app.select_last(),

        KeyCode::Char('a') => app.open_dialog(ActiveDialog::AddAllowance),
        KeyCode::Char('e') => app.open_dialog(ActiveDialog::AddExpense),
        KeyCode::Char('r') => app.open_dialog(ActiveDialog::ConfirmReset),
        KeyCode::Char('d') | KeyCode::Delete => delete_selected(app),

        KeyCode::Esc => app.clear_status(),
        _ => {}
    }
}

/// Delete the highlighted expense by its ID
fn delete_selected<S: KeyValueStore>(app: &mut App<S>) {
    let Some(id) = app.selected_expense().map(|e| e.id) else {
        app.set_warning("No expense selected");
        return;
    };

    match app.tracker.delete_expense_by_id(id) {
        Ok(Some(expense)) => {
            app.clamp_selection();
            app.set_status(format!("Deleted expense: {}", expense.name));
        }
        Ok(None) => app.set_warning("Expense no longer exists"),
        Err(e) => app.set_warning(format!("Failed to delete: {}", e)),
    }
}

fn handle_confirm_reset_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            let request = app.pending_reset.take();
            app.close_dialog();

            if let Some(request) = request {
                match app.tracker.reset_budget(request) {
                    Ok(()) => {
                        app.selected_index = 0;
                        app.set_status("Budget reset");
                    }
                    Err(e) => app.set_warning(format!("Failed to reset: {}", e)),
                }
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.close_dialog();
        }
        _ => {}
    }
}
