//! TUI Views module
//!
//! The dashboard, the expense list, and the status bar, plus dialog overlay.

pub mod dashboard;
pub mod expenses;
pub mod status_bar;

use ratatui::Frame;

use crate::display::format_currency;
use crate::storage::KeyValueStore;

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>) {
    let layout = AppLayout::new(frame.area());

    dashboard::render(frame, app, layout.dashboard);
    expenses::render(frame, app, layout.expenses);
    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

/// Render active dialog
fn render_dialog<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    match app.active_dialog {
        ActiveDialog::AddAllowance => dialogs::allowance::render(frame, app),
        ActiveDialog::AddExpense => dialogs::expense::render(frame, app),
        ActiveDialog::ConfirmReset => {
            if let Some(request) = &app.pending_reset {
                let detail = format!(
                    "Allowance {} and {} expense(s) will be cleared.",
                    format_currency(request.total_budget(), &app.settings.currency_symbol),
                    request.expense_count()
                );
                dialogs::confirm::render(frame, request.prompt(), Some(&detail));
            }
        }
        ActiveDialog::None => {}
    }
}
