//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! Budget state itself lives in the tracker; the App only adds what the
//! screen needs on top: selection, dialogs, form contents, status text.

use crate::config::settings::Settings;
use crate::models::Expense;
use crate::services::{ResetRequest, Tracker};
use crate::storage::{FileStore, KeyValueStore};

use super::dialogs::allowance::AllowanceFormState;
use super::dialogs::expense::ExpenseFormState;

/// Currently active dialog (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    AddAllowance,
    AddExpense,
    ConfirmReset,
}

/// Severity of the status bar message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
}

/// Message shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// Main application state
pub struct App<S: KeyValueStore = FileStore> {
    /// The single owner of budget state
    pub tracker: Tracker<S>,

    pub settings: Settings,

    /// Whether the app should quit
    pub should_quit: bool,

    pub active_dialog: ActiveDialog,

    /// Selected row in the expense list
    pub selected_index: usize,

    pub status: Option<StatusMessage>,

    pub allowance_form: AllowanceFormState,

    pub expense_form: ExpenseFormState,

    /// Reset awaiting confirmation
    pub pending_reset: Option<ResetRequest>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(tracker: Tracker<S>, settings: Settings) -> Self {
        let selected_index = tracker.expenses().len().saturating_sub(1);
        let expense_form = ExpenseFormState::new(settings.default_category);

        Self {
            tracker,
            settings,
            should_quit: false,
            active_dialog: ActiveDialog::default(),
            selected_index,
            status: None,
            allowance_form: AllowanceFormState::new(),
            expense_form,
            pending_reset: None,
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Info,
            text: message.into(),
        });
    }

    pub fn set_warning(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Warning,
            text: message.into(),
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Open a dialog, resetting its form
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        match dialog {
            ActiveDialog::AddAllowance => {
                self.allowance_form = AllowanceFormState::new();
            }
            ActiveDialog::AddExpense => {
                self.expense_form = ExpenseFormState::new(self.settings.default_category);
            }
            ActiveDialog::ConfirmReset => {
                self.pending_reset = Some(self.tracker.request_reset());
            }
            ActiveDialog::None => {}
        }
        self.active_dialog = dialog;
    }

    /// Close the current dialog; a pending reset is declined
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
        self.pending_reset = None;
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let max = self.tracker.expenses().len().saturating_sub(1);
        if self.selected_index < max {
            self.selected_index += 1;
        }
    }

    /// Select the newest entry
    pub fn select_last(&mut self) {
        self.selected_index = self.tracker.expenses().len().saturating_sub(1);
    }

    /// Keep the selection inside the list after it shrinks
    pub fn clamp_selection(&mut self) {
        let len = self.tracker.expenses().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn selected_expense(&self) -> Option<&Expense> {
        self.tracker.expenses().get(self.selected_index)
    }
}
