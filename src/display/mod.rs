//! Display formatting for terminal output
//!
//! Provides utilities for formatting the budget and the expense log for
//! terminal display. The TUI reuses the same currency and date helpers.

pub mod dashboard;
pub mod expense;
pub mod format;

pub use dashboard::{format_dashboard, header_date};
pub use expense::{expense_date, format_expense_line, format_expense_list};
pub use format::{
    format_bar, format_currency, format_display_date, format_header_date, format_percentage,
    truncate,
};
