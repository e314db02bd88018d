//! Dialog modules for the TUI
//!
//! Contains modal dialogs for the budget operations

pub mod allowance;
pub mod confirm;
pub mod expense;
