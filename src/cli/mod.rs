//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod allowance;
pub mod expense;
pub mod history;
pub mod reset;
pub mod status;

pub use allowance::{handle_allowance_command, AllowanceCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use history::handle_history_command;
pub use reset::handle_reset_command;
pub use status::handle_status_command;
