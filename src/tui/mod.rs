//! Terminal User Interface module
//!
//! An interactive dashboard for the allowance tracker using ratatui: budget
//! figures on top, the expense log below, and modal dialogs for the
//! mutations.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
