//! Service layer
//!
//! The service layer provides the rules on top of the storage layer:
//! validation, the mutation operations, and spend aggregation.

pub mod totals;
pub mod tracker;

pub use totals::{compute_totals, compute_totals_in, percent_spent, BudgetSummary, Totals};
pub use tracker::{
    parse_allowance, parse_expense_amount, ChangeListener, ResetRequest, StateChange, Tracker,
    INVALID_ALLOWANCE, INVALID_EXPENSE,
};
