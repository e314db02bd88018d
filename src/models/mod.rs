//! Core data models
//!
//! This module contains the data structures of the allowance domain: the
//! budget record, expense entries, their ids, and the money type.

pub mod budget;
pub mod expense;
pub mod ids;
pub mod money;

pub use budget::{BudgetRecord, BudgetValidationError};
pub use expense::{Expense, ExpenseCategory, ExpenseValidationError};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
