//! Budget record
//!
//! The single record holding the allowance accumulated so far. It is
//! overwritten in place; a reset brings it back to zero.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Total allowance granted so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetRecord {
    /// Accumulated allowance, never negative
    #[serde(rename = "totalBudget", default)]
    pub total_budget: Money,
}

impl BudgetRecord {
    pub fn new(total_budget: Money) -> Self {
        Self { total_budget }
    }

    /// Add to the allowance; the record is unchanged if the sum overflows
    pub fn credit(&mut self, amount: Money) -> Result<(), BudgetValidationError> {
        self.total_budget = self
            .total_budget
            .checked_add(amount)
            .ok_or(BudgetValidationError::Overflow(amount))?;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.total_budget = Money::zero();
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.total_budget.is_negative() {
            return Err(BudgetValidationError::NegativeTotal(self.total_budget));
        }
        Ok(())
    }
}

/// Validation errors for budget records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeTotal(Money),
    Overflow(Money),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeTotal(total) => write!(f, "Total budget cannot be negative ({})", total),
            Self::Overflow(amount) => write!(f, "Adding {} would exceed the largest total", amount),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
