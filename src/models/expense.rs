//! Expense model
//!
//! One logged spend event. Entries are appended to the expense log in
//! creation order and carry the instant they were recorded.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;

/// Fixed set of spending categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    Health,
    /// Fallback for anything else, including unknown stored values
    #[default]
    #[serde(other)]
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 7] = [
        Self::Food,
        Self::Transport,
        Self::Shopping,
        Self::Bills,
        Self::Entertainment,
        Self::Health,
        Self::Other,
    ];

    /// Parse category from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" | "groceries" => Some(Self::Food),
            "transport" | "transportation" => Some(Self::Transport),
            "shopping" => Some(Self::Shopping),
            "bills" | "utilities" => Some(Self::Bills),
            "entertainment" | "fun" => Some(Self::Entertainment),
            "health" | "medical" => Some(Self::Health),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Lowercase key as stored on disk
    pub fn key(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Shopping => "shopping",
            Self::Bills => "bills",
            Self::Entertainment => "entertainment",
            Self::Health => "health",
            Self::Other => "other",
        }
    }

    /// The next category in `ALL`, wrapping around
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// The previous category in `ALL`, wrapping around
    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Food => write!(f, "Food"),
            Self::Transport => write!(f, "Transport"),
            Self::Shopping => write!(f, "Shopping"),
            Self::Bills => write!(f, "Bills"),
            Self::Entertainment => write!(f, "Entertainment"),
            Self::Health => write!(f, "Health"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A single expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Stable identifier; generated for entries stored before ids existed
    #[serde(default)]
    pub id: ExpenseId,

    /// What the money went on
    pub name: String,

    /// Always positive
    pub amount: Money,

    #[serde(default)]
    pub category: ExpenseCategory,

    /// When the expense was recorded (RFC 3339 on disk)
    pub date: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense recorded at `date`
    ///
    /// The name is trimmed and the timestamp truncated to milliseconds.
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        category: ExpenseCategory,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            name: name.into().trim().to_string(),
            amount,
            category,
            date: date.trunc_subsecs(3),
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyName);
        }

        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.amount)
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyName,
    NonPositiveAmount(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense name cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be greater than zero (got {})", amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
