//! Expense log slot
//!
//! Stored under `expenses` as a JSON array in insertion order. Entries
//! written before ids existed get one assigned on load.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::AllowanceResult;
use crate::models::{Expense, ExpenseCategory, ExpenseId, Money};

use super::kv::KeyValueStore;
use super::{decode_slot, encode_slot};

/// Storage key of the expense log
pub const EXPENSES_KEY: &str = "expenses";

/// On-disk shape, where the id may be absent
#[derive(Debug, Deserialize)]
struct StoredExpense {
    #[serde(default)]
    id: Option<ExpenseId>,
    name: String,
    amount: Money,
    #[serde(default)]
    category: ExpenseCategory,
    date: DateTime<Utc>,
}

/// Result of loading the expense log
#[derive(Debug, Clone, Default)]
pub struct LoadedExpenses {
    pub expenses: Vec<Expense>,
    /// Whether any entry was given a new id and the log should be re-saved
    pub ids_assigned: bool,
}

/// Load the expense log, falling back to empty on missing or bad data
pub fn load_expenses<S: KeyValueStore + ?Sized>(store: &S) -> Vec<Expense> {
    load_expenses_with_status(store).expenses
}

/// Load the expense log and report whether ids had to be assigned
pub fn load_expenses_with_status<S: KeyValueStore + ?Sized>(store: &S) -> LoadedExpenses {
    let Some(stored) = decode_slot::<Vec<StoredExpense>, S>(store, EXPENSES_KEY) else {
        return LoadedExpenses::default();
    };

    let mut seen = HashSet::with_capacity(stored.len());
    let mut ids_assigned = false;

    let expenses: Vec<Expense> = stored
        .into_iter()
        .map(|entry| {
            let id = match entry.id {
                Some(id) if seen.insert(id) => id,
                _ => {
                    ids_assigned = true;
                    let id = ExpenseId::new();
                    seen.insert(id);
                    id
                }
            };
            Expense {
                id,
                name: entry.name,
                amount: entry.amount,
                category: entry.category,
                date: entry.date,
            }
        })
        .collect();

    if ids_assigned {
        info!(count = expenses.len(), "assigned ids to stored expenses");
    }
    debug!(count = expenses.len(), "loaded expense log");

    LoadedExpenses {
        expenses,
        ids_assigned,
    }
}

/// Persist the expense log
pub fn save_expenses<S: KeyValueStore + ?Sized>(
    store: &mut S,
    expenses: &[Expense],
) -> AllowanceResult<()> {
    encode_slot(store, EXPENSES_KEY, expenses)?;
    debug!(count = expenses.len(), "saved expense log");
    Ok(())
}
