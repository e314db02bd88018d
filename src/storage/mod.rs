//! Storage layer for the allowance tracker
//!
//! Two independent slots in a string-keyed store: the budget record and the
//! expense log, each serialized as JSON. Loads never fail; anything missing
//! or malformed degrades to the default value.

pub mod budget;
pub mod expenses;
pub mod file_io;
pub mod kv;

pub use budget::{load_budget, save_budget, BUDGET_KEY};
pub use expenses::{load_expenses, load_expenses_with_status, save_expenses, LoadedExpenses, EXPENSES_KEY};
pub use kv::{FileStore, KeyValueStore, MemoryStore};

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::config::paths::AllowancePaths;
use crate::error::{AllowanceError, AllowanceResult};
use crate::models::{BudgetRecord, Expense};

/// Read and parse a slot, returning `None` for missing, `null` or bad data
fn decode_slot<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "failed to read slot, using default");
            return None;
        }
    };

    match serde_json::from_str::<Option<T>>(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "corrupt slot, using default");
            None
        }
    }
}

/// Serialize a value and write it to a slot
fn encode_slot<T, S>(store: &mut S, key: &str, value: &T) -> AllowanceResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value)
        .map_err(|e| AllowanceError::Json(format!("Failed to serialize {}: {}", key, e)))?;
    store.set(key, &json)
}

/// Owns the backing store and exposes the two slots
#[derive(Debug, Clone)]
pub struct Storage<S: KeyValueStore = FileStore> {
    store: S,
}

impl Storage<FileStore> {
    /// Open the file-backed store under the data directory
    pub fn open(paths: &AllowancePaths) -> AllowanceResult<Self> {
        paths.ensure_directories()?;
        Ok(Self::new(FileStore::new(paths.data_dir())))
    }
}

impl Storage<MemoryStore> {
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn load_budget(&self) -> BudgetRecord {
        load_budget(&self.store)
    }

    pub fn load_expenses(&self) -> LoadedExpenses {
        load_expenses_with_status(&self.store)
    }

    pub fn save_budget(&mut self, record: &BudgetRecord) -> AllowanceResult<()> {
        save_budget(&mut self.store, record)
    }

    pub fn save_expenses(&mut self, expenses: &[Expense]) -> AllowanceResult<()> {
        save_expenses(&mut self.store, expenses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, Money};
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AllowancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.store().dir(), &paths.data_dir());
    }

    #[test]
    fn test_file_backed_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AllowancePaths::with_base_dir(temp_dir.path().to_path_buf());

        let record = BudgetRecord::new(Money::from_units(1000));
        let log = vec![Expense::new(
            "Lunch",
            Money::from_units(300),
            ExpenseCategory::Food,
            Utc::now(),
        )];

        {
            let mut storage = Storage::open(&paths).unwrap();
            storage.save_budget(&record).unwrap();
            storage.save_expenses(&log).unwrap();
        }

        let storage = Storage::open(&paths).unwrap();
        assert_eq!(storage.load_budget(), record);
        assert_eq!(storage.load_expenses().expenses, log);
        assert!(paths.data_dir().join("budgetAppData.json").exists());
        assert!(paths.data_dir().join("expenses.json").exists());
    }

    #[test]
    fn test_null_slot_is_default() {
        let mut storage = Storage::in_memory();
        storage.store_mut().set(BUDGET_KEY, "null").unwrap();
        storage.store_mut().set(EXPENSES_KEY, "null").unwrap();

        assert_eq!(storage.load_budget(), BudgetRecord::default());
        assert!(storage.load_expenses().expenses.is_empty());
    }
}
