//! Budget record slot
//!
//! Stored under `budgetAppData` as `{"totalBudget": <number>}`.

use tracing::{debug, warn};

use crate::error::AllowanceResult;
use crate::models::BudgetRecord;

use super::kv::KeyValueStore;
use super::{decode_slot, encode_slot};

/// Storage key of the budget record
pub const BUDGET_KEY: &str = "budgetAppData";

/// Load the budget record, falling back to zero on missing or bad data
pub fn load_budget<S: KeyValueStore + ?Sized>(store: &S) -> BudgetRecord {
    let Some(record) = decode_slot::<BudgetRecord, S>(store, BUDGET_KEY) else {
        return BudgetRecord::default();
    };

    if let Err(e) = record.validate() {
        warn!(key = BUDGET_KEY, error = %e, "discarding invalid budget record");
        return BudgetRecord::default();
    }

    debug!(total = %record.total_budget, "loaded budget record");
    record
}

/// Persist the budget record
pub fn save_budget<S: KeyValueStore + ?Sized>(
    store: &mut S,
    record: &BudgetRecord,
) -> AllowanceResult<()> {
    encode_slot(store, BUDGET_KEY, record)?;
    debug!(total = %record.total_budget, "saved budget record");
    Ok(())
}
