//! Audit logger for append-only audit log
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use tracing::warn;

use crate::error::{AllowanceError, AllowanceResult};
use crate::models::{BudgetRecord, Expense};
use crate::services::{ChangeListener, StateChange};

use super::entry::AuditEntry;

/// Writes audit entries to a JSONL file
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry
    pub fn log(&self, entry: &AuditEntry) -> AllowanceResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append several entries with a single flush
    pub fn log_batch(&self, entries: &[AuditEntry]) -> AllowanceResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| AllowanceError::Io(format!("Failed to open audit log: {}", e)))?;

        for entry in entries {
            let json = serde_json::to_string(entry).map_err(|e| {
                AllowanceError::Json(format!("Failed to serialize audit entry: {}", e))
            })?;

            writeln!(file, "{}", json)
                .map_err(|e| AllowanceError::Io(format!("Failed to write audit entry: {}", e)))?;
        }

        file.flush()
            .map_err(|e| AllowanceError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Read all entries, oldest first
    ///
    /// Lines that do not parse are skipped with a warning.
    pub fn read_all(&self) -> AllowanceResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| AllowanceError::Io(format!("Failed to open audit log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                AllowanceError::Io(format!(
                    "Failed to read audit log line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<AuditEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    warn!(line = line_num + 1, error = %e, "skipping corrupt audit entry");
                }
            }
        }

        Ok(entries)
    }

    /// Read the most recent N entries
    pub fn read_recent(&self, count: usize) -> AllowanceResult<Vec<AuditEntry>> {
        let mut all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries.split_off(start))
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

impl ChangeListener for AuditLogger {
    fn on_change(&mut self, change: &StateChange, budget: &BudgetRecord, _expenses: &[Expense]) {
        let entries = AuditEntry::from_change(change, budget);
        if let Err(e) = self.log_batch(&entries) {
            // The mutation is already committed
            warn!(error = %e, path = %self.log_path.display(), "failed to write audit entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{EntityType, Operation};
    use crate::models::Money;
    use crate::services::Tracker;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn budget_entry(total: i64) -> AuditEntry {
        AuditEntry::update(
            EntityType::Budget,
            "budget",
            None,
            &BudgetRecord::default(),
            &BudgetRecord::new(Money::from_units(total)),
            None,
        )
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();
        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger.read_recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();

        logger.log(&budget_entry(100)).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Update);
        assert_eq!(entries[0].entity_type, EntityType::Budget);
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();

        let entries: Vec<_> = (1..=5).map(budget_entry).collect();
        logger.log_batch(&entries).unwrap();

        let recent = logger.read_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[1].after.as_ref().unwrap()["totalBudget"], 5);
    }

    #[test]
    fn test_corrupt_line_is_skipped() {
        let (logger, _temp) = create_test_logger();
        logger.log(&budget_entry(1)).unwrap();
        let mut file = OpenOptions::new().append(true).open(logger.path()).unwrap();
        writeln!(file, "garbage").unwrap();
        drop(file);
        logger.log(&budget_entry(2)).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].after.as_ref().unwrap()["totalBudget"], 2);

        let recent = logger.read_recent(1).unwrap();
        assert_eq!(recent[0].after.as_ref().unwrap()["totalBudget"], 2);
    }

    #[test]
    fn test_listens_to_tracker() {
        let (logger, _temp) = create_test_logger();
        let mut tracker = Tracker::in_memory();
        tracker.subscribe(Box::new(logger.clone()));

        tracker.add_allowance(Money::from_units(1000)).unwrap();
        tracker
            .add_expense("Lunch", Money::from_units(300), crate::models::ExpenseCategory::Food)
            .unwrap();
        let request = tracker.request_reset();
        tracker.reset_budget(request).unwrap();

        let entries = logger.read_all().unwrap();
        let ops: Vec<_> = entries.iter().map(|e| (e.entity_type, e.operation)).collect();
        assert_eq!(
            ops,
            [
                (EntityType::Budget, Operation::Update),
                (EntityType::Expense, Operation::Create),
                (EntityType::Budget, Operation::Update),
                (EntityType::Expense, Operation::Delete),
            ]
        );
    }
}
