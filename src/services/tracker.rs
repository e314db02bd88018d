//! Allowance tracker
//!
//! Owns the budget record and the expense log for the lifetime of a session,
//! and is the only thing that mutates them. Every operation follows the same
//! shape: validate, persist the new state, commit it in memory, then notify
//! listeners. A rejected operation leaves both state and storage untouched.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::timezone::DisplayZone;
use crate::error::{AllowanceError, AllowanceResult};
use crate::models::{BudgetRecord, Expense, ExpenseCategory, ExpenseId, Money};
use crate::storage::{KeyValueStore, MemoryStore, Storage};

use super::totals::{compute_totals_in, BudgetSummary, Totals};

/// Warning shown when an allowance amount is rejected
pub const INVALID_ALLOWANCE: &str = "Enter valid amount > 0";

/// Warning shown when an expense is rejected
pub const INVALID_EXPENSE: &str = "Enter valid name and amount";

/// What a committed mutation did
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    AllowanceAdded {
        amount: Money,
        before: BudgetRecord,
    },
    BudgetReset {
        before: BudgetRecord,
        cleared: Vec<Expense>,
    },
    ExpenseAdded(Expense),
    ExpenseDeleted {
        position: usize,
        expense: Expense,
    },
}

/// Receives a signal after every committed mutation
pub trait ChangeListener {
    fn on_change(&mut self, change: &StateChange, budget: &BudgetRecord, expenses: &[Expense]);
}

/// First half of a reset: describes what would be cleared
///
/// Pass it to [`Tracker::reset_budget`] to commit; dropping it declines.
#[derive(Debug)]
#[must_use = "a reset only happens when the request is passed to reset_budget"]
pub struct ResetRequest {
    total_budget: Money,
    expense_count: usize,
}

impl ResetRequest {
    pub fn total_budget(&self) -> Money {
        self.total_budget
    }

    pub fn expense_count(&self) -> usize {
        self.expense_count
    }

    /// Prompt shown to the user before committing
    pub fn prompt(&self) -> &'static str {
        "Reset budget? This will clear total and spent amount."
    }
}

/// Parse an allowance amount typed by the user
pub fn parse_allowance(input: &str) -> AllowanceResult<Money> {
    match Money::parse(input) {
        Ok(amount) if amount.is_positive() => Ok(amount),
        _ => Err(AllowanceError::Validation(INVALID_ALLOWANCE.into())),
    }
}

/// Parse an expense amount typed by the user
pub fn parse_expense_amount(input: &str) -> AllowanceResult<Money> {
    match Money::parse(input) {
        Ok(amount) if amount.is_positive() => Ok(amount),
        _ => Err(AllowanceError::Validation(INVALID_EXPENSE.into())),
    }
}

/// The single owner of budget state
pub struct Tracker<S: KeyValueStore = crate::storage::FileStore> {
    storage: Storage<S>,
    budget: BudgetRecord,
    expenses: Vec<Expense>,
    zone: DisplayZone,
    listeners: Vec<Box<dyn ChangeListener>>,
}

impl Tracker<MemoryStore> {
    /// A tracker backed by an empty in-memory store
    pub fn in_memory() -> Self {
        Self::new(Storage::in_memory())
    }
}

impl<S: KeyValueStore> Tracker<S> {
    /// Rehydrate state from storage
    ///
    /// Entries stored without ids are given one and written back right away,
    /// so ids stay stable across sessions.
    pub fn open(storage: Storage<S>) -> AllowanceResult<Self> {
        let mut tracker = Self::new(storage);
        let loaded = tracker.storage.load_expenses();
        tracker.budget = tracker.storage.load_budget();
        tracker.expenses = loaded.expenses;

        if loaded.ids_assigned {
            tracker.storage.save_expenses(&tracker.expenses)?;
        }

        info!(
            total = %tracker.budget.total_budget,
            expenses = tracker.expenses.len(),
            "opened tracker"
        );
        Ok(tracker)
    }

    fn new(storage: Storage<S>) -> Self {
        Self {
            storage,
            budget: BudgetRecord::default(),
            expenses: Vec::new(),
            zone: DisplayZone::default(),
            listeners: Vec::new(),
        }
    }

    /// Evaluate day/month boundaries in `zone`
    pub fn with_zone(mut self, zone: DisplayZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn zone(&self) -> DisplayZone {
        self.zone
    }

    /// Register a listener for committed mutations
    pub fn subscribe(&mut self, listener: Box<dyn ChangeListener>) {
        self.listeners.push(listener);
    }

    pub fn budget(&self) -> &BudgetRecord {
        &self.budget
    }

    /// The expense log in insertion order
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn storage(&self) -> &Storage<S> {
        &self.storage
    }

    /// Find an expense by full or short id
    pub fn find_expense(&self, identifier: &str) -> Option<(usize, &Expense)> {
        self.expenses
            .iter()
            .enumerate()
            .find(|(_, e)| e.id.matches(identifier))
    }

    /// Spend totals relative to `now`
    pub fn totals_at(&self, now: &DateTime<Utc>) -> Totals {
        compute_totals_in(&self.expenses, now, self.zone)
    }

    /// Dashboard numbers relative to `now`
    pub fn summary_at(&self, now: &DateTime<Utc>) -> BudgetSummary {
        BudgetSummary::new(&self.budget, self.totals_at(now))
    }

    /// Dashboard numbers for the current instant
    pub fn summary(&self) -> BudgetSummary {
        self.summary_at(&Utc::now())
    }

    /// Add to the allowance
    pub fn add_allowance(&mut self, amount: Money) -> AllowanceResult<&BudgetRecord> {
        if !amount.is_positive() {
            warn!(%amount, "rejected allowance");
            return Err(AllowanceError::Validation(INVALID_ALLOWANCE.into()));
        }

        let before = self.budget;
        let mut updated = self.budget;
        if let Err(e) = updated.credit(amount) {
            warn!(error = %e, "rejected allowance");
            return Err(AllowanceError::Validation(INVALID_ALLOWANCE.into()));
        }

        self.storage.save_budget(&updated)?;
        self.budget = updated;

        info!(%amount, total = %self.budget.total_budget, "added allowance");
        self.notify(StateChange::AllowanceAdded { amount, before });
        Ok(&self.budget)
    }

    /// Start a reset; nothing changes until the request is committed
    pub fn request_reset(&self) -> ResetRequest {
        ResetRequest {
            total_budget: self.budget.total_budget,
            expense_count: self.expenses.len(),
        }
    }

    /// Commit a reset: allowance back to zero, expense log cleared
    ///
    /// The expense slot is cleared first. If the budget write then fails the
    /// log is written back, so storage never holds a zeroed allowance next to
    /// the old expenses.
    pub fn reset_budget(&mut self, _confirmed: ResetRequest) -> AllowanceResult<()> {
        let mut cleared = self.budget;
        cleared.clear();

        self.storage.save_expenses(&[])?;
        if let Err(e) = self.storage.save_budget(&cleared) {
            if let Err(restore) = self.storage.save_expenses(&self.expenses) {
                warn!(error = %restore, "failed to restore expenses after aborted reset");
            }
            return Err(e);
        }

        let before = std::mem::replace(&mut self.budget, cleared);
        let cleared_expenses = std::mem::take(&mut self.expenses);

        info!(
            previous_total = %before.total_budget,
            cleared = cleared_expenses.len(),
            "reset budget"
        );
        self.notify(StateChange::BudgetReset {
            before,
            cleared: cleared_expenses,
        });
        Ok(())
    }

    /// Log an expense recorded now
    pub fn add_expense(
        &mut self,
        name: &str,
        amount: Money,
        category: ExpenseCategory,
    ) -> AllowanceResult<&Expense> {
        self.add_expense_at(name, amount, category, Utc::now())
    }

    /// Log an expense recorded at `date`
    pub fn add_expense_at(
        &mut self,
        name: &str,
        amount: Money,
        category: ExpenseCategory,
        date: DateTime<Utc>,
    ) -> AllowanceResult<&Expense> {
        let expense = Expense::new(name, amount, category, date);
        if let Err(e) = expense.validate() {
            warn!(error = %e, "rejected expense");
            return Err(AllowanceError::Validation(INVALID_EXPENSE.into()));
        }

        let mut updated = self.expenses.clone();
        updated.push(expense.clone());

        self.storage.save_expenses(&updated)?;
        self.expenses = updated;

        info!(id = %expense.id, amount = %expense.amount, category = expense.category.key(), "added expense");
        self.notify(StateChange::ExpenseAdded(expense));

        let last = self.expenses.len() - 1;
        Ok(&self.expenses[last])
    }

    /// Remove the expense at `position`
    ///
    /// Out-of-range positions are a no-op and return `Ok(None)`.
    pub fn delete_expense(&mut self, position: usize) -> AllowanceResult<Option<Expense>> {
        if position >= self.expenses.len() {
            warn!(position, len = self.expenses.len(), "delete position out of range");
            return Ok(None);
        }

        let mut updated = self.expenses.clone();
        let expense = updated.remove(position);

        self.storage.save_expenses(&updated)?;
        self.expenses = updated;

        info!(id = %expense.id, position, "deleted expense");
        self.notify(StateChange::ExpenseDeleted {
            position,
            expense: expense.clone(),
        });
        Ok(Some(expense))
    }

    /// Remove the expense with `id`; unknown ids are a no-op
    pub fn delete_expense_by_id(&mut self, id: ExpenseId) -> AllowanceResult<Option<Expense>> {
        match self.expenses.iter().position(|e| e.id == id) {
            Some(position) => self.delete_expense(position),
            None => {
                warn!(%id, "delete of unknown expense id");
                Ok(None)
            }
        }
    }

    fn notify(&mut self, change: StateChange) {
        for listener in &mut self.listeners {
            listener.on_change(&change, &self.budget, &self.expenses);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{BUDGET_KEY, EXPENSES_KEY};
    use chrono::TimeZone;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<StateChange>>>);

    impl ChangeListener for Recorder {
        fn on_change(&mut self, change: &StateChange, _: &BudgetRecord, _: &[Expense]) {
            self.0.borrow_mut().push(change.clone());
        }
    }

    fn recorded(tracker: &mut Tracker<MemoryStore>) -> Rc<RefCell<Vec<StateChange>>> {
        let changes = Rc::new(RefCell::new(Vec::new()));
        tracker.subscribe(Box::new(Recorder(Rc::clone(&changes))));
        changes
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
    }

    fn utc_tracker() -> Tracker<MemoryStore> {
        Tracker::in_memory().with_zone("+00:00".parse().unwrap())
    }

    /// In-memory store that can be told to refuse writes to one slot
    #[derive(Debug, Clone, Default)]
    struct FlakyStore {
        inner: MemoryStore,
        refuse: Option<&'static str>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, AllowanceError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), AllowanceError> {
            if self.refuse == Some(key) {
                return Err(AllowanceError::Storage(format!("write to {} refused", key)));
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), AllowanceError> {
            self.inner.remove(key)
        }
    }

    fn funded_flaky_tracker() -> Tracker<FlakyStore> {
        let mut tracker = Tracker::open(Storage::new(FlakyStore::default())).unwrap();
        tracker.add_allowance(Money::from_units(1000)).unwrap();
        tracker
            .add_expense_at("Lunch", Money::from_units(300), ExpenseCategory::Food, now())
            .unwrap();
        tracker
    }

    #[test]
    fn test_allowance_then_expense_scenario() {
        let mut tracker = utc_tracker();
        assert!(tracker.budget().total_budget.is_zero());

        tracker.add_allowance(Money::from_units(1000)).unwrap();
        assert_eq!(tracker.budget().total_budget, Money::from_units(1000));

        tracker
            .add_expense_at("Lunch", Money::from_units(300), ExpenseCategory::Food, now())
            .unwrap();
        assert_eq!(tracker.expenses().len(), 1);

        let summary = tracker.summary_at(&now());
        assert_eq!(summary.totals.total_spent, Money::from_units(300));
        assert_eq!(summary.remaining(), Money::from_units(700));
        assert_eq!(summary.percent_spent(), 30.0);
    }

    #[test]
    fn test_reset_after_scenario() {
        let mut tracker = utc_tracker();
        tracker.add_allowance(Money::from_units(1000)).unwrap();
        tracker
            .add_expense_at("Lunch", Money::from_units(300), ExpenseCategory::Food, now())
            .unwrap();

        let request = tracker.request_reset();
        assert_eq!(request.total_budget(), Money::from_units(1000));
        assert_eq!(request.expense_count(), 1);
        tracker.reset_budget(request).unwrap();

        assert!(tracker.budget().total_budget.is_zero());
        assert!(tracker.expenses().is_empty());
        assert!(tracker.summary_at(&now()).totals.total_spent.is_zero());

        // Persisted as well
        let reopened = Tracker::open(tracker.storage().clone()).unwrap();
        assert!(reopened.budget().total_budget.is_zero());
        assert!(reopened.expenses().is_empty());
    }

    #[test]
    fn test_failed_budget_write_keeps_reset_atomic() {
        let mut tracker = funded_flaky_tracker();
        tracker.storage.store_mut().refuse = Some(BUDGET_KEY);

        let request = tracker.request_reset();
        assert!(tracker.reset_budget(request).is_err());

        assert_eq!(tracker.budget().total_budget, Money::from_units(1000));
        assert_eq!(tracker.expenses().len(), 1);

        let reopened = Tracker::open(tracker.storage().clone()).unwrap();
        assert_eq!(reopened.budget().total_budget, Money::from_units(1000));
        assert_eq!(reopened.expenses().len(), 1);
        assert_eq!(reopened.expenses()[0].name, "Lunch");
    }

    #[test]
    fn test_failed_expense_write_aborts_reset() {
        let mut tracker = funded_flaky_tracker();
        tracker.storage.store_mut().refuse = Some(EXPENSES_KEY);

        let request = tracker.request_reset();
        assert!(tracker.reset_budget(request).is_err());

        let reopened = Tracker::open(tracker.storage().clone()).unwrap();
        assert_eq!(reopened.budget().total_budget, Money::from_units(1000));
        assert_eq!(reopened.expenses().len(), 1);
    }

    #[test]
    fn test_declined_reset_changes_nothing() {
        let mut tracker = utc_tracker();
        tracker.add_allowance(Money::from_units(50)).unwrap();

        let request = tracker.request_reset();
        drop(request);

        assert_eq!(tracker.budget().total_budget, Money::from_units(50));
    }

    #[test]
    fn test_rejected_allowance() {
        let mut tracker = utc_tracker();
        let changes = recorded(&mut tracker);

        for bad in [Money::from_units(-5), Money::zero()] {
            let err = tracker.add_allowance(bad).unwrap_err();
            assert!(err.is_validation());
            assert_eq!(err.to_string(), INVALID_ALLOWANCE);
        }

        assert!(tracker.budget().total_budget.is_zero());
        assert!(tracker.storage().store().is_empty());
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_allowance_overflow_is_rejected() {
        let mut tracker = utc_tracker();
        let changes = recorded(&mut tracker);
        let amount = parse_allowance("90000000000000000").unwrap();

        tracker.add_allowance(amount).unwrap();
        let err = tracker.add_allowance(amount).unwrap_err();
        assert_eq!(err.to_string(), INVALID_ALLOWANCE);

        assert_eq!(tracker.budget().total_budget, amount);
        assert_eq!(changes.borrow().len(), 1);

        let reopened = Tracker::open(tracker.storage().clone()).unwrap();
        assert_eq!(reopened.budget().total_budget, amount);
    }

    #[test]
    fn test_summary_of_huge_stored_log() {
        let mut storage = Storage::in_memory();
        storage
            .store_mut()
            .set(
                EXPENSES_KEY,
                r#"[{"name":"Car","amount":90000000000000000,"category":"other","date":"2025-03-14T09:05:00Z"},
                    {"name":"Boat","amount":90000000000000000,"category":"other","date":"2025-03-14T09:05:00Z"}]"#,
            )
            .unwrap();

        let tracker = Tracker::open(storage).unwrap();
        let summary = tracker.summary();
        assert_eq!(summary.totals.total_spent.cents(), i64::MAX);
        assert_eq!(summary.remaining_display(), Money::zero());
    }

    #[test]
    fn test_rejected_expense() {
        let mut tracker = utc_tracker();

        let err = tracker
            .add_expense_at("", Money::from_units(10), ExpenseCategory::Food, now())
            .unwrap_err();
        assert_eq!(err.to_string(), INVALID_EXPENSE);

        assert!(tracker
            .add_expense_at("   ", Money::from_units(10), ExpenseCategory::Food, now())
            .is_err());
        assert!(tracker
            .add_expense_at("Tea", Money::zero(), ExpenseCategory::Food, now())
            .is_err());

        assert!(tracker.expenses().is_empty());
        assert!(tracker.storage().store().is_empty());
    }

    #[test]
    fn test_delete_single_entry() {
        let mut tracker = utc_tracker();
        tracker
            .add_expense_at("Lunch", Money::from_units(300), ExpenseCategory::Food, now())
            .unwrap();

        let removed = tracker.delete_expense(0).unwrap().unwrap();
        assert_eq!(removed.name, "Lunch");
        assert!(tracker.expenses().is_empty());
        assert_eq!(tracker.totals_at(&now()), Totals::default());
    }

    #[test]
    fn test_delete_out_of_range_is_noop() {
        let mut tracker = utc_tracker();
        let changes = recorded(&mut tracker);
        tracker
            .add_expense_at("Lunch", Money::from_units(300), ExpenseCategory::Food, now())
            .unwrap();

        assert_eq!(tracker.delete_expense(1).unwrap(), None);
        assert_eq!(tracker.delete_expense_by_id(ExpenseId::new()).unwrap(), None);

        assert_eq!(tracker.expenses().len(), 1);
        assert_eq!(changes.borrow().len(), 1);
    }

    #[test]
    fn test_delete_by_id_keeps_order() {
        let mut tracker = utc_tracker();
        for name in ["A", "B", "C"] {
            tracker
                .add_expense_at(name, Money::from_units(1), ExpenseCategory::Other, now())
                .unwrap();
        }
        let middle = tracker.expenses()[1].id;

        let removed = tracker.delete_expense_by_id(middle).unwrap().unwrap();
        assert_eq!(removed.name, "B");

        let names: Vec<_> = tracker.expenses().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn test_find_expense_by_short_id() {
        let mut tracker = utc_tracker();
        let id = tracker
            .add_expense_at("Lunch", Money::from_units(300), ExpenseCategory::Food, now())
            .unwrap()
            .id;

        let (position, found) = tracker.find_expense(&id.short()).unwrap();
        assert_eq!(position, 0);
        assert_eq!(found.id, id);
        assert!(tracker.find_expense("exp-zzzzzzzz").is_none());
    }

    #[test]
    fn test_listeners_see_committed_state() {
        struct Check;
        impl ChangeListener for Check {
            fn on_change(&mut self, change: &StateChange, budget: &BudgetRecord, expenses: &[Expense]) {
                match change {
                    StateChange::AllowanceAdded { amount, before } => {
                        assert_eq!(before.total_budget + *amount, budget.total_budget);
                    }
                    StateChange::ExpenseAdded(expense) => {
                        assert_eq!(expenses.last(), Some(expense));
                    }
                    _ => {}
                }
            }
        }

        let mut tracker = utc_tracker();
        let changes = recorded(&mut tracker);
        tracker.subscribe(Box::new(Check));

        tracker.add_allowance(Money::from_units(10)).unwrap();
        tracker
            .add_expense_at("Tea", Money::from_units(2), ExpenseCategory::Food, now())
            .unwrap();
        tracker.delete_expense(0).unwrap();
        let request = tracker.request_reset();
        tracker.reset_budget(request).unwrap();

        let changes = changes.borrow();
        assert_eq!(changes.len(), 4);
        assert!(matches!(changes[0], StateChange::AllowanceAdded { .. }));
        assert!(matches!(changes[1], StateChange::ExpenseAdded(_)));
        assert!(matches!(changes[2], StateChange::ExpenseDeleted { position: 0, .. }));
        assert!(matches!(changes[3], StateChange::BudgetReset { .. }));
    }

    #[test]
    fn test_open_rehydrates_and_assigns_ids() {
        let mut storage = Storage::in_memory();
        storage
            .store_mut()
            .set("budgetAppData", r#"{"totalBudget":500}"#)
            .unwrap();
        storage
            .store_mut()
            .set(
                "expenses",
                r#"[{"name":"Lunch","amount":300,"category":"food","date":"2025-03-14T09:05:00.000Z"}]"#,
            )
            .unwrap();

        let first = Tracker::open(storage).unwrap();
        assert_eq!(first.budget().total_budget, Money::from_units(500));
        let id = first.expenses()[0].id;

        // The generated id was written back, so a second session sees the same one
        let second = Tracker::open(first.storage().clone()).unwrap();
        assert_eq!(second.expenses()[0].id, id);
    }

    #[test]
    fn test_parse_inputs() {
        assert_eq!(parse_allowance("1000").unwrap(), Money::from_units(1000));
        assert!(parse_allowance("0").is_err());
        assert!(parse_allowance("-5").is_err());
        assert!(parse_allowance("lots").is_err());
        assert!(parse_allowance("").is_err());
        assert!(parse_allowance("abc5").is_err());
        assert!(parse_allowance("$-5").is_err());
        assert_eq!(parse_allowance("₦5").unwrap(), Money::from_units(5));

        assert_eq!(parse_expense_amount("12.50").unwrap(), Money::from_cents(1250));
        assert_eq!(
            parse_expense_amount("abc").unwrap_err().to_string(),
            INVALID_EXPENSE
        );
        assert!(parse_expense_amount("lots5").is_err());
    }
}
