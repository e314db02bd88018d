//! Spend aggregation
//!
//! Derives all-time, today and this-month totals from the expense log
//! relative to a reference instant. Nothing here is cached or persisted; the
//! totals are recomputed from the log every time.

use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::config::timezone::DisplayZone;
use crate::models::{BudgetRecord, Expense, Money};

/// Spend totals for one reference instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    /// Sum over the whole log
    pub total_spent: Money,
    /// Entries on the same calendar day as "now"
    pub today_total: Money,
    /// Entries in the same calendar month and year as "now"
    pub month_total: Money,
}

/// Compute spend totals
///
/// Day and month boundaries are evaluated in the timezone carried by `now`.
/// Sums stick at the largest representable amount rather than wrapping.
pub fn compute_totals<Tz: TimeZone>(log: &[Expense], now: &DateTime<Tz>) -> Totals {
    let tz = now.timezone();
    let today = now.date_naive();

    log.iter().fold(Totals::default(), |mut totals, expense| {
        let date = expense.date.with_timezone(&tz).date_naive();

        totals.total_spent = totals.total_spent.saturating_add(expense.amount);
        if date.year() == today.year() && date.month() == today.month() {
            totals.month_total = totals.month_total.saturating_add(expense.amount);
            if date.day() == today.day() {
                totals.today_total = totals.today_total.saturating_add(expense.amount);
            }
        }
        totals
    })
}

/// Compute spend totals with "now" resolved in a configured zone
pub fn compute_totals_in(log: &[Expense], now: &DateTime<Utc>, zone: DisplayZone) -> Totals {
    match zone {
        DisplayZone::Local => compute_totals(log, &now.with_timezone(&chrono::Local)),
        DisplayZone::Fixed(offset) => compute_totals(log, &now.with_timezone(&offset)),
    }
}

/// Dashboard numbers: the budget record combined with the spend totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BudgetSummary {
    pub total_budget: Money,
    pub totals: Totals,
}

impl BudgetSummary {
    pub fn new(budget: &BudgetRecord, totals: Totals) -> Self {
        Self {
            total_budget: budget.total_budget,
            totals,
        }
    }

    /// Allowance minus all-time spend; may be negative
    pub fn remaining(&self) -> Money {
        self.total_budget - self.totals.total_spent
    }

    /// Remaining as displayed: never below zero
    pub fn remaining_display(&self) -> Money {
        self.remaining().max_zero()
    }

    /// Whether spend has exceeded the allowance
    pub fn is_overspent(&self) -> bool {
        self.remaining().is_negative()
    }

    /// Share of the allowance spent, in `[0, 100]`
    pub fn percent_spent(&self) -> f64 {
        percent_spent(self.totals.total_spent, self.total_budget)
    }
}

/// `min(spent / budget * 100, 100)`, or `0` when there is no budget
pub fn percent_spent(total_spent: Money, total_budget: Money) -> f64 {
    if !total_budget.is_positive() {
        return 0.0;
    }
    let percent = total_spent.cents() as f64 / total_budget.cents() as f64 * 100.0;
    percent.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseCategory;
    use chrono::FixedOffset;

    fn expense(amount: i64, date: DateTime<Utc>) -> Expense {
        Expense::new("Item", Money::from_units(amount), ExpenseCategory::Other, date)
    }

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_log_is_all_zero() {
        let totals = compute_totals(&[], &Utc::now());
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn test_total_ignores_dates() {
        let log = vec![
            expense(10, utc(2020, 1, 1, 0)),
            expense(20, utc(2025, 3, 14, 9)),
            expense(30, utc(2031, 12, 31, 23)),
        ];
        let totals = compute_totals(&log, &utc(2025, 3, 14, 12));
        assert_eq!(totals.total_spent, Money::from_units(60));
    }

    #[test]
    fn test_entry_at_now_counts_everywhere() {
        let now = utc(2025, 3, 14, 12);
        let totals = compute_totals(&[expense(15, now)], &now);

        assert_eq!(totals.today_total, Money::from_units(15));
        assert_eq!(totals.month_total, Money::from_units(15));
        assert_eq!(totals.total_spent, Money::from_units(15));
    }

    #[test]
    fn test_day_and_month_buckets() {
        let now = utc(2025, 3, 14, 12);
        let log = vec![
            expense(1, utc(2025, 3, 14, 0)),  // today
            expense(2, utc(2025, 3, 1, 8)),   // this month
            expense(4, utc(2025, 2, 14, 12)), // last month, same day number
            expense(8, utc(2024, 3, 14, 12)), // same day and month, last year
        ];
        let totals = compute_totals(&log, &now);

        assert_eq!(totals.today_total, Money::from_units(1));
        assert_eq!(totals.month_total, Money::from_units(3));
        assert_eq!(totals.total_spent, Money::from_units(15));
    }

    #[test]
    fn test_boundaries_follow_zone_of_now() {
        // 23:30 UTC on the 31st is already April 1st at +01:00
        let log = vec![expense(5, utc(2025, 3, 31, 23) + chrono::Duration::minutes(30))];
        let plus_one = FixedOffset::east_opt(3600).unwrap();

        let in_utc = compute_totals(&log, &utc(2025, 4, 1, 12));
        assert_eq!(in_utc.month_total, Money::zero());

        let shifted = compute_totals(&log, &utc(2025, 4, 1, 12).with_timezone(&plus_one));
        assert_eq!(shifted.today_total, Money::from_units(5));
        assert_eq!(shifted.month_total, Money::from_units(5));

        let via_zone = compute_totals_in(&log, &utc(2025, 4, 1, 12), DisplayZone::Fixed(plus_one));
        assert_eq!(via_zone, shifted);
    }

    #[test]
    fn test_huge_log_saturates() {
        let now = utc(2025, 3, 14, 12);
        let huge = Money::from_cents(i64::MAX / 2 + 1);
        let log = vec![
            Expense::new("Car", huge, ExpenseCategory::Other, now),
            Expense::new("House", huge, ExpenseCategory::Other, now),
        ];

        let totals = compute_totals(&log, &now);
        assert_eq!(totals.total_spent.cents(), i64::MAX);
        assert_eq!(totals.today_total.cents(), i64::MAX);

        let summary = BudgetSummary::new(&BudgetRecord::new(Money::from_units(10)), totals);
        assert!(summary.is_overspent());
        assert_eq!(summary.percent_spent(), 100.0);
    }

    #[test]
    fn test_percent_spent_bounds() {
        assert_eq!(percent_spent(Money::from_units(50), Money::zero()), 0.0);
        assert_eq!(percent_spent(Money::zero(), Money::zero()), 0.0);
        assert_eq!(percent_spent(Money::from_units(300), Money::from_units(1000)), 30.0);
        assert_eq!(percent_spent(Money::from_units(5000), Money::from_units(1000)), 100.0);
    }

    #[test]
    fn test_summary_remaining() {
        let budget = BudgetRecord::new(Money::from_units(1000));
        let totals = Totals {
            total_spent: Money::from_units(1200),
            ..Totals::default()
        };
        let summary = BudgetSummary::new(&budget, totals);

        assert_eq!(summary.remaining(), Money::from_units(-200));
        assert_eq!(summary.remaining_display(), Money::zero());
        assert!(summary.is_overspent());
        assert_eq!(summary.percent_spent(), 100.0);
    }
}
