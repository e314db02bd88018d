//! Expense CLI commands
//!
//! Implements CLI commands for adding, listing, and deleting expenses.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_expense_line, format_expense_list};
use crate::error::{AllowanceError, AllowanceResult};
use crate::models::{Expense, ExpenseCategory};
use crate::services::{parse_expense_amount, Tracker, INVALID_EXPENSE};
use crate::storage::KeyValueStore;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Log an expense
    Add {
        /// What the money was spent on
        name: String,
        /// Amount (e.g., "300" or "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category (food, transport, shopping, bills, entertainment, health, other)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List expenses, oldest first
    #[command(alias = "ls")]
    List,
    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Position from `expense list` (1-based) or expense ID
        target: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command<S: KeyValueStore>(
    tracker: &mut Tracker<S>,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> AllowanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            name,
            amount,
            category,
        } => {
            let amount = parse_expense_amount(&amount)?;
            let category = match category {
                Some(c) => ExpenseCategory::parse(&c)
                    .ok_or_else(|| AllowanceError::Validation(format!("Unknown category: {}", c)))?,
                None => settings.default_category,
            };

            let expense = tracker.add_expense(&name, amount, category)?;
            println!(
                "Added expense: {}",
                format_expense_line(expense, symbol, settings.timezone)
            );
        }

        ExpenseCommands::List => {
            print!(
                "{}",
                format_expense_list(tracker.expenses(), symbol, settings.timezone)
            );
        }

        ExpenseCommands::Delete { target } => {
            let removed = delete_target(tracker, &target)?;
            println!(
                "Deleted expense: {}",
                format_expense_line(&removed, symbol, settings.timezone)
            );
        }
    }

    Ok(())
}

/// Delete by 1-based position or by ID
fn delete_target<S: KeyValueStore>(
    tracker: &mut Tracker<S>,
    target: &str,
) -> AllowanceResult<Expense> {
    let target = target.trim();
    if target.is_empty() {
        return Err(AllowanceError::Validation(INVALID_EXPENSE.into()));
    }

    let removed = match target.parse::<usize>() {
        Ok(position) if position >= 1 => tracker.delete_expense(position - 1)?,
        Ok(_) => None,
        Err(_) => match tracker.find_expense(target) {
            Some((_, expense)) => {
                let id = expense.id;
                tracker.delete_expense_by_id(id)?
            }
            None => None,
        },
    };

    removed.ok_or_else(|| AllowanceError::expense_not_found(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::MemoryStore;

    fn tracker_with(names: &[&str]) -> Tracker<MemoryStore> {
        let mut tracker = Tracker::in_memory();
        for name in names {
            tracker
                .add_expense(name, Money::from_units(10), ExpenseCategory::Other)
                .unwrap();
        }
        tracker
    }

    #[test]
    fn test_add_with_category() {
        let mut tracker = Tracker::in_memory();
        let settings = Settings::default();

        handle_expense_command(
            &mut tracker,
            &settings,
            ExpenseCommands::Add {
                name: "Lunch".into(),
                amount: "300".into(),
                category: Some("food".into()),
            },
        )
        .unwrap();

        let expense = &tracker.expenses()[0];
        assert_eq!(expense.name, "Lunch");
        assert_eq!(expense.amount, Money::from_units(300));
        assert_eq!(expense.category, ExpenseCategory::Food);
    }

    #[test]
    fn test_add_uses_default_category() {
        let mut tracker = Tracker::in_memory();
        let settings = Settings {
            default_category: ExpenseCategory::Transport,
            ..Settings::default()
        };

        handle_expense_command(
            &mut tracker,
            &settings,
            ExpenseCommands::Add {
                name: "Bus".into(),
                amount: "2.50".into(),
                category: None,
            },
        )
        .unwrap();

        assert_eq!(tracker.expenses()[0].category, ExpenseCategory::Transport);
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let mut tracker = Tracker::in_memory();
        let settings = Settings::default();

        let err = handle_expense_command(
            &mut tracker,
            &settings,
            ExpenseCommands::Add {
                name: "Lunch".into(),
                amount: "lots".into(),
                category: None,
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), INVALID_EXPENSE);

        let err = handle_expense_command(
            &mut tracker,
            &settings,
            ExpenseCommands::Add {
                name: "Lunch".into(),
                amount: "5".into(),
                category: Some("rent".into()),
            },
        )
        .unwrap_err();
        assert!(err.is_validation());
        assert!(tracker.expenses().is_empty());
    }

    #[test]
    fn test_delete_by_position() {
        let mut tracker = tracker_with(&["A", "B", "C"]);

        let removed = delete_target(&mut tracker, "2").unwrap();
        assert_eq!(removed.name, "B");
        assert_eq!(tracker.expenses().len(), 2);
    }

    #[test]
    fn test_delete_by_id() {
        let mut tracker = tracker_with(&["A", "B"]);
        let short = tracker.expenses()[0].id.short();

        let removed = delete_target(&mut tracker, &short).unwrap();
        assert_eq!(removed.name, "A");
    }

    #[test]
    fn test_delete_missing_target() {
        let mut tracker = tracker_with(&["A"]);

        assert!(delete_target(&mut tracker, "0").unwrap_err().is_not_found());
        assert!(delete_target(&mut tracker, "2").unwrap_err().is_not_found());
        assert!(delete_target(&mut tracker, "exp-00000000")
            .unwrap_err()
            .is_not_found());
        assert_eq!(tracker.expenses().len(), 1);
    }
}
