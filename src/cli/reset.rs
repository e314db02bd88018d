//! Reset CLI command
//!
//! Clearing the allowance and the expense log needs an explicit "yes" unless
//! `--yes` is given.

use std::io::{BufRead, Write};

use crate::config::settings::Settings;
use crate::display::format_currency;
use crate::error::AllowanceResult;
use crate::services::Tracker;
use crate::storage::KeyValueStore;

/// Handle the reset command, prompting on `input`/`output` unless `yes`
pub fn handle_reset_command<S, R, W>(
    tracker: &mut Tracker<S>,
    settings: &Settings,
    yes: bool,
    input: &mut R,
    output: &mut W,
) -> AllowanceResult<bool>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    let request = tracker.request_reset();

    if !yes {
        writeln!(
            output,
            "Allowance: {}, expenses: {}",
            format_currency(request.total_budget(), &settings.currency_symbol),
            request.expense_count()
        )?;
        write!(output, "{} (yes/no): ", request.prompt())?;
        output.flush()?;

        let mut confirm = String::new();
        input.read_line(&mut confirm)?;

        if confirm.trim().to_lowercase() != "yes" {
            writeln!(output, "Aborted.")?;
            return Ok(false);
        }
    }

    tracker.reset_budget(request)?;
    writeln!(output, "Budget reset.")?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, Money};
    use crate::storage::MemoryStore;

    fn funded() -> Tracker<MemoryStore> {
        let mut tracker = Tracker::in_memory();
        tracker.add_allowance(Money::from_units(1000)).unwrap();
        tracker
            .add_expense("Lunch", Money::from_units(300), ExpenseCategory::Food)
            .unwrap();
        tracker
    }

    fn run(tracker: &mut Tracker<MemoryStore>, yes: bool, answer: &str) -> (bool, String) {
        let mut input = answer.as_bytes();
        let mut output = Vec::new();
        let done =
            handle_reset_command(tracker, &Settings::default(), yes, &mut input, &mut output)
                .unwrap();
        (done, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_confirmed_reset() {
        let mut tracker = funded();
        let (done, output) = run(&mut tracker, false, "yes\n");

        assert!(done);
        assert!(output.contains("Reset budget? This will clear total and spent amount. (yes/no)"));
        assert!(output.contains("₦1,000"));
        assert!(tracker.budget().total_budget.is_zero());
        assert!(tracker.expenses().is_empty());
    }

    #[test]
    fn test_declined_reset() {
        let mut tracker = funded();

        for answer in ["no\n", "\n", "y\n"] {
            let (done, output) = run(&mut tracker, false, answer);
            assert!(!done);
            assert!(output.ends_with("Aborted.\n"));
        }
        assert_eq!(tracker.budget().total_budget, Money::from_units(1000));
        assert_eq!(tracker.expenses().len(), 1);
    }

    #[test]
    fn test_yes_flag_skips_prompt() {
        let mut tracker = funded();
        let (done, output) = run(&mut tracker, true, "");

        assert!(done);
        assert_eq!(output, "Budget reset.\n");
    }
}
