//! Allowance CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_currency;
use crate::error::AllowanceResult;
use crate::services::{parse_allowance, Tracker};
use crate::storage::KeyValueStore;

/// Allowance subcommands
#[derive(Subcommand)]
pub enum AllowanceCommands {
    /// Add money to the allowance
    Add {
        /// Amount (e.g., "1000" or "1,000.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
}

/// Handle an allowance command
pub fn handle_allowance_command<S: KeyValueStore>(
    tracker: &mut Tracker<S>,
    settings: &Settings,
    cmd: AllowanceCommands,
) -> AllowanceResult<()> {
    match cmd {
        AllowanceCommands::Add { amount } => {
            let amount = parse_allowance(&amount)?;
            let budget = tracker.add_allowance(amount)?;

            println!(
                "Added {} to allowance. Total: {}",
                format_currency(amount, &settings.currency_symbol),
                format_currency(budget.total_budget, &settings.currency_symbol)
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::services::INVALID_ALLOWANCE;

    #[test]
    fn test_add_allowance() {
        let mut tracker = Tracker::in_memory();
        let settings = Settings::default();

        handle_allowance_command(
            &mut tracker,
            &settings,
            AllowanceCommands::Add {
                amount: "1,000".into(),
            },
        )
        .unwrap();

        assert_eq!(tracker.budget().total_budget, Money::from_units(1000));
    }

    #[test]
    fn test_rejects_bad_amount() {
        let mut tracker = Tracker::in_memory();
        let settings = Settings::default();

        for bad in ["0", "-5", "abc"] {
            let err = handle_allowance_command(
                &mut tracker,
                &settings,
                AllowanceCommands::Add { amount: bad.into() },
            )
            .unwrap_err();
            assert_eq!(err.to_string(), INVALID_ALLOWANCE);
        }
        assert!(tracker.budget().total_budget.is_zero());
    }
}
