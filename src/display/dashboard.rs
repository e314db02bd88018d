//! Dashboard display formatting
//!
//! The text rendition of the budget summary used by `allowance status`.

use chrono::{DateTime, Utc};

use crate::config::DisplayZone;
use crate::services::BudgetSummary;

use super::format::{format_bar, format_currency, format_header_date, format_percentage, separator};

const BAR_WIDTH: usize = 30;
const LINE_WIDTH: usize = 42;

/// Dashboard header for `now` in the configured zone
pub fn header_date(now: &DateTime<Utc>, zone: DisplayZone) -> String {
    format_header_date(&zone.localize(now))
}

/// Format the budget summary
pub fn format_dashboard(summary: &BudgetSummary, symbol: &str, header: &str) -> String {
    let mut output = String::new();
    let money = |m| format_currency(m, symbol);

    output.push_str(&format!("{}\n", header));
    output.push_str(&separator(LINE_WIDTH));
    output.push('\n');

    output.push_str(&format!("{:<14}{:>28}\n", "Allowance", money(summary.total_budget)));
    output.push_str(&format!("{:<14}{:>28}\n", "Spent", money(summary.totals.total_spent)));
    output.push_str(&format!("{:<14}{:>28}\n", "Remaining", money(summary.remaining_display())));
    output.push('\n');

    let percent = summary.percent_spent();
    output.push_str(&format!(
        "{} {}\n",
        format_bar(percent, BAR_WIDTH),
        format_percentage(percent)
    ));

    if summary.is_overspent() {
        output.push_str(&format!(
            "Overspent by {}\n",
            money(-summary.remaining())
        ));
    }

    output.push('\n');
    output.push_str(&format!("{:<14}{:>28}\n", "Today", money(summary.totals.today_total)));
    output.push_str(&format!("{:<14}{:>28}\n", "This month", money(summary.totals.month_total)));

    output
}
