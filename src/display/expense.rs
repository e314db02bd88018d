//! Expense display formatting
//!
//! Tables of the expense log for the CLI. Positions are shown 1-based, which
//! is what `allowance expense delete` accepts.

use chrono::{DateTime, Utc};
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::DisplayZone;
use crate::models::Expense;

use super::format::{format_currency, format_display_date, truncate};

const NAME_WIDTH: usize = 24;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Date of an expense as shown to the user
pub fn expense_date(date: &DateTime<Utc>, zone: DisplayZone) -> String {
    format_display_date(&zone.localize(date))
}

/// Format the expense log as a table, newest last
pub fn format_expense_list(expenses: &[Expense], symbol: &str, zone: DisplayZone) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let rows = expenses.iter().enumerate().map(|(i, e)| ExpenseRow {
        position: i + 1,
        id: e.id.short(),
        name: truncate(&e.name, NAME_WIDTH),
        category: e.category.to_string(),
        date: expense_date(&e.date, zone),
        amount: format_currency(e.amount, symbol),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::sharp())
        .with(Modify::new(Columns::single(5)).with(Alignment::right()));

    format!("{}\n", table)
}

/// Format one expense for confirmation messages
pub fn format_expense_line(expense: &Expense, symbol: &str, zone: DisplayZone) -> String {
    format!(
        "{} {} ({}, {}) {}",
        expense.id.short(),
        expense.name,
        expense.category,
        expense_date(&expense.date, zone),
        format_currency(expense.amount, symbol)
    )
}
