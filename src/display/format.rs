//! Currency and date formatting
//!
//! Shared by the CLI output and the TUI so both show identical strings.

use chrono::{DateTime, TimeZone};
use std::fmt;

use crate::models::Money;

/// Render an amount as `<symbol><grouped units>[.<fraction>]`
///
/// Thousands are separated by `,`; the fractional part is shown only when
/// non-zero, with trailing zeros trimmed (`₦1,234.5`, `₦300`).
pub fn format_currency(amount: Money, symbol: &str) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    let units = group_thousands(amount.units().unsigned_abs());

    match amount.cents_part() {
        0 => format!("{}{}{}", sign, symbol, units),
        c if c % 10 == 0 => format!("{}{}{}.{}", sign, symbol, units, c / 10),
        c => format!("{}{}{}.{:02}", sign, symbol, units, c),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

/// `"<day> <Mon>, <HH>:<MM>"`, e.g. `14 Mar, 09:05`
pub fn format_display_date<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.format("%-d %b, %H:%M").to_string()
}

/// `"<Weekday>, <Month> <day>"`, e.g. `Friday, March 14`
pub fn format_header_date<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.format("%A, %B %-d").to_string()
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct > 0.0 && pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// A text progress bar `width` cells wide
pub fn format_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}
