//! Dashboard view
//!
//! Allowance, spent and remaining, a gauge for the share spent, and the
//! today / this month totals.

use chrono::Utc;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::display::{format_currency, format_percentage, header_date};
use crate::storage::KeyValueStore;
use crate::tui::app::App;
use crate::tui::layout::DashboardLayout;

fn figure<'a>(label: &'a str, value: String, color: Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

/// Render the dashboard panel
pub fn render<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let now = Utc::now();
    let summary = app.tracker.summary_at(&now);
    let symbol = app.settings.currency_symbol.as_str();

    let block = Block::default()
        .title(format!(" {} ", header_date(&now, app.tracker.zone())))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    let layout = DashboardLayout::new(inner);

    let remaining_color = if summary.is_overspent() || summary.remaining().is_zero() {
        Color::Red
    } else {
        Color::Green
    };

    let figures = Paragraph::new(vec![
        figure("Allowance", format_currency(summary.total_budget, symbol), Color::White),
        figure("Spent", format_currency(summary.totals.total_spent, symbol), Color::Yellow),
        figure("Remaining", format_currency(summary.remaining_display(), symbol), remaining_color),
    ]);
    frame.render_widget(figures, layout.figures);

    let percent = summary.percent_spent();
    let gauge_color = if percent >= 90.0 {
        Color::Red
    } else if percent >= 70.0 {
        Color::Yellow
    } else {
        Color::Green
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(gauge_color).bg(Color::Black))
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{} spent", format_percentage(percent)));
    frame.render_widget(gauge, layout.gauge);

    let period = Paragraph::new(vec![
        figure("Today", format_currency(summary.totals.today_total, symbol), Color::White),
        figure("This month", format_currency(summary.totals.month_total, symbol), Color::White),
    ]);
    frame.render_widget(period, layout.period);
}
