//! Add allowance dialog

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::display::format_currency;
use crate::services::parse_allowance;
use crate::storage::KeyValueStore;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// State for the allowance dialog
#[derive(Debug, Clone, Default)]
pub struct AllowanceFormState {
    pub amount: TextInput,
}

impl AllowanceFormState {
    pub fn new() -> Self {
        Self {
            amount: TextInput::new()
                .label("Amount")
                .placeholder("e.g. 1000"),
        }
    }
}

/// Render the allowance dialog
pub fn render<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let area = centered_rect_fixed(44, 7, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Add Allowance ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Instructions
        ])
        .split(inner);

    frame.render_widget(app.allowance_form.amount.clone().focused(true), chunks[1]);

    let instructions = Paragraph::new(Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Add  "),
        Span::styled("[Esc]", Style::default().fg(Color::DarkGray)),
        Span::raw(" Cancel"),
    ]));
    frame.render_widget(instructions, chunks[3]);
}

/// Handle key input for the allowance dialog
pub fn handle_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Enter => submit(app),
        KeyCode::Char(c) => app.allowance_form.amount.insert(c),
        KeyCode::Backspace => app.allowance_form.amount.backspace(),
        KeyCode::Delete => app.allowance_form.amount.delete(),
        KeyCode::Left => app.allowance_form.amount.move_left(),
        KeyCode::Right => app.allowance_form.amount.move_right(),
        KeyCode::Home => app.allowance_form.amount.move_start(),
        KeyCode::End => app.allowance_form.amount.move_end(),
        _ => {}
    }
}

fn submit<S: KeyValueStore>(app: &mut App<S>) {
    let result = parse_allowance(app.allowance_form.amount.value())
        .and_then(|amount| app.tracker.add_allowance(amount).map(|b| (amount, b.total_budget)));

    match result {
        Ok((amount, total)) => {
            let symbol = &app.settings.currency_symbol;
            let message = format!(
                "Added {} to allowance. Total: {}",
                format_currency(amount, symbol),
                format_currency(total, symbol)
            );
            app.close_dialog();
            app.set_status(message);
        }
        // Input stays in place so it can be corrected
        Err(e) => app.set_warning(e.to_string()),
    }
}
