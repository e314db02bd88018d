//! Add expense dialog
//!
//! Name and amount are free text; the category is cycled with Left/Right
//! while the category row has focus.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::ExpenseCategory;
use crate::services::parse_expense_amount;
use crate::storage::KeyValueStore;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// Focusable fields, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseField {
    #[default]
    Name,
    Amount,
    Category,
}

impl ExpenseField {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Amount,
            Self::Amount => Self::Category,
            Self::Category => Self::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Name => Self::Category,
            Self::Amount => Self::Name,
            Self::Category => Self::Amount,
        }
    }
}

/// State for the expense dialog
#[derive(Debug, Clone)]
pub struct ExpenseFormState {
    pub name: TextInput,
    pub amount: TextInput,
    pub category: ExpenseCategory,
    pub focus: ExpenseField,
}

impl ExpenseFormState {
    pub fn new(category: ExpenseCategory) -> Self {
        Self {
            name: TextInput::new().label("Name").placeholder("e.g. Lunch"),
            amount: TextInput::new().label("Amount").placeholder("e.g. 300"),
            category,
            focus: ExpenseField::Name,
        }
    }

    fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            ExpenseField::Name => Some(&mut self.name),
            ExpenseField::Amount => Some(&mut self.amount),
            ExpenseField::Category => None,
        }
    }
}

/// Render the expense dialog
pub fn render<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let area = centered_rect_fixed(50, 10, frame.area());
    frame.render_widget(Clear, area);

    let form = &app.expense_form;

    let block = Block::default()
        .title(" Add Expense ")
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
            Constraint::Length(1), // Name
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Category
            Constraint::Length(2), // Spacer
            Constraint::Length(1), // Instructions
        ])
        .split(inner);

    frame.render_widget(
        form.name.clone().focused(form.focus == ExpenseField::Name),
        chunks[1],
    );
    frame.render_widget(
        form.amount.clone().focused(form.focus == ExpenseField::Amount),
        chunks[2],
    );

    let category_style = if form.focus == ExpenseField::Category {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let category = Paragraph::new(Line::from(vec![
        Span::styled("Category", Style::default().fg(Color::Cyan)),
        Span::raw(": "),
        Span::styled(format!("< {} >", form.category), category_style),
    ]));
    frame.render_widget(category, chunks[3]);

    let instructions = Paragraph::new(Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Add  "),
        Span::styled("[Tab]", Style::default().fg(Color::Cyan)),
        Span::raw(" Next field  "),
        Span::styled("[Esc]", Style::default().fg(Color::DarkGray)),
        Span::raw(" Cancel"),
    ]));
    frame.render_widget(instructions, chunks[5]);
}

/// Handle key input for the expense dialog
pub fn handle_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
            return;
        }
        KeyCode::Enter => {
            submit(app);
            return;
        }
        _ => {}
    }

    let form = &mut app.expense_form;
    match key.code {
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
            form.focus = form.focus.prev();
        }
        KeyCode::Tab => form.focus = form.focus.next(),
        KeyCode::BackTab => form.focus = form.focus.prev(),
        KeyCode::Left if form.focus == ExpenseField::Category => {
            form.category = form.category.prev();
        }
        KeyCode::Right if form.focus == ExpenseField::Category => {
            form.category = form.category.next();
        }
        _ => {
            if let Some(input) = form.focused_input() {
                match key.code {
                    KeyCode::Char(c) => input.insert(c),
                    KeyCode::Backspace => input.backspace(),
                    KeyCode::Delete => input.delete(),
                    KeyCode::Left => input.move_left(),
                    KeyCode::Right => input.move_right(),
                    KeyCode::Home => input.move_start(),
                    KeyCode::End => input.move_end(),
                    _ => {}
                }
            }
        }
    }
}

fn submit<S: KeyValueStore>(app: &mut App<S>) {
    let form = &app.expense_form;
    let name = form.name.value().to_string();
    let category = form.category;

    let result = parse_expense_amount(form.amount.value()).and_then(|amount| {
        app.tracker
            .add_expense(&name, amount, category)
            .map(|e| e.name.clone())
    });

    match result {
        Ok(name) => {
            app.close_dialog();
            app.select_last();
            app.set_status(format!("Added expense: {}", name));
        }
        Err(e) => app.set_warning(e.to_string()),
    }
}
