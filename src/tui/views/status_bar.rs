//! Status bar view
//!
//! Shows the latest status or warning and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::storage::KeyValueStore;
use crate::tui::app::{ActiveDialog, App, StatusKind};

/// Render the status bar
pub fn render<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let mut spans = vec![];

    if let Some(ref status) = app.status {
        match status.kind {
            StatusKind::Warning => {
                spans.push(Span::styled(
                    " ⚠ ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(
                    status.text.as_str(),
                    Style::default().fg(Color::Red),
                ));
            }
            StatusKind::Info => {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(
                    status.text.as_str(),
                    Style::default().fg(Color::Green),
                ));
            }
        }
    }

    let hints = match app.active_dialog {
        ActiveDialog::None => " a:Allowance  e:Expense  d:Delete  r:Reset  q:Quit ",
        ActiveDialog::ConfirmReset => " y:Confirm  n:Cancel ",
        _ => " Enter:Save  Esc:Cancel ",
    };

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.chars().count());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
