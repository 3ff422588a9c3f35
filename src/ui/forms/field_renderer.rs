//! Field rendering utilities for forms

use crate::state::{FieldSpec, FieldState};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Field height in rows (top border + value + bottom border)
pub const FIELD_HEIGHT: u16 = 3;

/// Draw a single-line input for a form field.
///
/// The label sits in the top border and empty fields show the placeholder
/// dimmed. A validation error replaces the border colour and is written
/// into the bottom border.
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    spec: &FieldSpec,
    state: &FieldState,
    is_active: bool,
) {
    let has_error = state.error.is_some();

    let border_style = if has_error {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let value_style = if state.value.is_empty() {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let cursor = if is_active { "▌" } else { "" };
    let mut spans = Vec::new();
    if is_active && state.value.is_empty() {
        // Cursor sits before the placeholder
        spans.push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(spec.placeholder.as_str(), value_style));
    } else {
        spans.push(Span::styled(
            state.display_value(&spec.placeholder),
            value_style,
        ));
        spans.push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
    }

    let mut block = Block::default()
        .title(format!(" {} ", spec.label))
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(error) = &state.error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
