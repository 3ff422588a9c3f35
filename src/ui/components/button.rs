//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Visual role of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Primary,
    Secondary,
}

/// Render a bordered button; disabled buttons are dimmed and never highlighted
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    kind: ButtonKind,
    is_selected: bool,
    is_enabled: bool,
) {
    let accent = match kind {
        ButtonKind::Primary => Color::Green,
        ButtonKind::Secondary => Color::Gray,
    };

    let border_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(accent)
    };

    let text_style = if !is_enabled {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    } else if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(accent)
    };

    let paragraph = Paragraph::new(format!(" {content} "))
        .style(text_style)
        .alignment(Alignment::Center);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Width a button needs for `content`, borders included
pub fn button_width(content: &str) -> u16 {
    let width = u16::try_from(Line::from(content).width()).unwrap_or(u16::MAX);
    width.saturating_add(4)
}
