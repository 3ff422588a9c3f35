//! Dismissable info box

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render a success info box revealed up to `visible_width` columns
pub fn render_success_infobox(frame: &mut Frame, area: Rect, message: &str, visible_width: u16) {
    let width = visible_width.min(area.width);
    if width < 2 {
        return;
    }
    let area = Rect { width, ..area };

    let content = Line::from(vec![
        Span::styled(
            " ✔ ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(message, Style::default().fg(Color::White)),
        Span::styled("  (Esc to dismiss)", Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        ),
        area,
    );
}
