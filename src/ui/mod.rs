//! UI module for rendering the TUI

pub mod components;
mod forms;

use crate::app::App;
use crate::invites::InviteSender;
use crate::platform;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App<impl InviteSender>) {
    let area = frame.area();
    let main_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };

    forms::draw_invite_form(frame, main_area, app);
    draw_status_bar(frame, app);
}

/// Draw the status bar
fn draw_status_bar(frame: &mut Frame, app: &App<impl InviteSender>) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::styled(
        status_hints(app.state.options.embed),
        Style::default().fg(Color::Gray),
    )];

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Red)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

fn status_hints(embed: bool) -> String {
    let paste = platform::paste_shortcut();
    if embed {
        format!(" Tab:next  Enter:send  {paste}:paste  Esc:close")
    } else {
        format!(" Tab:next  Enter:send  {paste}:paste  Esc:skip")
    }
}
