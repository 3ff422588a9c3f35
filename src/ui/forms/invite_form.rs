//! Invite screen rendering

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::invites::InviteSender;
use crate::state::{FieldPath, FocusTarget, InviteForm};
use crate::ui::components::{
    button_width, render_button, render_success_infobox, ButtonKind, BUTTON_HEIGHT,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Rows reserved for the success banner so the form doesn't jump
const BANNER_HEIGHT: u16 = 3;

/// Draw the invite form: banner, headline, invite rows and actions
pub fn draw(frame: &mut Frame, area: Rect, app: &App<impl InviteSender>) {
    let rows = app.state.form.rows();
    let title_height = if app.state.options.embed { 0 } else { 2 };

    let mut constraints = vec![
        Constraint::Length(BANNER_HEIGHT),
        Constraint::Length(title_height),
        Constraint::Length(2), // Headline
    ];
    constraints.extend((0..rows).map(|_| Constraint::Length(FIELD_HEIGHT)));
    constraints.push(Constraint::Length(1)); // Spacer
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(2)
        .split(area);

    if app.state.is_success_banner_visible() {
        let banner_area = chunks[0];
        let visible = app
            .state
            .banner
            .as_ref()
            .map(|banner| banner.visible_width(banner_area.width))
            .unwrap_or(banner_area.width);
        render_success_infobox(frame, banner_area, &app.labels.success, visible);
    }

    if !app.state.options.embed {
        let title = Paragraph::new(Line::from(Span::styled(
            "✉ invite",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(title, chunks[1]);
    }

    let headline = Paragraph::new(Line::from(Span::styled(
        app.labels.headline.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(headline, chunks[2]);

    let focused = app.state.focused();
    for row in 0..rows {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(50),
                Constraint::Length(1),
                Constraint::Percentage(50),
            ])
            .split(chunks[3 + row]);

        draw_row_field(frame, columns[0], app, &InviteForm::name_path(row), &focused);
        draw_row_field(frame, columns[2], app, &InviteForm::email_path(row), &focused);
    }

    draw_actions(frame, chunks[4 + rows], app, &focused);
}

fn draw_row_field(
    frame: &mut Frame,
    area: Rect,
    app: &App<impl InviteSender>,
    path: &FieldPath,
    focused: &FocusTarget,
) {
    let model = &app.state.form.model;
    let (Ok(spec), Ok(state)) = (model.spec(path), model.get(path)) else {
        return;
    };
    let is_active = matches!(focused, FocusTarget::Field(active) if active == path);
    draw_field(frame, area, spec, state, is_active);
}

fn draw_actions(
    frame: &mut Frame,
    area: Rect,
    app: &App<impl InviteSender>,
    focused: &FocusTarget,
) {
    let submit_width = button_width(&app.labels.submit);
    let skip_width = if app.state.options.embed {
        0
    } else {
        button_width(&app.labels.skip)
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(submit_width),
            Constraint::Length(2),
            Constraint::Length(skip_width),
            Constraint::Min(0),
        ])
        .split(area);

    render_button(
        frame,
        chunks[0],
        &app.labels.submit,
        ButtonKind::Primary,
        *focused == FocusTarget::SubmitButton,
        app.can_submit(),
    );

    if !app.state.options.embed {
        render_button(
            frame,
            chunks[2],
            &app.labels.skip,
            ButtonKind::Secondary,
            *focused == FocusTarget::SkipButton,
            true,
        );
    }
}
