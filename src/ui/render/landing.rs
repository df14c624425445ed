use super::Frame;
use crate::state::{AuthField, AuthMode, State};
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

pub const BANNER: &str = "
            _                    _         _
 _ __  ___ | |_  ___  _ _   ___ | |_ _  _ (_)
| '  \\/ -_)|  _|/ _ \\| '_| |___||  _| || || |
|_|_|_\\___| \\__|\\___/|_|         \\__| \\_,_||_|
";

/// Render the landing screen with the sign in or recovery form.
///
pub fn landing(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .title("MentorConnect")
        .border_style(styling::normal_block_border_style(theme));
    frame.render_widget(block, size);

    let area = super::main::centered_rect(60, 80, size);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(6), // Banner
                Constraint::Length(2), // Mode title
                Constraint::Length(3), // Email
                Constraint::Length(3), // Password
                Constraint::Length(2), // Error or notice
                Constraint::Min(1),    // Hints
            ]
            .as_ref(),
        )
        .split(area);

    let banner = Paragraph::new(Text::from(BANNER))
        .style(styling::banner_style(theme))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let title = match state.auth_mode() {
        AuthMode::SignIn => "Sign in to your account",
        AuthMode::ResetPassword => "Reset your password",
    };
    let title_widget = Paragraph::new(Span::styled(
        title,
        styling::normal_text_style(theme).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(title_widget, chunks[1]);

    frame.render_widget(
        input_field(state, "Email", state.auth_email(), AuthField::Email),
        chunks[2],
    );

    if state.auth_mode() == AuthMode::SignIn {
        let masked = "*".repeat(state.auth_password().len());
        frame.render_widget(
            input_field(state, "Password", &masked, AuthField::Password),
            chunks[3],
        );
    }

    frame.render_widget(status_line(state), chunks[4]);

    let hints = match state.auth_mode() {
        AuthMode::SignIn => " Tab: switch field, Enter: sign in, Ctrl-R: forgot password, Ctrl-C: quit",
        AuthMode::ResetPassword => " Enter: send recovery email, Esc: back to sign in, Ctrl-C: quit",
    };
    let hints_widget = Paragraph::new(Span::styled(
        hints,
        Style::default().fg(theme.text_muted.to_color()),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(hints_widget, chunks[5]);
}

fn input_field<'a>(state: &State, title: &'a str, value: &str, field: AuthField) -> Paragraph<'a> {
    let theme = state.get_theme();
    let active = state.auth_field() == field;
    let block = if active {
        Block::default()
            .borders(Borders::ALL)
            .border_style(styling::active_block_border_style(theme))
            .title(Span::styled(title, styling::active_block_title_style()))
    } else {
        Block::default()
            .borders(Borders::ALL)
            .border_style(styling::normal_block_border_style(theme))
            .title(title)
    };
    Paragraph::new(value.to_owned())
        .style(styling::normal_text_style(theme))
        .block(block)
}

fn status_line<'a>(state: &State) -> Paragraph<'a> {
    let theme = state.get_theme();
    let line = if state.is_auth_loading() {
        let frame = spinner::FRAMES[state.get_spinner_index() % spinner::FRAMES.len()];
        Line::from(Span::styled(
            format!("{} Working...", frame),
            styling::normal_text_style(theme),
        ))
    } else if let Some(error) = state.auth_error() {
        Line::from(Span::styled(
            error.to_owned(),
            Style::default().fg(theme.error.to_color()),
        ))
    } else if let Some(notice) = state.auth_notice() {
        Line::from(Span::styled(
            notice.to_owned(),
            Style::default().fg(theme.success.to_color()),
        ))
    } else {
        Line::from("")
    };
    Paragraph::new(line).alignment(Alignment::Center)
}
