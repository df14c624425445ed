use super::*;
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const SIDEBAR_WIDTH: u16 = 24;
const LOG_PANE_HEIGHT: u16 = 10;

/// Render all widgets according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    state.set_terminal_size(size);

    if state.is_resuming_session() {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("MentorConnect")
            .border_style(styling::normal_block_border_style(state.get_theme()));
        frame.render_widget(spinner::widget(state, size.height).block(block), size);
        return;
    }

    if !state.is_signed_in() {
        landing::landing(frame, size, state);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)].as_ref())
        .split(size);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)].as_ref())
        .split(rows[0]);

    sidebar(frame, columns[0], state);

    if state.is_log_visible() {
        let panes = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(LOG_PANE_HEIGHT)].as_ref())
            .split(columns[1]);
        main(frame, panes[0], state);
        log(frame, panes[1], state);
    } else {
        main(frame, columns[1], state);
    }

    footer(frame, rows[1], state);

    if state.get_alert().is_some() {
        alert_modal(frame, state);
    }
}

fn alert_modal(frame: &mut Frame, state: &State) {
    let message = match state.get_alert() {
        Some(message) => message.to_owned(),
        None => return,
    };

    let popup_area = main::centered_rect(60, 25, frame.size());
    frame.render_widget(Clear, popup_area);

    let theme = state.get_theme();
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, styling::normal_text_style(theme))),
        Line::from(""),
        Line::from(Span::styled(
            "Enter/Esc: dismiss",
            ratatui::style::Style::default().fg(theme.text_muted.to_color()),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    "Error",
                    ratatui::style::Style::default()
                        .fg(theme.error.to_color())
                        .add_modifier(Modifier::BOLD),
                ))
                .border_style(
                    ratatui::style::Style::default()
                        .fg(theme.error.to_color())
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, popup_area);
}
