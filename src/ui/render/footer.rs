use super::Frame;
use crate::state::{Focus, Screen, State};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Format key hints for the focused screen as a display string.
///
fn hints_for_screen(screen: Screen, focus: &Focus) -> String {
    if *focus == Focus::Menu {
        return " j/k: navigate, Enter/l: open, Tab: focus view, x: sign out, q: quit".to_string();
    }
    match screen {
        Screen::Dashboard => " r: refresh, Tab/Esc: menu, q: quit".to_string(),
        Screen::MentorDirectory => {
            " j/k: navigate, /: search, e: expertise, Enter: profile, r: refresh, Esc: menu, q: quit"
                .to_string()
        }
        Screen::MentorProfile => " b: book session, Esc/h: back, q: quit".to_string(),
        Screen::SessionList => {
            " j/k: navigate, f: filter, Enter: feedback, r: refresh, Esc: menu, q: quit".to_string()
        }
        Screen::FeedbackForm => " j/k: navigate, Enter: review, Esc: menu, q: quit".to_string(),
    }
}

/// Render footer widget.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let in_form = state.is_booking_open()
        || (state.current_screen() == Screen::FeedbackForm
            && state.get_pending_feedback().is_some());

    let controls_content = if state.is_search_mode() {
        Line::from(vec![
            Span::styled(
                "SEARCH:",
                Style::default()
                    .fg(theme.text.to_color())
                    .bg(theme.footer_search.to_color())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " Type to search, Enter: done, Esc: clear",
                Style::default().fg(theme.warning.to_color()),
            ),
        ])
    } else if in_form {
        let hints = if state.is_booking_open() {
            " Tab: next field, Enter/Ctrl-S: book, Esc: cancel"
        } else {
            " 1-5: rate, Tab: switch field, Ctrl-S: submit, Esc: skip"
        };
        Line::from(vec![
            Span::styled(
                "FORM:",
                Style::default()
                    .fg(theme.text.to_color())
                    .bg(theme.footer_form.to_color())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(hints, Style::default().fg(theme.warning.to_color())),
        ])
    } else {
        Line::from(vec![
            Span::styled(
                "NORMAL:",
                Style::default()
                    .fg(theme.text.to_color())
                    .bg(theme.footer_normal.to_color())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                hints_for_screen(state.current_screen(), state.current_focus()),
                Style::default().fg(theme.warning.to_color()),
            ),
        ])
    };

    let controls_widget = Paragraph::new(controls_content).alignment(Alignment::Left);

    // Show the search query on the right while one is active, otherwise the version
    let right_content = if !state.get_search_query().is_empty() {
        Line::from(vec![Span::styled(
            format!("/{}", state.get_search_query()),
            Style::default()
                .fg(theme.text.to_color())
                .bg(theme.footer_search.to_color())
                .add_modifier(Modifier::BOLD),
        )])
    } else {
        Line::from(vec![Span::styled(
            format!(" {}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.secondary.to_color()),
        )])
    };

    let right_content_width = right_content.width();
    let right_widget = Paragraph::new(right_content).alignment(Alignment::Right);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(right_content_width.try_into().unwrap_or(0)),
        ])
        .split(size);

    frame.render_widget(controls_widget, columns[0]);
    frame.render_widget(right_widget, columns[1]);
}
