use super::Frame;
use crate::state::{BookingField, State};
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render the mentor profile widget according to state.
///
pub fn mentor_profile(frame: &mut Frame, size: Rect, state: &mut State) {
    let mentor = match state.get_selected_mentor() {
        Some(mentor) => mentor.clone(),
        None => return,
    };

    let theme = state.get_theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme))
        .title(Span::styled(
            mentor.full_name.clone(),
            styling::active_block_title_style(),
        ));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let rate = mentor
        .hourly_rate
        .map(|rate| format!("${:.2}/hr", rate))
        .unwrap_or_else(|| "Free".to_string());

    let mut lines = vec![
        Line::from(""),
        detail_line(state, "Email", mentor.email.clone()),
        detail_line(state, "Expertise", mentor.expertise.join(", ")),
        detail_line(state, "Languages", mentor.languages.join(", ")),
        detail_line(
            state,
            "Experience",
            format!("{} years", mentor.experience_years),
        ),
        detail_line(state, "Rate", rate),
        detail_line(
            state,
            "Rating",
            format!(
                "★ {:.1} ({} sessions)",
                mentor.average_rating, mentor.total_sessions
            ),
        ),
        Line::from(""),
    ];
    if !mentor.bio.is_empty() {
        lines.push(Line::from(Span::styled(
            mentor.bio.clone(),
            styling::normal_text_style(theme),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        " b: book session, Esc/h: back to directory",
        Style::default().fg(theme.text_muted.to_color()),
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

/// Render the booking form modal on top of the profile.
///
pub fn booking_modal(frame: &mut Frame, size: Rect, state: &mut State) {
    let popup_area = super::main::centered_rect(60, 70, size);
    frame.render_widget(Clear, popup_area);

    let theme = state.get_theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            "Book a Session",
            Style::default()
                .fg(theme.info.to_color())
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(styling::active_block_border_style(theme));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    if state.is_booking_confirmed() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Session booked!",
                Style::default()
                    .fg(theme.success.to_color())
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        let paragraph = Paragraph::new(text).alignment(Alignment::Center);
        frame.render_widget(paragraph, inner);
        return;
    }

    if state.is_booking_submitting() {
        frame.render_widget(spinner::widget(state, inner.height), inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Topic
                Constraint::Length(3), // Date
                Constraint::Length(3), // Time
                Constraint::Min(3),    // Notes
                Constraint::Length(1), // Hints
            ]
            .as_ref(),
        )
        .split(inner);

    frame.render_widget(
        form_field(state, "Topic", state.booking_topic(), BookingField::Topic),
        chunks[0],
    );
    frame.render_widget(
        form_field(
            state,
            "Date (YYYY-MM-DD)",
            state.booking_date(),
            BookingField::Date,
        ),
        chunks[1],
    );
    frame.render_widget(
        form_field(
            state,
            "Time (HH:MM)",
            state.booking_time(),
            BookingField::Time,
        ),
        chunks[2],
    );

    let notes_active = state.booking_field() == BookingField::Notes;
    let notes_block = field_block(state, "Notes (optional)", notes_active);
    let notes_area = chunks[3];
    {
        let textarea = state.booking_notes_textarea();
        textarea.set_block(notes_block);
        frame.render_widget(textarea.widget(), notes_area);
    }

    let theme = state.get_theme();
    let hints = Paragraph::new(Span::styled(
        " Tab: next field, Enter/Ctrl-S: book, Esc: cancel",
        Style::default().fg(theme.text_muted.to_color()),
    ));
    frame.render_widget(hints, chunks[4]);
}

fn detail_line<'a>(state: &State, label: &'a str, value: String) -> Line<'a> {
    let theme = state.get_theme();
    Line::from(vec![
        Span::styled(
            format!("{:<12}", label),
            Style::default().fg(theme.text_secondary.to_color()),
        ),
        Span::styled(value, styling::normal_text_style(theme)),
    ])
}

fn form_field<'a>(state: &State, title: &'a str, value: &str, field: BookingField) -> Paragraph<'a> {
    let active = state.booking_field() == field;
    Paragraph::new(value.to_owned())
        .style(styling::normal_text_style(state.get_theme()))
        .block(field_block(state, title, active))
}

fn field_block<'a>(state: &State, title: &'a str, active: bool) -> Block<'a> {
    let theme = state.get_theme();
    if active {
        Block::default()
            .borders(Borders::ALL)
            .border_style(styling::active_block_border_style(theme))
            .title(Span::styled(title, styling::active_block_title_style()))
    } else {
        Block::default()
            .borders(Borders::ALL)
            .border_style(styling::normal_block_border_style(theme))
            .title(title)
    }
}
