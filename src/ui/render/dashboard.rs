use super::Frame;
use crate::state::{filters, Focus, State};
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

const BLOCK_TITLE: &str = "Dashboard";

/// Render the dashboard widget according to state.
///
pub fn dashboard(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme();
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));
    if *state.current_focus() == Focus::View {
        block = block
            .border_style(styling::active_block_border_style(theme))
            .title(Span::styled(
                BLOCK_TITLE,
                styling::active_block_title_style(),
            ));
    } else {
        block = block.title(BLOCK_TITLE);
    }

    if state.is_dashboard_loading() {
        frame.render_widget(spinner::widget(state, size.height).block(block), size);
        return;
    }

    let inner = block.inner(size);
    frame.render_widget(block, size);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(1)].as_ref())
        .split(inner);

    let (upcoming, completed) = filters::session_counts(state.get_recent_sessions());
    let mentor_count = state
        .get_mentor_count()
        .map(|count| count.to_string())
        .unwrap_or_else(|| "-".to_string());

    let stats = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ]
            .as_ref(),
        )
        .split(rows[0]);

    frame.render_widget(
        stat_card(state, "Available Mentors", &mentor_count),
        stats[0],
    );
    frame.render_widget(
        stat_card(state, "Upcoming Sessions", &upcoming.to_string()),
        stats[1],
    );
    frame.render_widget(
        stat_card(state, "Completed Sessions", &completed.to_string()),
        stats[2],
    );
    frame.render_widget(stat_card(state, "Average Rating", "0.0"), stats[3]);

    let theme = state.get_theme();
    let upcoming_sessions: Vec<&crate::gateway::Session> = state
        .get_recent_sessions()
        .iter()
        .filter(|session| session.status == crate::gateway::SessionStatus::Scheduled)
        .collect();
    let items: Vec<ListItem> = if upcoming_sessions.is_empty() {
        vec![ListItem::new("No upcoming sessions. Browse mentors to book one.")]
    } else {
        upcoming_sessions
            .iter()
            .map(|session| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} {} ", session.scheduled_date, session.scheduled_time),
                        Style::default().fg(theme.text_muted.to_color()),
                    ),
                    Span::styled(session.topic.clone(), styling::normal_text_style(theme)),
                    Span::styled(
                        format!(" with {} ", session.mentor_name),
                        Style::default().fg(theme.text_secondary.to_color()),
                    ),
                    Span::styled(
                        session.status.label(),
                        styling::session_status_style(theme, &session.status),
                    ),
                ]))
            })
            .collect()
    };

    let list = List::new(items)
        .style(styling::normal_text_style(theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Upcoming Sessions")
                .border_style(styling::normal_block_border_style(theme)),
        );
    frame.render_widget(list, rows[1]);
}

fn stat_card<'a>(state: &State, title: &'a str, value: &str) -> Paragraph<'a> {
    let theme = state.get_theme();
    Paragraph::new(Line::from(Span::styled(
        value.to_owned(),
        Style::default()
            .fg(theme.primary.to_color())
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(styling::normal_block_border_style(theme)),
    )
}
