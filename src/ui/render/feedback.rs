use super::Frame;
use crate::state::{FeedbackField, State};
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

const MAX_RATING: u8 = 5;

/// Render the feedback widget according to state. Without a chosen session
/// this is a picker over completed sessions, otherwise the rating form.
///
pub fn feedback(frame: &mut Frame, size: Rect, state: &mut State) {
    match state.get_pending_feedback() {
        Some(_) => feedback_form(frame, size, state),
        None => candidate_picker(frame, size, state),
    }
}

fn candidate_picker(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme))
        .title(Span::styled(
            "Feedback (completed sessions)",
            styling::active_block_title_style(),
        ));

    let items: Vec<ListItem> = {
        let candidates = state.feedback_candidates();
        if candidates.is_empty() {
            vec![ListItem::new(
                "No completed sessions to review yet. j/k: navigate, Esc/h: menu",
            )]
        } else {
            candidates
                .iter()
                .map(|session| {
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            format!("{} ", session.scheduled_date),
                            Style::default().fg(theme.text_muted.to_color()),
                        ),
                        Span::styled(
                            session.topic.clone(),
                            styling::normal_text_style(theme),
                        ),
                        Span::styled(
                            format!(" with {}", session.mentor_name),
                            Style::default().fg(theme.text_secondary.to_color()),
                        ),
                    ]))
                })
                .collect()
        }
    };

    let list = List::new(items)
        .style(styling::normal_text_style(theme))
        .highlight_style(styling::active_list_item_style(theme))
        .highlight_symbol("> ")
        .block(block);

    frame.render_stateful_widget(list, size, state.get_feedback_list_state());
}

fn feedback_form(frame: &mut Frame, size: Rect, state: &mut State) {
    let pending = match state.get_pending_feedback() {
        Some(pending) => pending.clone(),
        None => return,
    };

    let theme = state.get_theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme))
        .title(Span::styled(
            "Leave Feedback",
            styling::active_block_title_style(),
        ));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    if state.is_feedback_confirmed() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Feedback submitted!",
                Style::default()
                    .fg(theme.success.to_color())
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
        return;
    }

    if state.is_feedback_submitting() {
        frame.render_widget(spinner::widget(state, inner.height), inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(2), // Session summary
                Constraint::Length(3), // Rating
                Constraint::Min(3),    // Comment
                Constraint::Length(1), // Hints
            ]
            .as_ref(),
        )
        .split(inner);

    let summary = Paragraph::new(Line::from(vec![
        Span::styled(
            pending.topic.clone(),
            styling::normal_text_style(theme).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" with {}", pending.mentor_name),
            Style::default().fg(theme.text_secondary.to_color()),
        ),
    ]));
    frame.render_widget(summary, chunks[0]);

    let rating = state.feedback_rating();
    let rating_active = state.feedback_field() == FeedbackField::Rating;
    let stars: String = (1..=MAX_RATING)
        .map(|n| if n <= rating { '★' } else { '☆' })
        .collect();
    let rating_block = if rating_active {
        Block::default()
            .borders(Borders::ALL)
            .border_style(styling::active_block_border_style(theme))
            .title(Span::styled(
                "Rating (1-5)",
                styling::active_block_title_style(),
            ))
    } else {
        Block::default()
            .borders(Borders::ALL)
            .border_style(styling::normal_block_border_style(theme))
            .title("Rating (1-5)")
    };
    let rating_widget = Paragraph::new(Span::styled(
        stars,
        Style::default().fg(theme.warning.to_color()),
    ))
    .block(rating_block);
    frame.render_widget(rating_widget, chunks[1]);

    let comment_active = state.feedback_field() == FeedbackField::Comment;
    let comment_block = if comment_active {
        Block::default()
            .borders(Borders::ALL)
            .border_style(styling::active_block_border_style(theme))
            .title(Span::styled(
                "Comment",
                styling::active_block_title_style(),
            ))
    } else {
        Block::default()
            .borders(Borders::ALL)
            .border_style(styling::normal_block_border_style(theme))
            .title("Comment")
    };
    let comment_area = chunks[2];
    {
        let textarea = state.feedback_comment_textarea();
        textarea.set_block(comment_block);
        frame.render_widget(textarea.widget(), comment_area);
    }

    let theme = state.get_theme();
    let hints = Paragraph::new(Span::styled(
        " 1-5: rate, Tab: switch field, Ctrl-S: submit, Esc: skip",
        Style::default().fg(theme.text_muted.to_color()),
    ));
    frame.render_widget(hints, chunks[3]);
}
