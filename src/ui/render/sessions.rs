use super::Frame;
use crate::gateway::Session;
use crate::state::{Focus, State};
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const BLOCK_TITLE: &str = "Sessions";

/// Render the session list widget according to state.
///
pub fn sessions(frame: &mut Frame, size: Rect, state: &mut State) {
    let title_text = format!(
        "{} [{}]",
        BLOCK_TITLE,
        state.current_session_filter().label()
    );

    let theme = state.get_theme();
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));

    let list_item_style;
    if *state.current_focus() == Focus::View {
        list_item_style = styling::active_list_item_style(theme);
        block = block
            .border_style(styling::active_block_border_style(theme))
            .title(Span::styled(
                title_text.clone(),
                styling::active_block_title_style(),
            ));
    } else {
        list_item_style = styling::current_list_item_style(theme);
        block = block.title(title_text);
    }

    if state.is_sessions_loading() {
        frame.render_widget(spinner::widget(state, size.height).block(block), size);
        return;
    }

    let items: Vec<ListItem> = if state.get_filtered_sessions().is_empty() {
        vec![ListItem::new("No sessions match the current filter")]
    } else {
        state
            .get_filtered_sessions()
            .iter()
            .map(|session| session_item(state, session))
            .collect()
    };

    let list = List::new(items)
        .style(styling::normal_text_style(theme))
        .highlight_style(list_item_style)
        .highlight_symbol("> ")
        .block(block);

    frame.render_stateful_widget(list, size, state.get_sessions_list_state());
}

fn session_item<'a>(state: &State, session: &Session) -> ListItem<'a> {
    let theme = state.get_theme();
    ListItem::new(Line::from(vec![
        Span::styled(
            format!(
                "{} {} ",
                session.scheduled_date, session.scheduled_time
            ),
            Style::default().fg(theme.text_muted.to_color()),
        ),
        Span::styled(
            session.topic.clone(),
            styling::normal_text_style(theme).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" with {} ({}m) ", session.mentor_name, session.duration_minutes),
            Style::default().fg(theme.text_secondary.to_color()),
        ),
        Span::styled(
            session.status.label(),
            styling::session_status_style(theme, &session.status),
        ),
    ]))
}
