use super::Frame;
use crate::gateway::Mentor;
use crate::state::{Focus, State};
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const BLOCK_TITLE: &str = "Mentors";

/// Render the mentor directory widget according to state.
///
pub fn mentors(frame: &mut Frame, size: Rect, state: &mut State) {
    // Show search in title while searching (show "/" even if query is empty)
    let title_text = if state.is_search_mode() || !state.get_search_query().is_empty() {
        format!(
            "{} /{} [{}]",
            BLOCK_TITLE,
            state.get_search_query(),
            state.current_expertise()
        )
    } else {
        format!("{} [{}]", BLOCK_TITLE, state.current_expertise())
    };

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

    if state.is_mentors_loading() {
        frame.render_widget(spinner::widget(state, size.height).block(block), size);
        return;
    }

    let items: Vec<ListItem> = if state.get_filtered_mentors().is_empty() {
        vec![ListItem::new("No mentors match the current filters")]
    } else {
        state
            .get_filtered_mentors()
            .iter()
            .map(|mentor| mentor_item(state, mentor))
            .collect()
    };

    let list = List::new(items)
        .style(styling::normal_text_style(theme))
        .highlight_style(list_item_style)
        .highlight_symbol("> ")
        .block(block);

    frame.render_stateful_widget(list, size, state.get_mentors_list_state());
}

fn mentor_item<'a>(state: &State, mentor: &Mentor) -> ListItem<'a> {
    let theme = state.get_theme();
    let rate = mentor
        .hourly_rate
        .map(|rate| format!("${:.0}/hr", rate))
        .unwrap_or_else(|| "free".to_string());
    ListItem::new(Line::from(vec![
        Span::styled(
            mentor.full_name.clone(),
            styling::normal_text_style(theme).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ★ {:.1}", mentor.average_rating),
            Style::default().fg(theme.warning.to_color()),
        ),
        Span::styled(
            format!("  {}", rate),
            Style::default().fg(theme.secondary.to_color()),
        ),
        Span::styled(
            format!("  {}", mentor.expertise.join(", ")),
            Style::default().fg(theme.text_muted.to_color()),
        ),
    ]))
}
