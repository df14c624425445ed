use super::Frame;
use crate::state::{Focus, Page, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, List, ListItem, ListState},
};

/// Render the sidebar menu according to state.
///
pub fn sidebar(frame: &mut Frame, size: Rect, state: &mut State) {
    let title = state
        .get_user()
        .map(|user| user.full_name.clone())
        .unwrap_or_else(|| "Menu".to_string());

    let theme = state.get_theme();
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));

    let list_item_style;
    if *state.current_focus() == Focus::Menu {
        list_item_style = styling::active_list_item_style(theme);
        block = block
            .border_style(styling::active_block_border_style(theme))
            .title(Span::styled(title, styling::active_block_title_style()));
    } else {
        list_item_style = styling::current_list_item_style(theme);
        block = block.title(title);
    }

    let items: Vec<ListItem> = Page::ALL
        .iter()
        .map(|page| ListItem::new(page.label()))
        .collect();

    let list = List::new(items)
        .style(styling::normal_text_style(theme))
        .highlight_style(list_item_style)
        .highlight_symbol("> ")
        .block(block);

    let mut list_state = ListState::default();
    list_state.select(Some(state.menu_index()));
    frame.render_stateful_widget(list, size, &mut list_state);
}
