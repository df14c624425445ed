use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{layout::Alignment, widgets::Paragraph};

pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Return a loading spinner widget, vertically centered for the given height.
///
pub fn widget<'a>(state: &State, height: u16) -> Paragraph<'a> {
    let frame = FRAMES[state.get_spinner_index() % FRAMES.len()];
    let padding = "\n".repeat((height / 2).saturating_sub(1) as usize);
    Paragraph::new(format!("{}{} Loading...", padding, frame))
        .style(styling::normal_text_style(state.get_theme()))
        .alignment(Alignment::Center)
}
