use super::{dashboard, feedback, mentor_profile, mentors, sessions, Frame};
use crate::state::{Screen, State};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Render main widget according to state.
///
pub fn main(frame: &mut Frame, size: Rect, state: &mut State) {
    match state.current_screen() {
        Screen::Dashboard => {
            dashboard::dashboard(frame, size, state);
        }
        Screen::MentorDirectory => {
            mentors::mentors(frame, size, state);
        }
        Screen::MentorProfile => {
            // Always draw the profile first so the booking modal lands on top
            mentor_profile::mentor_profile(frame, size, state);
            if state.is_booking_open() {
                mentor_profile::booking_modal(frame, size, state);
            }
        }
        Screen::SessionList => {
            sessions::sessions(frame, size, state);
        }
        Screen::FeedbackForm => {
            feedback::feedback(frame, size, state);
        }
    }
}

/// Return a centered rectangle sized as a percentage of the given area.
///
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
