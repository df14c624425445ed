use crate::events::network::Event as NetworkEvent;
use crate::state::{
    AuthMode, BookingField, FeedbackField, Focus, Page, PendingFeedback, Screen, State,
};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers},
};
use log::*;
use std::time::Instant;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            if event::poll(tick_rate).unwrap() {
                if let CrosstermEvent::Key(key) = event::read().unwrap() {
                    tx_clone.send(Event::Input(key)).unwrap();
                }
            }
            tx_clone.send(Event::Tick).unwrap();
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(event) => {
                match event {
                    KeyEvent {
                        code: KeyCode::Char('c'),
                        modifiers,
                        ..
                    } if modifiers == KeyModifiers::CONTROL => {
                        debug!("Processing exit terminal event '{:?}'...", event);
                        return Ok(false);
                    }
                    // A blocking alert swallows everything except dismissal
                    KeyEvent {
                        code: KeyCode::Enter | KeyCode::Esc,
                        ..
                    } if state.get_alert().is_some() => {
                        state.clear_alert();
                    }
                    _ if state.get_alert().is_some() => {}
                    // Everything below the gate requires an identity
                    _ if !state.is_signed_in() => {
                        if !state.is_resuming_session() {
                            self.handle_landing_key(event, state);
                        }
                    }
                    _ => return self.handle_signed_in_key(event, state),
                }
            }
            Event::Tick => {
                state.advance_spinner_index();
                state.tick_confirmations(Instant::now());
            }
        }
        Ok(true)
    }

    /// Handle a key aimed at the landing screen form.
    ///
    fn handle_landing_key(&self, event: KeyEvent, state: &mut State) {
        match event {
            KeyEvent {
                code: KeyCode::Char('r'),
                modifiers,
                ..
            } if modifiers == KeyModifiers::CONTROL => {
                state.toggle_auth_mode();
            }
            KeyEvent {
                code: KeyCode::Tab, ..
            } => {
                state.toggle_auth_field();
            }
            KeyEvent {
                code: KeyCode::Enter,
                ..
            } => {
                state.submit_auth_form();
            }
            KeyEvent {
                code: KeyCode::Esc, ..
            } => {
                if state.auth_mode() == AuthMode::ResetPassword {
                    state.toggle_auth_mode();
                }
            }
            KeyEvent {
                code: KeyCode::Backspace,
                ..
            } => {
                state.pop_auth_char();
            }
            KeyEvent {
                code: KeyCode::Char(c),
                modifiers,
                ..
            } if modifiers == KeyModifiers::NONE || modifiers == KeyModifiers::SHIFT => {
                state.push_auth_char(c);
            }
            _ => {}
        }
    }

    /// Handle a key behind the identity gate. Returns false on exit request.
    ///
    fn handle_signed_in_key(&self, event: KeyEvent, state: &mut State) -> Result<bool> {
        // Modal surfaces take the keyboard before list navigation does
        if state.is_booking_open() {
            self.handle_booking_key(event, state);
            return Ok(true);
        }
        if state.current_screen() == Screen::FeedbackForm && state.get_pending_feedback().is_some()
        {
            self.handle_feedback_key(event, state);
            return Ok(true);
        }
        if state.is_search_mode() {
            self.handle_search_key(event, state);
            return Ok(true);
        }

        match event {
            KeyEvent {
                code: KeyCode::Char('q'),
                modifiers,
                ..
            } if modifiers == KeyModifiers::NONE => {
                debug!("Processing exit terminal event '{:?}'...", event);
                return Ok(false);
            }
            KeyEvent {
                code: KeyCode::Char('x'),
                modifiers,
                ..
            } if modifiers == KeyModifiers::NONE && *state.current_focus() == Focus::Menu => {
                debug!("Processing sign out event '{:?}'...", event);
                state.dispatch(NetworkEvent::SignOut);
            }
            KeyEvent {
                code: KeyCode::Char('l'),
                modifiers,
                ..
            } if modifiers == KeyModifiers::CONTROL => {
                state.toggle_log();
            }
            KeyEvent {
                code: KeyCode::Tab, ..
            } => match state.current_focus() {
                Focus::Menu => {
                    state.focus_view();
                }
                Focus::View => {
                    state.focus_menu();
                }
            },
            _ if *state.current_focus() == Focus::Menu => self.handle_menu_key(event, state),
            _ => self.handle_view_key(event, state),
        }
        Ok(true)
    }

    /// Handle a key aimed at the sidebar menu.
    ///
    fn handle_menu_key(&self, event: KeyEvent, state: &mut State) {
        match event {
            KeyEvent {
                code: KeyCode::Char('j') | KeyCode::Down,
                ..
            } => {
                state.next_menu_entry();
            }
            KeyEvent {
                code: KeyCode::Char('k') | KeyCode::Up,
                ..
            } => {
                state.previous_menu_entry();
            }
            KeyEvent {
                code: KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right,
                ..
            } => {
                state.activate_menu_entry();
            }
            _ => {}
        }
    }

    /// Handle a key aimed at the focused view.
    ///
    fn handle_view_key(&self, event: KeyEvent, state: &mut State) {
        match state.current_screen() {
            Screen::Dashboard => match event {
                KeyEvent {
                    code: KeyCode::Char('r'),
                    modifiers,
                    ..
                } if modifiers == KeyModifiers::NONE => {
                    state.navigate(Page::Home);
                }
                KeyEvent {
                    code: KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left,
                    ..
                } => {
                    state.focus_menu();
                }
                _ => {}
            },
            Screen::MentorDirectory => self.handle_directory_key(event, state),
            Screen::MentorProfile => match event {
                KeyEvent {
                    code: KeyCode::Char('b'),
                    modifiers,
                    ..
                } if modifiers == KeyModifiers::NONE => {
                    state.open_booking_form();
                }
                KeyEvent {
                    code: KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left,
                    ..
                } => {
                    state.back_from_profile();
                }
                _ => {}
            },
            Screen::SessionList => self.handle_session_list_key(event, state),
            // Feedback form without a target: the candidate picker
            Screen::FeedbackForm => self.handle_feedback_picker_key(event, state),
        }
    }

    /// Handle a key aimed at the mentor directory.
    ///
    fn handle_directory_key(&self, event: KeyEvent, state: &mut State) {
        match event {
            KeyEvent {
                code: KeyCode::Char('j') | KeyCode::Down,
                ..
            } => {
                state.next_mentor_index();
            }
            KeyEvent {
                code: KeyCode::Char('k') | KeyCode::Up,
                ..
            } => {
                state.previous_mentor_index();
            }
            KeyEvent {
                code: KeyCode::Char('/'),
                ..
            } => {
                state.set_search_mode(true);
            }
            KeyEvent {
                code: KeyCode::Char('e'),
                modifiers,
                ..
            } if modifiers == KeyModifiers::NONE => {
                state.cycle_expertise_filter();
            }
            KeyEvent {
                code: KeyCode::Char('r'),
                modifiers,
                ..
            } if modifiers == KeyModifiers::NONE => {
                state.navigate(Page::Mentors);
            }
            KeyEvent {
                code: KeyCode::Enter,
                ..
            } => {
                if let Some(mentor) = state.selected_directory_mentor().cloned() {
                    state.select_mentor(mentor);
                }
            }
            KeyEvent {
                code: KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left,
                ..
            } => {
                state.focus_menu();
            }
            _ => {}
        }
    }

    /// Handle a key aimed at the session list.
    ///
    fn handle_session_list_key(&self, event: KeyEvent, state: &mut State) {
        match event {
            KeyEvent {
                code: KeyCode::Char('j') | KeyCode::Down,
                ..
            } => {
                state.next_session_index();
            }
            KeyEvent {
                code: KeyCode::Char('k') | KeyCode::Up,
                ..
            } => {
                state.previous_session_index();
            }
            KeyEvent {
                code: KeyCode::Char('f'),
                modifiers,
                ..
            } if modifiers == KeyModifiers::NONE => {
                state.cycle_session_filter();
            }
            KeyEvent {
                code: KeyCode::Char('r'),
                modifiers,
                ..
            } if modifiers == KeyModifiers::NONE => {
                state.navigate(Page::Sessions);
            }
            KeyEvent {
                code: KeyCode::Enter,
                ..
            } => {
                // Only completed sessions can take feedback
                if let Some(pending) = state.selected_session().and_then(session_feedback_target) {
                    state.leave_feedback(pending);
                }
            }
            KeyEvent {
                code: KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left,
                ..
            } => {
                state.focus_menu();
            }
            _ => {}
        }
    }

    /// Handle a key aimed at the feedback candidate picker.
    ///
    fn handle_feedback_picker_key(&self, event: KeyEvent, state: &mut State) {
        match event {
            KeyEvent {
                code: KeyCode::Char('j') | KeyCode::Down,
                ..
            } => {
                state.next_feedback_candidate();
            }
            KeyEvent {
                code: KeyCode::Char('k') | KeyCode::Up,
                ..
            } => {
                state.previous_feedback_candidate();
            }
            KeyEvent {
                code: KeyCode::Enter,
                ..
            } => {
                if let Some(pending) = state
                    .selected_feedback_candidate()
                    .and_then(session_feedback_target)
                {
                    state.leave_feedback(pending);
                }
            }
            KeyEvent {
                code: KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left,
                ..
            } => {
                state.focus_menu();
            }
            _ => {}
        }
    }

    /// Handle a key while the booking form is open.
    ///
    fn handle_booking_key(&self, event: KeyEvent, state: &mut State) {
        // The confirmation is display-only until the delay elapses
        if state.is_booking_confirmed() {
            return;
        }
        match event {
            KeyEvent {
                code: KeyCode::Esc, ..
            } => {
                state.close_booking_form();
            }
            KeyEvent {
                code: KeyCode::Tab, ..
            } => {
                state.next_booking_field();
            }
            KeyEvent {
                code: KeyCode::Char('s'),
                modifiers,
                ..
            } if modifiers == KeyModifiers::CONTROL => {
                state.submit_booking_form();
            }
            KeyEvent {
                code: KeyCode::Enter,
                ..
            } if state.booking_field() != BookingField::Notes => {
                state.submit_booking_form();
            }
            _ if state.booking_field() == BookingField::Notes => {
                state.booking_notes_textarea().input(event);
            }
            KeyEvent {
                code: KeyCode::Backspace,
                ..
            } => {
                state.pop_booking_char();
            }
            KeyEvent {
                code: KeyCode::Char(c),
                modifiers,
                ..
            } if modifiers == KeyModifiers::NONE || modifiers == KeyModifiers::SHIFT => {
                state.push_booking_char(c);
            }
            _ => {}
        }
    }

    /// Handle a key while the feedback form has a target session.
    ///
    fn handle_feedback_key(&self, event: KeyEvent, state: &mut State) {
        if state.is_feedback_confirmed() {
            return;
        }
        match event {
            KeyEvent {
                code: KeyCode::Esc, ..
            } => {
                // Skipping feedback is always allowed
                state.feedback_complete();
            }
            KeyEvent {
                code: KeyCode::Tab, ..
            } => {
                state.toggle_feedback_field();
            }
            KeyEvent {
                code: KeyCode::Char('s'),
                modifiers,
                ..
            } if modifiers == KeyModifiers::CONTROL => {
                state.submit_feedback_form();
            }
            KeyEvent {
                code: KeyCode::Char(c @ '1'..='5'),
                ..
            } if state.feedback_field() == FeedbackField::Rating => {
                state.set_feedback_rating(c as u8 - b'0');
            }
            KeyEvent {
                code: KeyCode::Enter,
                ..
            } if state.feedback_field() == FeedbackField::Rating => {
                state.submit_feedback_form();
            }
            _ if state.feedback_field() == FeedbackField::Comment => {
                state.feedback_comment_textarea().input(event);
            }
            _ => {}
        }
    }

    /// Handle a key while the directory search bar is active.
    ///
    fn handle_search_key(&self, event: KeyEvent, state: &mut State) {
        match event {
            KeyEvent {
                code: KeyCode::Esc, ..
            } => {
                state.clear_search();
            }
            KeyEvent {
                code: KeyCode::Enter,
                ..
            } => {
                state.set_search_mode(false);
            }
            KeyEvent {
                code: KeyCode::Backspace,
                ..
            } => {
                state.pop_search_char();
            }
            KeyEvent {
                code: KeyCode::Char(c),
                modifiers,
                ..
            } if modifiers == KeyModifiers::NONE || modifiers == KeyModifiers::SHIFT => {
                state.push_search_char(c);
            }
            _ => {}
        }
    }
}

/// Build the feedback target for a session, if it can take feedback.
///
fn session_feedback_target(session: &crate::gateway::Session) -> Option<PendingFeedback> {
    if session.status != crate::gateway::SessionStatus::Completed {
        return None;
    }
    Some(PendingFeedback {
        session_id: session.id.clone(),
        mentor_id: session.mentor_id.clone(),
        mentor_name: session.mentor_name.clone(),
        topic: session.topic.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    #[test]
    fn test_feedback_target_requires_completed_status() {
        let mut session: crate::gateway::Session = Faker.fake();
        session.status = crate::gateway::SessionStatus::Scheduled;
        assert!(session_feedback_target(&session).is_none());

        session.status = crate::gateway::SessionStatus::Completed;
        let pending = session_feedback_target(&session).unwrap();
        assert_eq!(pending.session_id, session.id);
        assert_eq!(pending.mentor_name, session.mentor_name);
    }
}
