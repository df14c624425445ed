use crate::app::NetworkEventSender;
use crate::events::network::Event as NetworkEvent;
use crate::gateway::{Mentor, Session, SessionStatus, User};
use crate::ui::SPINNER_FRAME_COUNT;
use chrono::Local;
use log::*;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};
use tui_textarea::TextArea;

use super::filters::{expertise_options, filter_mentors, filter_sessions};
use super::form::{AuthField, AuthMode, BookingField, FeedbackField, SessionFilter};
use super::navigation::{Focus, Page, PendingFeedback, Screen};

/// How long success confirmations stay on screen before the pending
/// navigation runs.
pub const CONFIRMATION_DELAY: Duration = Duration::from_secs(2);

/// Houses data representative of application state.
///
pub struct State {
    net_sender: Option<NetworkEventSender>,
    config_save_sender: Option<crate::app::ConfigSaveSender>,
    user: Option<User>,
    terminal_size: Rect,
    spinner_index: usize,
    theme: crate::ui::Theme,
    has_access_token: bool, // Whether a stored token exists (resume attempt pending)
    access_token: Option<String>, // Mirrored from the gateway for config persistence
    resuming_session: bool, // True while a stored token is being verified
    // Landing screen form
    auth_mode: AuthMode,
    auth_field: AuthField,
    auth_email: String,
    auth_password: String,
    auth_loading: bool,
    auth_error: Option<String>,
    auth_notice: Option<String>, // e.g. recovery email confirmation
    // Navigation
    current_focus: Focus,
    menu_index: usize,
    current_page: Page,
    selected_mentor: Option<Mentor>,
    pending_feedback: Option<PendingFeedback>,
    // Dashboard
    mentor_count: Option<u64>,
    recent_sessions: Vec<Session>,
    dashboard_loading: bool,
    // Mentor directory
    mentors: Vec<Mentor>,
    filtered_mentors: Vec<Mentor>,
    mentors_loading: bool,
    mentors_list_state: ListState,
    search_query: String,
    search_mode: bool,
    expertise_index: usize, // Index into expertise_options(mentors)
    // Session list
    sessions: Vec<Session>,
    filtered_sessions: Vec<Session>,
    sessions_loading: bool,
    sessions_list_state: ListState,
    session_filter: SessionFilter,
    feedback_list_state: ListState, // Selection among feedback candidates
    // Booking form
    booking_open: bool,
    booking_field: BookingField,
    booking_topic: String,
    booking_date: String,
    booking_time: String,
    booking_notes_textarea: TextArea<'static>,
    booking_submitting: bool,
    booking_confirmed_at: Option<Instant>,
    // Feedback form
    feedback_field: FeedbackField,
    feedback_rating: u8, // 0 = none chosen yet
    feedback_comment_textarea: TextArea<'static>,
    feedback_submitting: bool,
    feedback_confirmed_at: Option<Instant>,
    // Blocking error modal
    alert: Option<String>,
    show_log: bool,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            net_sender: None,
            config_save_sender: None,
            user: None,
            terminal_size: Rect::default(),
            spinner_index: 0,
            theme: crate::ui::Theme::default(),
            has_access_token: false,
            access_token: None,
            resuming_session: false,
            auth_mode: AuthMode::SignIn,
            auth_field: AuthField::Email,
            auth_email: String::new(),
            auth_password: String::new(),
            auth_loading: false,
            auth_error: None,
            auth_notice: None,
            current_focus: Focus::Menu,
            menu_index: 0,
            current_page: Page::Home,
            selected_mentor: None,
            pending_feedback: None,
            mentor_count: None,
            recent_sessions: vec![],
            dashboard_loading: false,
            mentors: vec![],
            filtered_mentors: vec![],
            mentors_loading: false,
            mentors_list_state: ListState::default(),
            search_query: String::new(),
            search_mode: false,
            expertise_index: 0,
            sessions: vec![],
            filtered_sessions: vec![],
            sessions_loading: false,
            sessions_list_state: ListState::default(),
            session_filter: SessionFilter::All,
            feedback_list_state: ListState::default(),
            booking_open: false,
            booking_field: BookingField::Topic,
            booking_topic: String::new(),
            booking_date: String::new(),
            booking_time: String::new(),
            booking_notes_textarea: TextArea::default(),
            booking_submitting: false,
            booking_confirmed_at: None,
            feedback_field: FeedbackField::Rating,
            feedback_rating: 0,
            feedback_comment_textarea: TextArea::default(),
            feedback_submitting: false,
            feedback_confirmed_at: None,
            alert: None,
            show_log: false,
        }
    }
}

impl State {
    pub fn new(
        net_sender: NetworkEventSender,
        config_save_sender: crate::app::ConfigSaveSender,
        has_access_token: bool,
        theme: crate::ui::Theme,
    ) -> Self {
        State {
            net_sender: Some(net_sender),
            config_save_sender: Some(config_save_sender),
            has_access_token,
            resuming_session: has_access_token,
            theme,
            ..State::default()
        }
    }

    /// Get the current theme.
    ///
    pub fn get_theme(&self) -> &crate::ui::Theme {
        &self.theme
    }

    /// Returns details for current user.
    ///
    pub fn get_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Sets the signed-in user and clears the landing form, then loads the
    /// dashboard behind the identity gate.
    ///
    pub fn set_user(&mut self, user: User) -> &mut Self {
        info!("Signed in as {}", user.full_name);
        self.user = Some(user);
        self.has_access_token = true;
        self.resuming_session = false;
        self.auth_loading = false;
        self.auth_error = None;
        self.auth_notice = None;
        self.auth_password.clear();
        self.request_config_save();
        self.dispatch(NetworkEvent::Dashboard);
        self.dashboard_loading = true;
        self
    }

    /// Returns whether the identity gate has been passed.
    ///
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Returns whether a stored session token is still being verified. The
    /// landing form stays hidden behind the spinner until this settles.
    ///
    pub fn is_resuming_session(&self) -> bool {
        self.resuming_session
    }

    /// Marks the stored token as rejected, falling back to the landing form.
    ///
    pub fn session_resume_failed(&mut self) -> &mut Self {
        self.resuming_session = false;
        self.has_access_token = false;
        self.access_token = None;
        self
    }

    /// Returns the session token for persistence.
    ///
    pub fn get_access_token(&self) -> Option<String> {
        self.access_token.clone()
    }

    /// Mirrors the gateway's session token so it can be persisted.
    ///
    pub fn set_access_token(&mut self, token: Option<String>) -> &mut Self {
        self.has_access_token = token.is_some();
        self.access_token = token;
        self
    }

    /// Clears identity and per-user data after sign-out, keeping wiring and
    /// theme intact.
    ///
    pub fn signed_out(&mut self) -> &mut Self {
        info!("Signed out");
        self.user = None;
        self.has_access_token = false;
        self.access_token = None;
        self.auth_mode = AuthMode::SignIn;
        self.auth_field = AuthField::Email;
        self.auth_email.clear();
        self.auth_password.clear();
        self.auth_error = None;
        self.auth_notice = None;
        self.current_focus = Focus::Menu;
        self.menu_index = 0;
        self.current_page = Page::Home;
        self.selected_mentor = None;
        self.pending_feedback = None;
        self.mentor_count = None;
        self.recent_sessions = vec![];
        self.mentors = vec![];
        self.filtered_mentors = vec![];
        self.sessions = vec![];
        self.filtered_sessions = vec![];
        self.mentors_list_state.select(None);
        self.sessions_list_state.select(None);
        self.feedback_list_state.select(None);
        self.reset_booking_form();
        self.booking_open = false;
        self.reset_feedback_form();
        self.request_config_save();
        self
    }

    /// Sets the terminal size.
    ///
    pub fn set_terminal_size(&mut self, size: Rect) -> &mut Self {
        self.terminal_size = size;
        self
    }

    /// Return the terminal size.
    ///
    pub fn get_terminal_size(&self) -> &Rect {
        &self.terminal_size
    }

    /// Advance the spinner index.
    ///
    pub fn advance_spinner_index(&mut self) -> &mut Self {
        self.spinner_index += 1;
        if self.spinner_index >= SPINNER_FRAME_COUNT {
            self.spinner_index = 0;
        }
        self
    }

    /// Return the current spinner index.
    ///
    pub fn get_spinner_index(&self) -> &usize {
        &self.spinner_index
    }

    // ---- Landing form ----

    pub fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    /// Toggle between the sign-in and password recovery forms.
    ///
    pub fn toggle_auth_mode(&mut self) -> &mut Self {
        self.auth_mode = match self.auth_mode {
            AuthMode::SignIn => AuthMode::ResetPassword,
            AuthMode::ResetPassword => AuthMode::SignIn,
        };
        self.auth_field = AuthField::Email;
        self.auth_error = None;
        self.auth_notice = None;
        self
    }

    pub fn auth_field(&self) -> AuthField {
        self.auth_field
    }

    /// Move to the other sign-in field. Recovery only has the email field.
    ///
    pub fn toggle_auth_field(&mut self) -> &mut Self {
        if self.auth_mode == AuthMode::SignIn {
            self.auth_field = match self.auth_field {
                AuthField::Email => AuthField::Password,
                AuthField::Password => AuthField::Email,
            };
        }
        self
    }

    pub fn auth_email(&self) -> &str {
        &self.auth_email
    }

    pub fn auth_password(&self) -> &str {
        &self.auth_password
    }

    /// Append a character to the focused landing form field.
    ///
    pub fn push_auth_char(&mut self, c: char) -> &mut Self {
        match self.auth_field {
            AuthField::Email => self.auth_email.push(c),
            AuthField::Password => self.auth_password.push(c),
        }
        self
    }

    /// Remove the last character from the focused landing form field.
    ///
    pub fn pop_auth_char(&mut self) -> &mut Self {
        match self.auth_field {
            AuthField::Email => self.auth_email.pop(),
            AuthField::Password => self.auth_password.pop(),
        };
        self
    }

    pub fn is_auth_loading(&self) -> bool {
        self.auth_loading
    }

    pub fn auth_error(&self) -> Option<&str> {
        self.auth_error.as_deref()
    }

    pub fn auth_notice(&self) -> Option<&str> {
        self.auth_notice.as_deref()
    }

    /// Submit the landing form: dispatch the sign-in or recovery request for
    /// the entered values. Ignored while a previous submit is in flight.
    ///
    pub fn submit_auth_form(&mut self) -> &mut Self {
        if self.auth_loading {
            return self;
        }
        let email = self.auth_email.trim().to_string();
        if email.is_empty() {
            self.auth_error = Some("Email is required".to_string());
            return self;
        }
        match self.auth_mode {
            AuthMode::SignIn => {
                if self.auth_password.is_empty() {
                    self.auth_error = Some("Password is required".to_string());
                    return self;
                }
                self.auth_loading = true;
                self.auth_error = None;
                let password = self.auth_password.clone();
                self.dispatch(NetworkEvent::SignIn { email, password });
            }
            AuthMode::ResetPassword => {
                self.auth_loading = true;
                self.auth_error = None;
                self.dispatch(NetworkEvent::ResetPassword { email });
            }
        }
        self
    }

    /// Record a failed sign-in or recovery attempt.
    ///
    pub fn auth_failed(&mut self, message: String) -> &mut Self {
        self.auth_loading = false;
        self.auth_error = Some(message);
        self
    }

    /// Record that a recovery email was requested. Always reported as sent,
    /// whether or not an account exists for the address.
    ///
    pub fn recovery_email_sent(&mut self) -> &mut Self {
        self.auth_loading = false;
        self.auth_notice = Some(
            "If an account exists for that address, a recovery email is on its way.".to_string(),
        );
        self.auth_mode = AuthMode::SignIn;
        self
    }

    // ---- Navigation ----

    /// Resolve the screen to draw.
    ///
    pub fn current_screen(&self) -> Screen {
        Screen::resolve(
            self.pending_feedback.as_ref(),
            self.selected_mentor.is_some(),
            self.current_page,
        )
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    /// Return the current focus.
    ///
    pub fn current_focus(&self) -> &Focus {
        &self.current_focus
    }

    /// Change focus to the sidebar menu.
    ///
    pub fn focus_menu(&mut self) -> &mut Self {
        self.current_focus = Focus::Menu;
        self
    }

    /// Change focus to the current view.
    ///
    pub fn focus_view(&mut self) -> &mut Self {
        self.current_focus = Focus::View;
        self
    }

    pub fn menu_index(&self) -> usize {
        self.menu_index
    }

    /// Move the sidebar selection down, wrapping.
    ///
    pub fn next_menu_entry(&mut self) -> &mut Self {
        self.menu_index = (self.menu_index + 1) % Page::ALL.len();
        self
    }

    /// Move the sidebar selection up, wrapping.
    ///
    pub fn previous_menu_entry(&mut self) -> &mut Self {
        self.menu_index = (self.menu_index + Page::ALL.len() - 1) % Page::ALL.len();
        self
    }

    /// Navigate to the page under the sidebar selection.
    ///
    pub fn activate_menu_entry(&mut self) -> &mut Self {
        self.navigate(Page::ALL[self.menu_index])
    }

    /// Navigate to a page, clearing every override and kicking off the fetch
    /// the page needs.
    ///
    pub fn navigate(&mut self, page: Page) -> &mut Self {
        debug!("Navigating to {:?}...", page);
        self.current_page = page;
        self.menu_index = Page::ALL.iter().position(|p| *p == page).unwrap_or(0);
        self.selected_mentor = None;
        self.pending_feedback = None;
        self.booking_open = false;
        self.booking_confirmed_at = None;
        self.feedback_confirmed_at = None;
        self.current_focus = Focus::View;
        match page {
            Page::Home => {
                self.dashboard_loading = true;
                self.dispatch(NetworkEvent::Dashboard);
            }
            Page::Mentors => {
                self.mentors_loading = true;
                self.dispatch(NetworkEvent::Mentors);
            }
            Page::Sessions | Page::Feedback => {
                self.sessions_loading = true;
                self.dispatch(NetworkEvent::Sessions);
            }
        }
        self
    }

    /// Open a mentor's profile from the directory.
    ///
    pub fn select_mentor(&mut self, mentor: Mentor) -> &mut Self {
        debug!("Opening profile for mentor {}...", mentor.id);
        self.selected_mentor = Some(mentor);
        self.reset_booking_form();
        self.booking_open = false;
        self
    }

    /// Return from a mentor profile to the directory.
    ///
    pub fn back_from_profile(&mut self) -> &mut Self {
        self.selected_mentor = None;
        self.booking_open = false;
        self.booking_confirmed_at = None;
        self
    }

    pub fn get_selected_mentor(&self) -> Option<&Mentor> {
        self.selected_mentor.as_ref()
    }

    /// Open the feedback form for a session.
    ///
    pub fn leave_feedback(&mut self, pending: PendingFeedback) -> &mut Self {
        debug!("Opening feedback form for session {}...", pending.session_id);
        self.pending_feedback = Some(pending);
        self.reset_feedback_form();
        self
    }

    /// Close the feedback form and land on the session list.
    ///
    pub fn feedback_complete(&mut self) -> &mut Self {
        self.pending_feedback = None;
        self.reset_feedback_form();
        self.navigate(Page::Sessions)
    }

    pub fn get_pending_feedback(&self) -> Option<&PendingFeedback> {
        self.pending_feedback.as_ref()
    }

    // ---- Dashboard ----

    pub fn is_dashboard_loading(&self) -> bool {
        self.dashboard_loading
    }

    /// Store the dashboard figures fetched in one round trip.
    ///
    pub fn set_dashboard(&mut self, mentor_count: u64, recent_sessions: Vec<Session>) -> &mut Self {
        self.mentor_count = Some(mentor_count);
        self.recent_sessions = recent_sessions;
        self.dashboard_loading = false;
        self
    }

    /// Mark the dashboard fetch as failed; the screen degrades to empty.
    ///
    pub fn dashboard_failed(&mut self) -> &mut Self {
        self.mentor_count = None;
        self.recent_sessions = vec![];
        self.dashboard_loading = false;
        self
    }

    pub fn get_mentor_count(&self) -> Option<u64> {
        self.mentor_count
    }

    pub fn get_recent_sessions(&self) -> &Vec<Session> {
        &self.recent_sessions
    }

    // ---- Mentor directory ----

    pub fn is_mentors_loading(&self) -> bool {
        self.mentors_loading
    }

    /// Set the mentor directory, rebuilding filters and selection.
    ///
    pub fn set_mentors(&mut self, mentors: Vec<Mentor>) -> &mut Self {
        self.mentors = mentors;
        self.mentors_loading = false;
        self.expertise_index = 0;
        self.update_mentor_filters();
        self
    }

    pub fn get_filtered_mentors(&self) -> &Vec<Mentor> {
        &self.filtered_mentors
    }

    pub fn get_mentors_list_state(&mut self) -> &mut ListState {
        &mut self.mentors_list_state
    }

    /// Activate the next mentor in the filtered directory.
    ///
    pub fn next_mentor_index(&mut self) -> &mut Self {
        if self.filtered_mentors.is_empty() {
            self.mentors_list_state.select(None);
            return self;
        }
        let next = match self.mentors_list_state.selected() {
            Some(i) if i + 1 < self.filtered_mentors.len() => Some(i + 1),
            Some(_) => Some(0),
            None => Some(0),
        };
        self.mentors_list_state.select(next);
        self
    }

    /// Activate the previous mentor in the filtered directory.
    ///
    pub fn previous_mentor_index(&mut self) -> &mut Self {
        if self.filtered_mentors.is_empty() {
            self.mentors_list_state.select(None);
            return self;
        }
        let prev = match self.mentors_list_state.selected() {
            Some(i) if i > 0 => Some(i - 1),
            Some(_) => Some(self.filtered_mentors.len() - 1),
            None => Some(self.filtered_mentors.len() - 1),
        };
        self.mentors_list_state.select(prev);
        self
    }

    /// Return the mentor under the directory selection.
    ///
    pub fn selected_directory_mentor(&self) -> Option<&Mentor> {
        self.mentors_list_state
            .selected()
            .and_then(|i| self.filtered_mentors.get(i))
    }

    pub fn is_search_mode(&self) -> bool {
        self.search_mode
    }

    pub fn set_search_mode(&mut self, mode: bool) -> &mut Self {
        self.search_mode = mode;
        self
    }

    pub fn get_search_query(&self) -> &str {
        &self.search_query
    }

    pub fn push_search_char(&mut self, c: char) -> &mut Self {
        self.search_query.push(c);
        self.update_mentor_filters()
    }

    pub fn pop_search_char(&mut self) -> &mut Self {
        self.search_query.pop();
        self.update_mentor_filters()
    }

    pub fn clear_search(&mut self) -> &mut Self {
        self.search_query.clear();
        self.search_mode = false;
        self.update_mentor_filters()
    }

    /// Return the expertise options for the loaded directory, "all" first.
    ///
    pub fn get_expertise_options(&self) -> Vec<String> {
        expertise_options(&self.mentors)
    }

    /// Return the active expertise filter.
    ///
    pub fn current_expertise(&self) -> String {
        let options = self.get_expertise_options();
        options
            .get(self.expertise_index)
            .cloned()
            .unwrap_or_else(|| "all".to_string())
    }

    /// Cycle to the next expertise filter option.
    ///
    pub fn cycle_expertise_filter(&mut self) -> &mut Self {
        let options = self.get_expertise_options();
        if !options.is_empty() {
            self.expertise_index = (self.expertise_index + 1) % options.len();
        }
        self.update_mentor_filters()
    }

    /// Re-derive the filtered directory from the query and expertise filter,
    /// keeping the selection in range.
    ///
    fn update_mentor_filters(&mut self) -> &mut Self {
        let expertise = self.current_expertise();
        self.filtered_mentors = filter_mentors(&self.mentors, &self.search_query, &expertise);
        if self.filtered_mentors.is_empty() {
            self.mentors_list_state.select(None);
        } else {
            let selected = self
                .mentors_list_state
                .selected()
                .filter(|i| *i < self.filtered_mentors.len())
                .unwrap_or(0);
            self.mentors_list_state.select(Some(selected));
        }
        self
    }

    // ---- Session list ----

    pub fn is_sessions_loading(&self) -> bool {
        self.sessions_loading
    }

    /// Set the session list, rebuilding filters and selection.
    ///
    pub fn set_sessions(&mut self, sessions: Vec<Session>) -> &mut Self {
        self.sessions = sessions;
        self.sessions_loading = false;
        self.update_session_filters();
        self.update_feedback_candidates();
        self
    }

    pub fn get_filtered_sessions(&self) -> &Vec<Session> {
        &self.filtered_sessions
    }

    pub fn get_sessions_list_state(&mut self) -> &mut ListState {
        &mut self.sessions_list_state
    }

    pub fn current_session_filter(&self) -> SessionFilter {
        self.session_filter
    }

    /// Cycle to the next session status filter.
    ///
    pub fn cycle_session_filter(&mut self) -> &mut Self {
        self.session_filter = self.session_filter.next();
        self.update_session_filters()
    }

    /// Activate the next session in the filtered list.
    ///
    pub fn next_session_index(&mut self) -> &mut Self {
        if self.filtered_sessions.is_empty() {
            self.sessions_list_state.select(None);
            return self;
        }
        let next = match self.sessions_list_state.selected() {
            Some(i) if i + 1 < self.filtered_sessions.len() => Some(i + 1),
            Some(_) => Some(0),
            None => Some(0),
        };
        self.sessions_list_state.select(next);
        self
    }

    /// Activate the previous session in the filtered list.
    ///
    pub fn previous_session_index(&mut self) -> &mut Self {
        if self.filtered_sessions.is_empty() {
            self.sessions_list_state.select(None);
            return self;
        }
        let prev = match self.sessions_list_state.selected() {
            Some(i) if i > 0 => Some(i - 1),
            Some(_) => Some(self.filtered_sessions.len() - 1),
            None => Some(self.filtered_sessions.len() - 1),
        };
        self.sessions_list_state.select(prev);
        self
    }

    /// Return the session under the list selection.
    ///
    pub fn selected_session(&self) -> Option<&Session> {
        self.sessions_list_state
            .selected()
            .and_then(|i| self.filtered_sessions.get(i))
    }

    fn update_session_filters(&mut self) -> &mut Self {
        self.filtered_sessions = filter_sessions(&self.sessions, self.session_filter);
        if self.filtered_sessions.is_empty() {
            self.sessions_list_state.select(None);
        } else {
            let selected = self
                .sessions_list_state
                .selected()
                .filter(|i| *i < self.filtered_sessions.len())
                .unwrap_or(0);
            self.sessions_list_state.select(Some(selected));
        }
        self
    }

    // ---- Feedback candidates ----

    /// Return the sessions eligible for feedback: completed ones.
    ///
    pub fn feedback_candidates(&self) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.status == SessionStatus::Completed)
            .collect()
    }

    pub fn get_feedback_list_state(&mut self) -> &mut ListState {
        &mut self.feedback_list_state
    }

    /// Activate the next feedback candidate.
    ///
    pub fn next_feedback_candidate(&mut self) -> &mut Self {
        let len = self.feedback_candidates().len();
        if len == 0 {
            self.feedback_list_state.select(None);
            return self;
        }
        let next = match self.feedback_list_state.selected() {
            Some(i) if i + 1 < len => Some(i + 1),
            Some(_) => Some(0),
            None => Some(0),
        };
        self.feedback_list_state.select(next);
        self
    }

    /// Activate the previous feedback candidate.
    ///
    pub fn previous_feedback_candidate(&mut self) -> &mut Self {
        let len = self.feedback_candidates().len();
        if len == 0 {
            self.feedback_list_state.select(None);
            return self;
        }
        let prev = match self.feedback_list_state.selected() {
            Some(i) if i > 0 => Some(i - 1),
            Some(_) => Some(len - 1),
            None => Some(len - 1),
        };
        self.feedback_list_state.select(prev);
        self
    }

    /// Return the feedback candidate under the selection.
    ///
    pub fn selected_feedback_candidate(&self) -> Option<&Session> {
        self.feedback_list_state
            .selected()
            .and_then(|i| self.feedback_candidates().get(i).copied())
    }

    fn update_feedback_candidates(&mut self) -> &mut Self {
        let len = self.feedback_candidates().len();
        if len == 0 {
            self.feedback_list_state.select(None);
        } else {
            let selected = self
                .feedback_list_state
                .selected()
                .filter(|i| *i < len)
                .unwrap_or(0);
            self.feedback_list_state.select(Some(selected));
        }
        self
    }

    // ---- Booking form ----

    pub fn is_booking_open(&self) -> bool {
        self.booking_open
    }

    /// Open the booking form on the selected mentor's profile, dated today.
    ///
    pub fn open_booking_form(&mut self) -> &mut Self {
        self.reset_booking_form();
        self.booking_open = true;
        self
    }

    /// Close the booking form without submitting.
    ///
    pub fn close_booking_form(&mut self) -> &mut Self {
        self.booking_open = false;
        self.booking_confirmed_at = None;
        self
    }

    fn reset_booking_form(&mut self) {
        self.booking_field = BookingField::Topic;
        self.booking_topic.clear();
        self.booking_date = Local::now().format("%Y-%m-%d").to_string();
        self.booking_time = "10:00".to_string();
        self.booking_notes_textarea = TextArea::default();
        self.booking_submitting = false;
        self.booking_confirmed_at = None;
    }

    pub fn booking_field(&self) -> BookingField {
        self.booking_field
    }

    /// Advance the booking form focus to the next field.
    ///
    pub fn next_booking_field(&mut self) -> &mut Self {
        self.booking_field = self.booking_field.next();
        self
    }

    pub fn booking_topic(&self) -> &str {
        &self.booking_topic
    }

    pub fn booking_date(&self) -> &str {
        &self.booking_date
    }

    pub fn booking_time(&self) -> &str {
        &self.booking_time
    }

    pub fn booking_notes_textarea(&mut self) -> &mut TextArea<'static> {
        &mut self.booking_notes_textarea
    }

    pub fn booking_notes_widget(&self) -> &TextArea<'static> {
        &self.booking_notes_textarea
    }

    /// Return the notes as entered, or None when blank.
    ///
    pub fn booking_notes(&self) -> Option<String> {
        let text = self.booking_notes_textarea.lines().join("\n");
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Append a character to the focused single-line booking field.
    ///
    pub fn push_booking_char(&mut self, c: char) -> &mut Self {
        match self.booking_field {
            BookingField::Topic => self.booking_topic.push(c),
            BookingField::Date => self.booking_date.push(c),
            BookingField::Time => self.booking_time.push(c),
            BookingField::Notes => {} // Notes go through the textarea
        }
        self
    }

    /// Remove the last character from the focused single-line booking field.
    ///
    pub fn pop_booking_char(&mut self) -> &mut Self {
        match self.booking_field {
            BookingField::Topic => {
                self.booking_topic.pop();
            }
            BookingField::Date => {
                self.booking_date.pop();
            }
            BookingField::Time => {
                self.booking_time.pop();
            }
            BookingField::Notes => {}
        }
        self
    }

    pub fn is_booking_submitting(&self) -> bool {
        self.booking_submitting
    }

    pub fn is_booking_confirmed(&self) -> bool {
        self.booking_confirmed_at.is_some()
    }

    /// Validate and submit the booking form for the selected mentor. Dates
    /// before today are clamped forward; blank topics are rejected.
    ///
    pub fn submit_booking_form(&mut self) -> &mut Self {
        if self.booking_submitting || self.booking_confirmed_at.is_some() {
            return self;
        }
        let mentor = match &self.selected_mentor {
            Some(mentor) => mentor,
            None => return self,
        };
        let student_id = match &self.user {
            Some(user) => user.id.clone(),
            None => return self,
        };
        if self.booking_topic.trim().is_empty() {
            self.alert = Some("A topic is required to book a session.".to_string());
            return self;
        }

        let today = Local::now().format("%Y-%m-%d").to_string();
        if self.booking_date.as_str() < today.as_str() {
            self.booking_date = today;
        }

        self.booking_submitting = true;
        let event = NetworkEvent::BookSession {
            student_id,
            mentor_id: mentor.id.clone(),
            topic: self.booking_topic.trim().to_string(),
            scheduled_date: self.booking_date.clone(),
            scheduled_time: self.booking_time.clone(),
            additional_notes: self.booking_notes(),
        };
        self.dispatch(event);
        self
    }

    /// Record a successful booking; the confirmation shows until the delay
    /// elapses, then the profile closes.
    ///
    pub fn booking_succeeded(&mut self) -> &mut Self {
        self.booking_submitting = false;
        self.booking_confirmed_at = Some(Instant::now());
        self
    }

    /// Record a failed booking so the form can be corrected and retried.
    ///
    pub fn booking_failed(&mut self, message: String) -> &mut Self {
        self.booking_submitting = false;
        self.alert = Some(message);
        self
    }

    // ---- Feedback form ----

    fn reset_feedback_form(&mut self) {
        self.feedback_field = FeedbackField::Rating;
        self.feedback_rating = 0;
        self.feedback_comment_textarea = TextArea::default();
        self.feedback_submitting = false;
        self.feedback_confirmed_at = None;
    }

    pub fn feedback_field(&self) -> FeedbackField {
        self.feedback_field
    }

    /// Toggle the feedback form focus between rating and comment.
    ///
    pub fn toggle_feedback_field(&mut self) -> &mut Self {
        self.feedback_field = match self.feedback_field {
            FeedbackField::Rating => FeedbackField::Comment,
            FeedbackField::Comment => FeedbackField::Rating,
        };
        self
    }

    pub fn feedback_rating(&self) -> u8 {
        self.feedback_rating
    }

    /// Set the star rating, 1 through 5.
    ///
    pub fn set_feedback_rating(&mut self, rating: u8) -> &mut Self {
        if (1..=5).contains(&rating) {
            self.feedback_rating = rating;
        }
        self
    }

    pub fn feedback_comment_textarea(&mut self) -> &mut TextArea<'static> {
        &mut self.feedback_comment_textarea
    }

    pub fn feedback_comment_widget(&self) -> &TextArea<'static> {
        &self.feedback_comment_textarea
    }

    pub fn is_feedback_submitting(&self) -> bool {
        self.feedback_submitting
    }

    pub fn is_feedback_confirmed(&self) -> bool {
        self.feedback_confirmed_at.is_some()
    }

    /// Validate and submit the feedback form. A rating is required; the
    /// comment may be blank.
    ///
    pub fn submit_feedback_form(&mut self) -> &mut Self {
        if self.feedback_submitting || self.feedback_confirmed_at.is_some() {
            return self;
        }
        let pending = match &self.pending_feedback {
            Some(pending) => pending,
            None => return self,
        };
        let student_id = match &self.user {
            Some(user) => user.id.clone(),
            None => return self,
        };
        if self.feedback_rating == 0 {
            self.alert = Some("Pick a rating before submitting.".to_string());
            return self;
        }

        self.feedback_submitting = true;
        let event = NetworkEvent::SubmitFeedback {
            session_id: pending.session_id.clone(),
            student_id,
            mentor_id: pending.mentor_id.clone(),
            rating: self.feedback_rating,
            comment: self.feedback_comment_textarea.lines().join("\n"),
        };
        self.dispatch(event);
        self
    }

    /// Record a successful feedback submit; the thank-you note shows until
    /// the delay elapses, then the form closes.
    ///
    pub fn feedback_succeeded(&mut self) -> &mut Self {
        self.feedback_submitting = false;
        self.feedback_confirmed_at = Some(Instant::now());
        self
    }

    /// Record a failed feedback submit so the form can be retried.
    ///
    pub fn feedback_failed(&mut self, message: String) -> &mut Self {
        self.feedback_submitting = false;
        self.alert = Some(message);
        self
    }

    // ---- Confirmation timers ----

    /// Run any confirmation whose display delay has elapsed. Driven from the
    /// render-loop tick with the current instant so it can be exercised
    /// without sleeping.
    ///
    pub fn tick_confirmations(&mut self, now: Instant) -> &mut Self {
        if let Some(confirmed_at) = self.booking_confirmed_at {
            if now.duration_since(confirmed_at) >= CONFIRMATION_DELAY {
                self.booking_confirmed_at = None;
                self.booking_open = false;
                self.selected_mentor = None;
                self.sessions_loading = true;
                self.dispatch(NetworkEvent::Sessions);
            }
        }
        if let Some(confirmed_at) = self.feedback_confirmed_at {
            if now.duration_since(confirmed_at) >= CONFIRMATION_DELAY {
                self.feedback_confirmed_at = None;
                self.feedback_complete();
            }
        }
        self
    }

    // ---- Alerts ----

    pub fn get_alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn set_alert(&mut self, message: String) -> &mut Self {
        self.alert = Some(message);
        self
    }

    pub fn clear_alert(&mut self) -> &mut Self {
        self.alert = None;
        self
    }

    pub fn is_log_visible(&self) -> bool {
        self.show_log
    }

    pub fn toggle_log(&mut self) -> &mut Self {
        self.show_log = !self.show_log;
        self
    }

    // ---- Wiring ----

    /// Send a network event for asynchronous handling.
    ///
    pub fn dispatch(&self, event: NetworkEvent) {
        if let Some(net_sender) = &self.net_sender {
            if let Err(err) = net_sender.send(event) {
                error!("Received error from network dispatch: {}", err);
            }
        }
    }

    /// Ask the main thread to persist configuration.
    ///
    fn request_config_save(&self) {
        if let Some(sender) = &self.config_save_sender {
            if let Err(err) = sender.send(()) {
                error!("Received error from config save dispatch: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    fn mentor_with_tags(name: &str, tags: &[&str]) -> Mentor {
        Mentor {
            full_name: name.to_string(),
            bio: String::new(),
            expertise: tags.iter().map(|t| t.to_string()).collect(),
            ..Faker.fake()
        }
    }

    fn session_with_status(status: SessionStatus) -> Session {
        Session {
            status,
            ..Faker.fake()
        }
    }

    #[test]
    fn set_user_clears_landing_form() {
        let mut state = State {
            auth_loading: true,
            auth_password: "secret".to_string(),
            auth_error: Some("boom".to_string()),
            ..State::default()
        };
        let user: User = Faker.fake();
        state.set_user(user.to_owned());
        assert_eq!(user, *state.get_user().unwrap());
        assert!(!state.is_auth_loading());
        assert!(state.auth_error().is_none());
        assert!(state.auth_password().is_empty());
        assert!(state.is_signed_in());
    }

    #[test]
    fn session_resume_failed_falls_back_to_landing() {
        let mut state = State {
            has_access_token: true,
            resuming_session: true,
            ..State::default()
        };
        state.session_resume_failed();
        assert!(!state.is_resuming_session());
        assert!(!state.has_access_token);
    }

    #[test]
    fn signed_out_clears_per_user_data() {
        let mut state = State {
            user: Some(Faker.fake()),
            has_access_token: true,
            mentors: vec![Faker.fake()],
            sessions: vec![Faker.fake()],
            selected_mentor: Some(Faker.fake()),
            ..State::default()
        };
        state.signed_out();
        assert!(!state.is_signed_in());
        assert!(state.mentors.is_empty());
        assert!(state.sessions.is_empty());
        assert!(state.get_selected_mentor().is_none());
        assert_eq!(state.current_page(), Page::Home);
    }

    #[test]
    fn advance_spinner_index() {
        let mut state = State::default();
        state.advance_spinner_index();
        assert_eq!(state.spinner_index, 1);
        for _ in 0..SPINNER_FRAME_COUNT {
            state.advance_spinner_index();
        }
        assert_eq!(state.spinner_index, 1);
    }

    #[test]
    fn toggle_auth_mode_resets_field_and_messages() {
        let mut state = State {
            auth_field: AuthField::Password,
            auth_error: Some("bad".to_string()),
            ..State::default()
        };
        state.toggle_auth_mode();
        assert_eq!(state.auth_mode(), AuthMode::ResetPassword);
        assert_eq!(state.auth_field(), AuthField::Email);
        assert!(state.auth_error().is_none());
        state.toggle_auth_mode();
        assert_eq!(state.auth_mode(), AuthMode::SignIn);
    }

    #[test]
    fn toggle_auth_field_is_inert_in_recovery_mode() {
        let mut state = State {
            auth_mode: AuthMode::ResetPassword,
            ..State::default()
        };
        state.toggle_auth_field();
        assert_eq!(state.auth_field(), AuthField::Email);
    }

    #[test]
    fn push_and_pop_auth_chars_edit_the_focused_field() {
        let mut state = State::default();
        state.push_auth_char('a').push_auth_char('b');
        assert_eq!(state.auth_email(), "ab");
        state.toggle_auth_field();
        state.push_auth_char('x');
        assert_eq!(state.auth_password(), "x");
        state.pop_auth_char();
        assert_eq!(state.auth_password(), "");
    }

    #[test]
    fn submit_auth_form_requires_email_and_password() {
        let mut state = State::default();
        state.submit_auth_form();
        assert!(state.auth_error().unwrap().contains("Email"));
        assert!(!state.is_auth_loading());

        state.auth_email = "a@b.c".to_string();
        state.submit_auth_form();
        assert!(state.auth_error().unwrap().contains("Password"));
        assert!(!state.is_auth_loading());
    }

    #[test]
    fn submit_auth_form_sets_loading_with_credentials() {
        let mut state = State {
            auth_email: "a@b.c".to_string(),
            auth_password: "secret".to_string(),
            ..State::default()
        };
        state.submit_auth_form();
        assert!(state.is_auth_loading());
        assert!(state.auth_error().is_none());
    }

    #[test]
    fn recovery_email_sent_returns_to_sign_in() {
        let mut state = State {
            auth_mode: AuthMode::ResetPassword,
            auth_loading: true,
            ..State::default()
        };
        state.recovery_email_sent();
        assert!(!state.is_auth_loading());
        assert_eq!(state.auth_mode(), AuthMode::SignIn);
        assert!(state.auth_notice().unwrap().contains("recovery email"));
    }

    #[test]
    fn navigate_clears_overrides() {
        let mut state = State {
            selected_mentor: Some(Faker.fake()),
            pending_feedback: Some(PendingFeedback {
                session_id: "s".to_string(),
                mentor_id: "m".to_string(),
                mentor_name: "n".to_string(),
                topic: "t".to_string(),
            }),
            booking_open: true,
            ..State::default()
        };
        state.navigate(Page::Mentors);
        assert_eq!(state.current_screen(), Screen::MentorDirectory);
        assert!(state.get_selected_mentor().is_none());
        assert!(state.get_pending_feedback().is_none());
        assert!(!state.is_booking_open());
        assert!(state.is_mentors_loading());
    }

    #[test]
    fn menu_navigation_wraps() {
        let mut state = State::default();
        state.previous_menu_entry();
        assert_eq!(state.menu_index(), Page::ALL.len() - 1);
        state.next_menu_entry();
        assert_eq!(state.menu_index(), 0);
    }

    #[test]
    fn select_mentor_overrides_page() {
        let mut state = State::default();
        state.navigate(Page::Mentors);
        state.select_mentor(Faker.fake());
        assert_eq!(state.current_screen(), Screen::MentorProfile);
        state.back_from_profile();
        assert_eq!(state.current_screen(), Screen::MentorDirectory);
    }

    #[test]
    fn leave_feedback_overrides_everything() {
        let mut state = State::default();
        state.navigate(Page::Sessions);
        state.select_mentor(Faker.fake());
        state.leave_feedback(PendingFeedback {
            session_id: "s".to_string(),
            mentor_id: "m".to_string(),
            mentor_name: "Dana".to_string(),
            topic: "Testing".to_string(),
        });
        assert_eq!(state.current_screen(), Screen::FeedbackForm);
        state.feedback_complete();
        assert_eq!(state.current_screen(), Screen::SessionList);
    }

    #[test]
    fn set_mentors_selects_first_filtered_entry() {
        let mut state = State::default();
        state.set_mentors(vec![
            mentor_with_tags("Ada", &["Rust"]),
            mentor_with_tags("Grace", &["COBOL"]),
        ]);
        assert_eq!(state.mentors_list_state.selected(), Some(0));
        assert_eq!(state.get_filtered_mentors().len(), 2);
    }

    #[test]
    fn search_narrows_and_clamps_selection() {
        let mut state = State::default();
        state.set_mentors(vec![
            mentor_with_tags("Ada", &["Rust"]),
            mentor_with_tags("Grace", &["COBOL"]),
            mentor_with_tags("Alan", &["Smalltalk"]),
        ]);
        state.next_mentor_index().next_mentor_index();
        assert_eq!(state.mentors_list_state.selected(), Some(2));
        for c in "grace".chars() {
            state.push_search_char(c);
        }
        assert_eq!(state.get_filtered_mentors().len(), 1);
        assert_eq!(state.mentors_list_state.selected(), Some(0));
        state.clear_search();
        assert_eq!(state.get_filtered_mentors().len(), 3);
    }

    #[test]
    fn expertise_cycle_wraps_through_all_options() {
        let mut state = State::default();
        state.set_mentors(vec![
            mentor_with_tags("Ada", &["Rust"]),
            mentor_with_tags("Grace", &["COBOL"]),
        ]);
        assert_eq!(state.current_expertise(), "all");
        state.cycle_expertise_filter();
        assert_eq!(state.current_expertise(), "COBOL");
        assert_eq!(state.get_filtered_mentors().len(), 1);
        state.cycle_expertise_filter();
        assert_eq!(state.current_expertise(), "Rust");
        state.cycle_expertise_filter();
        assert_eq!(state.current_expertise(), "all");
        assert_eq!(state.get_filtered_mentors().len(), 2);
    }

    #[test]
    fn mentor_index_wraps_both_directions() {
        let mut state = State::default();
        state.set_mentors(vec![
            mentor_with_tags("Ada", &[]),
            mentor_with_tags("Grace", &[]),
        ]);
        state.previous_mentor_index();
        assert_eq!(state.mentors_list_state.selected(), Some(1));
        state.next_mentor_index();
        assert_eq!(state.mentors_list_state.selected(), Some(0));
    }

    #[test]
    fn session_filter_cycles_and_filters() {
        let mut state = State::default();
        state.set_sessions(vec![
            session_with_status(SessionStatus::Scheduled),
            session_with_status(SessionStatus::Completed),
            session_with_status(SessionStatus::Cancelled),
        ]);
        assert_eq!(state.get_filtered_sessions().len(), 3);
        state.cycle_session_filter();
        assert_eq!(state.get_filtered_sessions().len(), 1);
        assert_eq!(
            state.get_filtered_sessions()[0].status,
            SessionStatus::Scheduled
        );
    }

    #[test]
    fn feedback_candidates_are_completed_sessions_only() {
        let mut state = State::default();
        state.set_sessions(vec![
            session_with_status(SessionStatus::Scheduled),
            session_with_status(SessionStatus::Completed),
            session_with_status(SessionStatus::Completed),
        ]);
        assert_eq!(state.feedback_candidates().len(), 2);
        assert_eq!(state.feedback_list_state.selected(), Some(0));
        state.next_feedback_candidate();
        assert_eq!(state.feedback_list_state.selected(), Some(1));
        state.next_feedback_candidate();
        assert_eq!(state.feedback_list_state.selected(), Some(0));
    }

    #[test]
    fn open_booking_form_defaults_date_to_today() {
        let mut state = State::default();
        state.select_mentor(Faker.fake());
        state.open_booking_form();
        assert!(state.is_booking_open());
        assert_eq!(
            state.booking_date(),
            Local::now().format("%Y-%m-%d").to_string()
        );
        assert_eq!(state.booking_field(), BookingField::Topic);
    }

    #[test]
    fn submit_booking_form_requires_topic() {
        let mut state = State {
            user: Some(Faker.fake()),
            ..State::default()
        };
        state.select_mentor(Faker.fake());
        state.open_booking_form();
        state.submit_booking_form();
        assert!(!state.is_booking_submitting());
        assert!(state.get_alert().unwrap().contains("topic"));
    }

    #[test]
    fn submit_booking_form_clamps_past_dates_forward() {
        let mut state = State {
            user: Some(Faker.fake()),
            ..State::default()
        };
        state.select_mentor(Faker.fake());
        state.open_booking_form();
        state.booking_topic = "Ownership".to_string();
        state.booking_date = "2001-01-01".to_string();
        state.submit_booking_form();
        assert!(state.is_booking_submitting());
        assert_eq!(
            state.booking_date(),
            Local::now().format("%Y-%m-%d").to_string()
        );
    }

    #[test]
    fn booking_confirmation_closes_profile_after_delay() {
        let mut state = State {
            user: Some(Faker.fake()),
            selected_mentor: Some(Faker.fake()),
            booking_open: true,
            booking_confirmed_at: Some(Instant::now() - Duration::from_secs(3)),
            ..State::default()
        };
        state.tick_confirmations(Instant::now());
        assert!(!state.is_booking_open());
        assert!(state.get_selected_mentor().is_none());
        assert!(!state.is_booking_confirmed());
    }

    #[test]
    fn booking_confirmation_persists_before_delay() {
        let now = Instant::now();
        let mut state = State {
            selected_mentor: Some(Faker.fake()),
            booking_open: true,
            booking_confirmed_at: Some(now),
            ..State::default()
        };
        state.tick_confirmations(now + Duration::from_secs(1));
        assert!(state.is_booking_open());
        assert!(state.is_booking_confirmed());
    }

    #[test]
    fn submit_feedback_form_requires_rating() {
        let mut state = State {
            user: Some(Faker.fake()),
            pending_feedback: Some(PendingFeedback {
                session_id: "s".to_string(),
                mentor_id: "m".to_string(),
                mentor_name: "n".to_string(),
                topic: "t".to_string(),
            }),
            ..State::default()
        };
        state.submit_feedback_form();
        assert!(!state.is_feedback_submitting());
        assert!(state.get_alert().unwrap().contains("rating"));

        state.clear_alert();
        state.set_feedback_rating(4);
        state.submit_feedback_form();
        assert!(state.is_feedback_submitting());
    }

    #[test]
    fn set_feedback_rating_rejects_out_of_range() {
        let mut state = State::default();
        state.set_feedback_rating(0);
        assert_eq!(state.feedback_rating(), 0);
        state.set_feedback_rating(6);
        assert_eq!(state.feedback_rating(), 0);
        state.set_feedback_rating(5);
        assert_eq!(state.feedback_rating(), 5);
    }

    #[test]
    fn feedback_confirmation_returns_to_sessions_after_delay() {
        let mut state = State {
            user: Some(Faker.fake()),
            current_page: Page::Mentors,
            pending_feedback: Some(PendingFeedback {
                session_id: "s".to_string(),
                mentor_id: "m".to_string(),
                mentor_name: "n".to_string(),
                topic: "t".to_string(),
            }),
            feedback_confirmed_at: Some(Instant::now() - Duration::from_secs(3)),
            ..State::default()
        };
        state.tick_confirmations(Instant::now());
        assert!(state.get_pending_feedback().is_none());
        assert_eq!(state.current_screen(), Screen::SessionList);
    }

    #[test]
    fn set_dashboard_clears_loading() {
        let mut state = State {
            dashboard_loading: true,
            ..State::default()
        };
        state.set_dashboard(7, vec![session_with_status(SessionStatus::Scheduled)]);
        assert!(!state.is_dashboard_loading());
        assert_eq!(state.get_mentor_count(), Some(7));
        assert_eq!(state.get_recent_sessions().len(), 1);
    }

    #[test]
    fn alert_set_and_clear() {
        let mut state = State::default();
        state.set_alert("Something broke".to_string());
        assert!(state.get_alert().unwrap().contains("broke"));
        state.clear_alert();
        assert!(state.get_alert().is_none());
    }
}
