use crate::gateway::{Gateway, GatewayError, NewFeedback, NewSession};
use crate::state::State;
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    Me,
    SignIn {
        email: String,
        password: String,
    },
    SignOut,
    ResetPassword {
        email: String,
    },
    Mentors,
    Sessions,
    Dashboard,
    BookSession {
        student_id: String,
        mentor_id: String,
        topic: String,
        scheduled_date: String,
        scheduled_time: String,
        additional_notes: Option<String>,
    },
    SubmitFeedback {
        session_id: String,
        student_id: String,
        mentor_id: String,
        rating: u8,
        comment: String,
    },
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    gateway: &'a mut Gateway,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, gateway: &'a mut Gateway) -> Self {
        Handler { state, gateway }
    }

    /// Handle network events by type. Failures are folded back into state
    /// (fetches degrade to empty views, mutations surface an alert) so one
    /// bad response never takes the event loop down.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::Me => self.me().await?,
            Event::SignIn { email, password } => self.sign_in(email, password).await?,
            Event::SignOut => self.sign_out().await?,
            Event::ResetPassword { email } => self.reset_password(email).await?,
            Event::Mentors => self.mentors().await?,
            Event::Sessions => self.sessions().await?,
            Event::Dashboard => self.dashboard().await?,
            Event::BookSession {
                student_id,
                mentor_id,
                topic,
                scheduled_date,
                scheduled_time,
                additional_notes,
            } => {
                self.book_session(NewSession {
                    student_id,
                    mentor_id,
                    topic,
                    scheduled_date,
                    scheduled_time,
                    additional_notes,
                })
                .await?
            }
            Event::SubmitFeedback {
                session_id,
                student_id,
                mentor_id,
                rating,
                comment,
            } => {
                self.submit_feedback(NewFeedback {
                    session_id,
                    student_id,
                    mentor_id,
                    rating,
                    comment,
                })
                .await?
            }
        }
        Ok(())
    }

    /// Resume the stored session, updating state with the user's profile or
    /// falling back to the landing form.
    ///
    async fn me(&mut self) -> Result<()> {
        if !self.gateway.has_access_token() {
            debug!("No stored session token, waiting at landing screen.");
            self.state.lock().await.session_resume_failed();
            return Ok(());
        }
        info!("Resuming stored session...");
        match self.gateway.me().await {
            Ok(user) => {
                info!("Resumed session for {}.", user.full_name);
                let token = self.gateway.access_token().map(str::to_string);
                let mut state = self.state.lock().await;
                state.set_access_token(token);
                state.set_user(user);
            }
            Err(e) => {
                warn!("Stored session rejected: {}", e);
                self.state.lock().await.session_resume_failed();
            }
        }
        Ok(())
    }

    /// Exchange credentials for a session and update state with the user.
    ///
    async fn sign_in(&mut self, email: String, password: String) -> Result<()> {
        info!("Signing in {}...", email);
        match self.gateway.sign_in(&email, &password).await {
            Ok(user) => {
                let token = self.gateway.access_token().map(str::to_string);
                let mut state = self.state.lock().await;
                state.set_access_token(token);
                state.set_user(user);
            }
            Err(e) => {
                error!("Sign in failed for {}: {}", email, e);
                let message = match e.downcast_ref::<GatewayError>() {
                    Some(GatewayError::Api { status, .. }) if *status == 400 || *status == 401 => {
                        "Invalid email or password.".to_string()
                    }
                    _ => format!("Sign in failed: {}", e),
                };
                self.state.lock().await.auth_failed(message);
            }
        }
        Ok(())
    }

    /// Revoke the session and reset state to the landing screen.
    ///
    async fn sign_out(&mut self) -> Result<()> {
        info!("Signing out...");
        self.gateway.sign_out().await?;
        self.state.lock().await.signed_out();
        Ok(())
    }

    /// Request a password recovery email.
    ///
    async fn reset_password(&mut self, email: String) -> Result<()> {
        info!("Requesting password recovery for {}...", email);
        match self.gateway.reset_password(&email).await {
            Ok(()) => {
                self.state.lock().await.recovery_email_sent();
            }
            Err(e) => {
                error!("Password recovery request failed: {}", e);
                self.state
                    .lock()
                    .await
                    .auth_failed(format!("Recovery request failed: {}", e));
            }
        }
        Ok(())
    }

    /// Update state with the mentor directory.
    ///
    async fn mentors(&mut self) -> Result<()> {
        info!("Fetching mentor directory...");
        match self.gateway.mentors().await {
            Ok(mentors) => {
                info!("Received {} mentors.", mentors.len());
                self.state.lock().await.set_mentors(mentors);
            }
            Err(e) => {
                error!("Failed to fetch mentors: {}", e);
                self.state.lock().await.set_mentors(vec![]);
            }
        }
        Ok(())
    }

    /// Update state with the student's sessions.
    ///
    async fn sessions(&mut self) -> Result<()> {
        let student_id = match self.student_id().await {
            Some(id) => id,
            None => {
                warn!("Skipping session fetch without a signed-in user.");
                return Ok(());
            }
        };
        info!("Fetching sessions...");
        match self.gateway.sessions(&student_id).await {
            Ok(sessions) => {
                info!("Received {} sessions.", sessions.len());
                self.state.lock().await.set_sessions(sessions);
            }
            Err(e) => {
                error!("Failed to fetch sessions: {}", e);
                self.state.lock().await.set_sessions(vec![]);
            }
        }
        Ok(())
    }

    /// Update state with the dashboard figures, fetched concurrently. Either
    /// failure fails the whole refresh; the dashboard degrades to empty.
    ///
    async fn dashboard(&mut self) -> Result<()> {
        let student_id = match self.student_id().await {
            Some(id) => id,
            None => {
                warn!("Skipping dashboard fetch without a signed-in user.");
                return Ok(());
            }
        };
        info!("Fetching dashboard figures...");
        match tokio::try_join!(
            self.gateway.mentor_count(),
            self.gateway.recent_sessions(&student_id),
        ) {
            Ok((mentor_count, recent_sessions)) => {
                info!(
                    "Received dashboard figures: {} mentors, {} recent sessions.",
                    mentor_count,
                    recent_sessions.len()
                );
                self.state
                    .lock()
                    .await
                    .set_dashboard(mentor_count, recent_sessions);
            }
            Err(e) => {
                error!("Failed to fetch dashboard figures: {}", e);
                self.state.lock().await.dashboard_failed();
            }
        }
        Ok(())
    }

    /// Book a session, then confirm or alert.
    ///
    async fn book_session(&mut self, new: NewSession) -> Result<()> {
        info!("Booking session with mentor {}...", new.mentor_id);
        match self.gateway.book_session(&new).await {
            Ok(()) => {
                info!("Session booked successfully.");
                self.state.lock().await.booking_succeeded();
            }
            Err(e) => {
                error!("Failed to book session: {}", e);
                self.state
                    .lock()
                    .await
                    .booking_failed(format!("Booking failed: {}", e));
            }
        }
        Ok(())
    }

    /// Submit feedback, then confirm or alert.
    ///
    async fn submit_feedback(&mut self, new: NewFeedback) -> Result<()> {
        info!("Submitting feedback for session {}...", new.session_id);
        match self.gateway.submit_feedback(&new).await {
            Ok(()) => {
                info!("Feedback submitted successfully.");
                self.state.lock().await.feedback_succeeded();
            }
            Err(e) => {
                error!("Failed to submit feedback: {}", e);
                self.state
                    .lock()
                    .await
                    .feedback_failed(format!("Feedback failed: {}", e));
            }
        }
        Ok(())
    }

    async fn student_id(&self) -> Option<String> {
        let state = self.state.lock().await;
        state.get_user().map(|user| user.id.clone())
    }
}
