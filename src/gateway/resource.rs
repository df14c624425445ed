use fake::{Dummy, Fake};
use serde::{Deserialize, Serialize};

/// Defines account role data structure.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Mentor,
}

/// Defines user data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub avatar_url: Option<String>,
}

/// Defines mentor data structure. Aggregate fields (`average_rating`,
/// `total_sessions`) are derived server-side and never written from here.
///
#[derive(Clone, Debug, Dummy, PartialEq)]
pub struct Mentor {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub expertise: Vec<String>,
    pub bio: String,
    pub experience_years: u32,
    pub languages: Vec<String>,
    pub hourly_rate: Option<f64>,
    pub average_rating: f64,
    pub total_sessions: u32,
}

/// Defines session status data structure. Transitions are server-controlled;
/// values this client does not recognize fall back to `Unknown`.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl SessionStatus {
    /// Return the display label for the status.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "Scheduled",
            SessionStatus::Completed => "Completed",
            SessionStatus::Cancelled => "Cancelled",
            SessionStatus::Unknown => "Unknown",
        }
    }
}

/// Defines session data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq)]
pub struct Session {
    pub id: String,
    pub student_id: String,
    pub mentor_id: String,
    pub mentor_name: String,
    pub mentor_avatar: Option<String>,
    pub topic: String,
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub duration_minutes: u32,
    pub status: SessionStatus,
    pub additional_notes: Option<String>,
    pub created_at: Option<String>,
}

/// Defines the insert payload for booking a session. Sessions are always
/// created in status `scheduled`.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct NewSession {
    pub student_id: String,
    pub mentor_id: String,
    pub topic: String,
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub additional_notes: Option<String>,
}

/// Defines the insert payload for post-session feedback.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct NewFeedback {
    pub session_id: String,
    pub student_id: String,
    pub mentor_id: String,
    pub rating: u8,
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_status_labels() {
        assert_eq!(SessionStatus::Scheduled.label(), "Scheduled");
        assert_eq!(SessionStatus::Completed.label(), "Completed");
        assert_eq!(SessionStatus::Cancelled.label(), "Cancelled");
        assert_eq!(SessionStatus::Unknown.label(), "Unknown");
    }

    #[test]
    fn test_session_status_decodes_unrecognized_values() {
        let status: SessionStatus = serde_json::from_str("\"scheduled\"").unwrap();
        assert_eq!(status, SessionStatus::Scheduled);
        let status: SessionStatus = serde_json::from_str("\"rescheduled\"").unwrap();
        assert_eq!(status, SessionStatus::Unknown);
    }

    #[test]
    fn test_role_decodes() {
        let role: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, Role::Student);
        let role: Role = serde_json::from_str("\"mentor\"").unwrap();
        assert_eq!(role, Role::Mentor);
    }
}
