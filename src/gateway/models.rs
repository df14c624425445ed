//! Wire-format row types for the remote store.
//!
//! These mirror the JSON shapes returned by the REST interface, including
//! embedded join objects. They are deserialization targets only; the rest of
//! the application works with the types in `resource.rs`.

use super::resource::{Role, SessionStatus};
use serde::Deserialize;

/// Embedded profile columns selected through an inner join.
///
#[derive(Debug, Deserialize)]
pub struct ProfileJoin {
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A row from the `profiles` table.
///
#[derive(Debug, Deserialize)]
pub struct ProfileRow {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A row from the `mentors` table joined with its profile.
///
#[derive(Debug, Deserialize)]
pub struct MentorRow {
    pub id: String,
    #[serde(default)]
    pub expertise: Option<Vec<String>>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub total_sessions: Option<u32>,
    pub profiles: ProfileJoin,
}

/// The mentor join embedded in a session row.
///
#[derive(Debug, Deserialize)]
pub struct SessionMentorJoin {
    #[allow(dead_code)]
    pub id: String,
    pub profiles: ProfileJoin,
}

/// A row from the `sessions` table, optionally joined with its mentor.
///
#[derive(Debug, Deserialize)]
pub struct SessionRow {
    pub id: String,
    pub student_id: String,
    pub mentor_id: String,
    pub topic: String,
    pub scheduled_date: String,
    pub scheduled_time: String,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    pub status: SessionStatus,
    #[serde(default)]
    pub additional_notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub mentor: Option<SessionMentorJoin>,
}

/// The identity provider's representation of an authenticated user.
///
#[derive(Debug, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A token-grant response from the identity provider.
///
#[derive(Debug, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: AuthUser,
}
