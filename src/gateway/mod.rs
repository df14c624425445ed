mod client;
mod error;
mod models;
mod resource;

pub use error::GatewayError;
pub use resource::*;

use anyhow::Result;
use client::{Client, Query};
use log::*;
use models::{MentorRow, ProfileRow, SessionRow};

/// Responsible for asynchronous interaction with the remote store including
/// transformation of response rows into explicitly-defined types.
///
/// Read operations borrow immutably so callers can run them concurrently;
/// only the sign-in/sign-out pair mutates the held token.
///
pub struct Gateway {
    client: Client,
}

impl Gateway {
    /// Returns a new instance for the given base URL and project key,
    /// optionally resuming a persisted session token.
    ///
    pub fn new(base_url: &str, anon_key: &str, access_token: Option<String>) -> Gateway {
        debug!("Initializing gateway client for {}...", base_url);
        let mut client = Client::new(base_url, anon_key);
        client.set_access_token(access_token);
        Gateway { client }
    }

    /// Returns the current access token, for persisting across runs.
    ///
    pub fn access_token(&self) -> Option<&str> {
        self.client.access_token()
    }

    /// Returns whether a session token is held. The token may still be
    /// expired; `me` is the authoritative check.
    ///
    pub fn has_access_token(&self) -> bool {
        self.client.access_token().is_some()
    }

    /// Returns the profile of the signed-in user, resolving the token to an
    /// identity and then to a profile row.
    ///
    pub async fn me(&self) -> Result<User> {
        debug!("Requesting authenticated user details...");

        let identity = self.client.auth_user().await?;
        self.profile(&identity.id, identity.email).await
    }

    /// Exchanges credentials for a session token, stores it, and returns the
    /// signed-in user's profile.
    ///
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<User> {
        debug!("Signing in {}...", email);

        let session = self.client.auth_sign_in(email, password).await?;
        self.client.set_access_token(Some(session.access_token));
        self.profile(&session.user.id, session.user.email).await
    }

    /// Revokes and drops the session token. The token is dropped even when
    /// revocation fails; a token the server rejects is useless either way.
    ///
    pub async fn sign_out(&mut self) -> Result<()> {
        debug!("Signing out...");

        let revoked = self.client.auth_sign_out().await;
        self.client.set_access_token(None);
        if let Err(e) = revoked {
            warn!("Token revocation failed, discarding token anyway: {}", e);
        }
        Ok(())
    }

    /// Requests a password recovery email for the address.
    ///
    pub async fn reset_password(&self, email: &str) -> Result<()> {
        debug!("Requesting password recovery for {}...", email);

        self.client.auth_recover(email).await?;
        Ok(())
    }

    /// Returns all mentors with their profile details, best-rated first.
    ///
    pub async fn mentors(&self) -> Result<Vec<Mentor>> {
        debug!("Requesting mentor directory...");

        let query = Query::new()
            .select(
                "id,expertise,bio,experience_years,languages,hourly_rate,\
                 average_rating,total_sessions,\
                 profiles!inner(full_name,email,avatar_url)",
            )
            .order("average_rating", false);
        let rows: Vec<MentorRow> = self.client.rows("mentors", &query).await?;

        debug!("Retrieved {} mentors", rows.len());
        Ok(rows.into_iter().map(mentor_from_row).collect())
    }

    /// Returns all of the student's sessions, newest first, with mentor
    /// names resolved through the embedded join.
    ///
    pub async fn sessions(&self, student_id: &str) -> Result<Vec<Session>> {
        debug!("Requesting sessions for student {}...", student_id);

        let query = Query::new()
            .select("*,mentor:mentors!inner(id,profiles!inner(full_name,avatar_url))")
            .eq("student_id", student_id)
            .order("scheduled_date", false);
        let rows: Vec<SessionRow> = self.client.rows("sessions", &query).await?;

        debug!("Retrieved {} sessions for student {}", rows.len(), student_id);
        Ok(rows.into_iter().map(session_from_row).collect())
    }

    /// Returns the total number of mentors without fetching any rows.
    ///
    pub async fn mentor_count(&self) -> Result<u64> {
        debug!("Requesting mentor count...");

        let count = self
            .client
            .count("mentors", &Query::new().select("id"))
            .await?;
        Ok(count)
    }

    /// Returns the student's five earliest-dated sessions, for the dashboard.
    ///
    pub async fn recent_sessions(&self, student_id: &str) -> Result<Vec<Session>> {
        debug!("Requesting recent sessions for student {}...", student_id);

        let query = Query::new()
            .select("*,mentor:mentors!inner(id,profiles!inner(full_name,avatar_url))")
            .eq("student_id", student_id)
            .order("scheduled_date", true)
            .limit(5);
        let rows: Vec<SessionRow> = self.client.rows("sessions", &query).await?;

        Ok(rows.into_iter().map(session_from_row).collect())
    }

    /// Books a session. New sessions always start out `scheduled`.
    ///
    pub async fn book_session(&self, new: &NewSession) -> Result<()> {
        debug!(
            "Booking session with mentor {} on {}...",
            new.mentor_id, new.scheduled_date
        );

        self.client
            .insert(
                "sessions",
                serde_json::json!({
                    "student_id": new.student_id,
                    "mentor_id": new.mentor_id,
                    "topic": new.topic,
                    "scheduled_date": new.scheduled_date,
                    "scheduled_time": new.scheduled_time,
                    "additional_notes": new.additional_notes,
                    "status": "scheduled",
                }),
            )
            .await?;
        Ok(())
    }

    /// Records post-session feedback.
    ///
    pub async fn submit_feedback(&self, new: &NewFeedback) -> Result<()> {
        debug!(
            "Submitting feedback for session {} (rating {})...",
            new.session_id, new.rating
        );

        self.client
            .insert(
                "feedback",
                serde_json::json!({
                    "session_id": new.session_id,
                    "student_id": new.student_id,
                    "mentor_id": new.mentor_id,
                    "rating": new.rating,
                    "comment": new.comment,
                }),
            )
            .await?;
        Ok(())
    }

    /// Fetch and shape the profile row for an identity.
    ///
    async fn profile(&self, user_id: &str, email: Option<String>) -> Result<User> {
        let query = Query::new()
            .select("id,full_name,email,role,avatar_url")
            .eq("id", user_id);
        let mut rows: Vec<ProfileRow> = self.client.rows("profiles", &query).await?;

        let row = match rows.pop() {
            Some(row) => row,
            None => anyhow::bail!("No profile found for user {}", user_id),
        };

        Ok(User {
            id: row.id,
            email: row.email.or(email).unwrap_or_default(),
            full_name: row.full_name,
            role: row.role,
            avatar_url: row.avatar_url,
        })
    }
}

fn mentor_from_row(row: MentorRow) -> Mentor {
    Mentor {
        id: row.id,
        full_name: row.profiles.full_name,
        email: row.profiles.email.unwrap_or_default(),
        avatar_url: row.profiles.avatar_url,
        expertise: row.expertise.unwrap_or_default(),
        bio: row.bio.unwrap_or_default(),
        experience_years: row.experience_years.unwrap_or_default(),
        languages: row.languages.unwrap_or_default(),
        hourly_rate: row.hourly_rate,
        average_rating: row.average_rating.unwrap_or_default(),
        total_sessions: row.total_sessions.unwrap_or_default(),
    }
}

fn session_from_row(row: SessionRow) -> Session {
    let (mentor_name, mentor_avatar) = match row.mentor {
        Some(join) => (join.profiles.full_name, join.profiles.avatar_url),
        None => (String::new(), None),
    };
    Session {
        id: row.id,
        student_id: row.student_id,
        mentor_id: row.mentor_id,
        mentor_name,
        mentor_avatar,
        topic: row.topic,
        scheduled_date: row.scheduled_date,
        scheduled_time: row.scheduled_time,
        duration_minutes: row.duration_minutes.unwrap_or(60),
        status: row.status,
        additional_notes: row.additional_notes,
        created_at: row.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::uuid::UUIDv4;
    use fake::{Fake, Faker};
    use httpmock::MockServer;
    use serde_json::json;
    use uuid::Uuid;

    fn gateway_for(server: &MockServer, token: Option<String>) -> Gateway {
        let mut client = Client::new(&server.base_url(), "anon-key");
        client.set_access_token(token);
        Gateway { client }
    }

    #[tokio::test]
    async fn me_success() -> Result<()> {
        let token: Uuid = UUIDv4.fake();
        let user: User = Faker.fake();

        let server = MockServer::start();
        let identity_mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/auth/v1/user")
                    .header("apikey", "anon-key")
                    .header("Authorization", &format!("Bearer {}", &token));
                then.status(200)
                    .json_body(json!({ "id": user.id, "email": user.email }));
            })
            .await;
        let profile_mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/rest/v1/profiles")
                    .query_param("id", &format!("eq.{}", user.id))
                    .query_param("select", "id,full_name,email,role,avatar_url");
                then.status(200).json_body(json!([{
                    "id": user.id,
                    "full_name": user.full_name,
                    "email": user.email,
                    "role": "student",
                    "avatar_url": null,
                }]));
            })
            .await;

        let gateway = gateway_for(&server, Some(token.to_string()));
        let me = gateway.me().await?;
        assert_eq!(me.full_name, user.full_name);
        assert_eq!(me.role, Role::Student);
        identity_mock.assert_async().await;
        profile_mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn me_unauthorized() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/auth/v1/user");
                then.status(401);
            })
            .await;

        let gateway = gateway_for(&server, Some("stale-token".to_owned()));
        assert!(gateway.me().await.is_err());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn sign_in_success() -> Result<()> {
        let token: Uuid = UUIDv4.fake();
        let user: User = Faker.fake();

        let server = MockServer::start();
        let token_mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/auth/v1/token")
                    .query_param("grant_type", "password")
                    .header("apikey", "anon-key")
                    .json_body(json!({
                        "email": user.email,
                        "password": "hunter2",
                    }));
                then.status(200).json_body(json!({
                    "access_token": token.to_string(),
                    "user": { "id": user.id, "email": user.email },
                }));
            })
            .await;
        let profile_mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/rest/v1/profiles")
                    .header("Authorization", &format!("Bearer {}", &token));
                then.status(200).json_body(json!([{
                    "id": user.id,
                    "full_name": user.full_name,
                    "email": user.email,
                    "role": "student",
                }]));
            })
            .await;

        let mut gateway = gateway_for(&server, None);
        let me = gateway.sign_in(&user.email, "hunter2").await?;
        assert_eq!(me.id, user.id);
        assert_eq!(gateway.access_token(), Some(token.to_string().as_str()));
        token_mock.assert_async().await;
        profile_mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn sign_in_bad_credentials() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/auth/v1/token");
                then.status(400)
                    .json_body(json!({ "error_description": "Invalid login credentials" }));
            })
            .await;

        let mut gateway = gateway_for(&server, None);
        assert!(gateway.sign_in("a@b.c", "wrong").await.is_err());
        assert!(!gateway.has_access_token());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn sign_out_drops_token_even_on_failure() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/auth/v1/logout");
                then.status(500);
            })
            .await;

        let mut gateway = gateway_for(&server, Some("some-token".to_owned()));
        gateway.sign_out().await?;
        assert!(!gateway.has_access_token());
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn reset_password_success() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/auth/v1/recover")
                    .json_body(json!({ "email": "student@example.com" }));
                then.status(200).json_body(json!({}));
            })
            .await;

        let gateway = gateway_for(&server, None);
        gateway.reset_password("student@example.com").await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn mentors_success() -> Result<()> {
        let token: Uuid = UUIDv4.fake();
        let mentors: [Mentor; 2] = Faker.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/rest/v1/mentors")
                    .header("Authorization", &format!("Bearer {}", &token))
                    .query_param("order", "average_rating.desc");
                then.status(200).json_body(json!([
                    {
                        "id": mentors[0].id,
                        "expertise": mentors[0].expertise,
                        "bio": mentors[0].bio,
                        "experience_years": mentors[0].experience_years,
                        "languages": mentors[0].languages,
                        "hourly_rate": mentors[0].hourly_rate,
                        "average_rating": mentors[0].average_rating,
                        "total_sessions": mentors[0].total_sessions,
                        "profiles": {
                            "full_name": mentors[0].full_name,
                            "email": mentors[0].email,
                            "avatar_url": mentors[0].avatar_url,
                        },
                    },
                    {
                        "id": mentors[1].id,
                        "profiles": { "full_name": mentors[1].full_name },
                    },
                ]));
            })
            .await;

        let gateway = gateway_for(&server, Some(token.to_string()));
        let fetched = gateway.mentors().await?;
        assert_eq!(fetched.len(), 2);
        assert_eq!(fetched[0].full_name, mentors[0].full_name);
        // Sparse rows decode with neutral defaults.
        assert_eq!(fetched[1].expertise, Vec::<String>::new());
        assert_eq!(fetched[1].average_rating, 0.0);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn mentors_server_error() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/rest/v1/mentors");
                then.status(500);
            })
            .await;

        let gateway = gateway_for(&server, None);
        assert!(gateway.mentors().await.is_err());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn sessions_success() -> Result<()> {
        let student: Uuid = UUIDv4.fake();
        let session: Session = Faker.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/rest/v1/sessions")
                    .query_param("student_id", &format!("eq.{}", student))
                    .query_param("order", "scheduled_date.desc");
                then.status(200).json_body(json!([{
                    "id": session.id,
                    "student_id": student.to_string(),
                    "mentor_id": session.mentor_id,
                    "topic": session.topic,
                    "scheduled_date": session.scheduled_date,
                    "scheduled_time": session.scheduled_time,
                    "duration_minutes": session.duration_minutes,
                    "status": "completed",
                    "mentor": {
                        "id": session.mentor_id,
                        "profiles": { "full_name": session.mentor_name },
                    },
                }]));
            })
            .await;

        let gateway = gateway_for(&server, None);
        let fetched = gateway.sessions(&student.to_string()).await?;
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].mentor_name, session.mentor_name);
        assert_eq!(fetched[0].status, SessionStatus::Completed);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn mentor_count_parses_content_range() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("HEAD")
                    .path("/rest/v1/mentors")
                    .header("Prefer", "count=exact");
                then.status(200).header("Content-Range", "0-0/42");
            })
            .await;

        let gateway = gateway_for(&server, None);
        assert_eq!(gateway.mentor_count().await?, 42);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn mentor_count_missing_header() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("HEAD").path("/rest/v1/mentors");
                then.status(200);
            })
            .await;

        let gateway = gateway_for(&server, None);
        assert!(gateway.mentor_count().await.is_err());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn recent_sessions_requests_five_ascending() -> Result<()> {
        let student: Uuid = UUIDv4.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/rest/v1/sessions")
                    .query_param("student_id", &format!("eq.{}", student))
                    .query_param("order", "scheduled_date.asc")
                    .query_param("limit", "5");
                then.status(200).json_body(json!([]));
            })
            .await;

        let gateway = gateway_for(&server, None);
        assert!(gateway.recent_sessions(&student.to_string()).await?.is_empty());
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn book_session_success() -> Result<()> {
        let new: NewSession = Faker.fake();

        let server = MockServer::start();
        let body = json!({
            "student_id": new.student_id,
            "mentor_id": new.mentor_id,
            "topic": new.topic,
            "scheduled_date": new.scheduled_date,
            "scheduled_time": new.scheduled_time,
            "additional_notes": new.additional_notes,
            "status": "scheduled",
        });
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/rest/v1/sessions")
                    .header("Prefer", "return=minimal")
                    .json_body(body.clone());
                then.status(201);
            })
            .await;

        let gateway = gateway_for(&server, None);
        gateway.book_session(&new).await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn submit_feedback_rejected() {
        let new: NewFeedback = Faker.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/rest/v1/feedback");
                then.status(403)
                    .json_body(json!({ "message": "row-level security" }));
            })
            .await;

        let gateway = gateway_for(&server, None);
        assert!(gateway.submit_feedback(&new).await.is_err());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn submit_feedback_success() -> Result<()> {
        let new: NewFeedback = Faker.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/rest/v1/feedback")
                    .json_body(json!({
                        "session_id": new.session_id,
                        "student_id": new.student_id,
                        "mentor_id": new.mentor_id,
                        "rating": new.rating,
                        "comment": new.comment,
                    }));
                then.status(201);
            })
            .await;

        let gateway = gateway_for(&server, None);
        gateway.submit_feedback(&new).await?;
        mock.assert_async().await;
        Ok(())
    }
}
