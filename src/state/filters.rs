//! Pure filtering helpers for the mentor directory and session list.
//!
//! These are free functions over slices so they can be exercised (and
//! benchmarked) without a full application state.

use super::form::SessionFilter;
use crate::gateway::{Mentor, Session, SessionStatus};

/// Return the mentors matching both the text query and the expertise filter.
///
/// The query matches case-insensitively against name, bio, and expertise
/// tags; a blank query matches everything. The expertise filter requires
/// exact tag membership, with "all" as the no-op sentinel.
///
pub fn filter_mentors(mentors: &[Mentor], query: &str, expertise: &str) -> Vec<Mentor> {
    let query = query.trim().to_lowercase();
    mentors
        .iter()
        .filter(|mentor| {
            let matches_query = query.is_empty()
                || mentor.full_name.to_lowercase().contains(&query)
                || mentor.bio.to_lowercase().contains(&query)
                || mentor
                    .expertise
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&query));
            let matches_expertise =
                expertise == "all" || mentor.expertise.iter().any(|tag| tag == expertise);
            matches_query && matches_expertise
        })
        .cloned()
        .collect()
}

/// Return the expertise filter options for a directory: "all" followed by
/// every distinct tag in sorted order.
///
pub fn expertise_options(mentors: &[Mentor]) -> Vec<String> {
    let mut tags: Vec<String> = mentors
        .iter()
        .flat_map(|mentor| mentor.expertise.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();
    let mut options = vec!["all".to_string()];
    options.extend(tags);
    options
}

/// Return the sessions matching the status filter.
///
pub fn filter_sessions(sessions: &[Session], filter: SessionFilter) -> Vec<Session> {
    sessions
        .iter()
        .filter(|session| match filter {
            SessionFilter::All => true,
            SessionFilter::Status(status) => session.status == status,
        })
        .cloned()
        .collect()
}

/// Return the (upcoming, completed) counts over a page of sessions.
///
pub fn session_counts(sessions: &[Session]) -> (usize, usize) {
    let upcoming = sessions
        .iter()
        .filter(|s| s.status == SessionStatus::Scheduled)
        .count();
    let completed = sessions
        .iter()
        .filter(|s| s.status == SessionStatus::Completed)
        .count();
    (upcoming, completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    fn mentor(name: &str, bio: &str, tags: &[&str]) -> Mentor {
        Mentor {
            full_name: name.to_string(),
            bio: bio.to_string(),
            expertise: tags.iter().map(|t| t.to_string()).collect(),
            ..Faker.fake()
        }
    }

    fn session(status: SessionStatus) -> Session {
        Session {
            status,
            ..Faker.fake()
        }
    }

    #[test]
    fn test_blank_query_and_all_expertise_keep_everything() {
        let mentors = vec![
            mentor("Ada Lovelace", "Compilers", &["Rust"]),
            mentor("Grace Hopper", "Languages", &["COBOL"]),
        ];
        assert_eq!(filter_mentors(&mentors, "", "all"), mentors);
        assert_eq!(filter_mentors(&mentors, "   ", "all"), mentors);
    }

    #[test]
    fn test_query_matches_name_bio_and_tags_case_insensitively() {
        let mentors = vec![
            mentor("Ada Lovelace", "Writes compilers", &["Rust"]),
            mentor("Grace Hopper", "Language design", &["COBOL"]),
            mentor("Alan Kay", "Objects all the way down", &["Smalltalk"]),
        ];
        let by_name = filter_mentors(&mentors, "ADA", "all");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].full_name, "Ada Lovelace");

        let by_bio = filter_mentors(&mentors, "language", "all");
        assert_eq!(by_bio.len(), 1);
        assert_eq!(by_bio[0].full_name, "Grace Hopper");

        let by_tag = filter_mentors(&mentors, "smalltalk", "all");
        assert_eq!(by_tag.len(), 1);
        assert_eq!(by_tag[0].full_name, "Alan Kay");
    }

    #[test]
    fn test_expertise_filter_requires_exact_membership() {
        let mentors = vec![
            mentor("Ada", "", &["Rust", "Compilers"]),
            mentor("Grace", "", &["Rustacean Studies"]),
        ];
        let filtered = filter_mentors(&mentors, "", "Rust");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].full_name, "Ada");
    }

    #[test]
    fn test_query_and_expertise_combine_with_and() {
        let mentors = vec![
            mentor("Ada", "compilers", &["Rust"]),
            mentor("Grace", "compilers", &["COBOL"]),
        ];
        let filtered = filter_mentors(&mentors, "compilers", "Rust");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].full_name, "Ada");
    }

    #[test]
    fn test_filter_is_idempotent() {
        let mentors: Vec<Mentor> = (0..20).map(|_| Faker.fake()).collect();
        let once = filter_mentors(&mentors, "a", "all");
        let twice = filter_mentors(&once, "a", "all");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_expertise_options_start_with_all_and_dedupe() {
        let mentors = vec![
            mentor("Ada", "", &["Rust", "Compilers"]),
            mentor("Grace", "", &["Rust", "COBOL"]),
        ];
        assert_eq!(
            expertise_options(&mentors),
            vec!["all", "COBOL", "Compilers", "Rust"]
        );
    }

    #[test]
    fn test_filter_sessions_by_status() {
        let sessions = vec![
            session(SessionStatus::Scheduled),
            session(SessionStatus::Completed),
            session(SessionStatus::Completed),
            session(SessionStatus::Cancelled),
        ];
        assert_eq!(filter_sessions(&sessions, SessionFilter::All).len(), 4);
        assert_eq!(
            filter_sessions(&sessions, SessionFilter::Status(SessionStatus::Completed)).len(),
            2
        );
        assert_eq!(
            filter_sessions(&sessions, SessionFilter::Status(SessionStatus::Scheduled)).len(),
            1
        );
    }

    #[test]
    fn test_session_counts_ignore_cancelled_and_unknown() {
        let sessions = vec![
            session(SessionStatus::Scheduled),
            session(SessionStatus::Scheduled),
            session(SessionStatus::Completed),
            session(SessionStatus::Cancelled),
            session(SessionStatus::Unknown),
        ];
        assert_eq!(session_counts(&sessions), (2, 1));
    }
}
