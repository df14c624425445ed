//! Navigation-related state types.
//!
//! This module contains enums and types related to navigation, screens, and
//! focus, plus the single place where override state is resolved into the
//! screen to draw.

/// Specifying the different foci.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Focus {
    Menu,
    View,
}

/// Specifying the sidebar menu entries.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Page {
    Home,
    Mentors,
    Sessions,
    Feedback,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Mentors, Page::Sessions, Page::Feedback];

    /// Return the sidebar label for the page.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Dashboard",
            Page::Mentors => "Find Mentors",
            Page::Sessions => "My Sessions",
            Page::Feedback => "Feedback",
        }
    }
}

/// The session a feedback form is being filled in for.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PendingFeedback {
    pub session_id: String,
    pub mentor_id: String,
    pub mentor_name: String,
    pub topic: String,
}

/// Specifying the different screens. Exactly one renders at a time; override
/// state (a feedback target, a selected mentor) takes precedence over the
/// sidebar page, in that order, so stale combinations cannot draw.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Screen {
    Dashboard,
    MentorDirectory,
    MentorProfile,
    SessionList,
    FeedbackForm,
}

impl Screen {
    /// Resolve the screen to draw from the navigation fields.
    ///
    pub fn resolve(
        pending_feedback: Option<&PendingFeedback>,
        mentor_selected: bool,
        page: Page,
    ) -> Screen {
        if pending_feedback.is_some() {
            return Screen::FeedbackForm;
        }
        if mentor_selected {
            return Screen::MentorProfile;
        }
        match page {
            Page::Home => Screen::Dashboard,
            Page::Mentors => Screen::MentorDirectory,
            Page::Sessions => Screen::SessionList,
            Page::Feedback => Screen::FeedbackForm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> PendingFeedback {
        PendingFeedback {
            session_id: "s1".to_string(),
            mentor_id: "m1".to_string(),
            mentor_name: "Dana".to_string(),
            topic: "Systems design".to_string(),
        }
    }

    #[test]
    fn test_focus() {
        assert_eq!(Focus::Menu, Focus::Menu);
        assert_ne!(Focus::Menu, Focus::View);
    }

    #[test]
    fn test_page_labels() {
        assert_eq!(Page::Home.label(), "Dashboard");
        assert_eq!(Page::Mentors.label(), "Find Mentors");
        assert_eq!(Page::Sessions.label(), "My Sessions");
        assert_eq!(Page::Feedback.label(), "Feedback");
        assert_eq!(Page::ALL.len(), 4);
    }

    #[test]
    fn test_resolve_follows_page_without_overrides() {
        assert_eq!(Screen::resolve(None, false, Page::Home), Screen::Dashboard);
        assert_eq!(
            Screen::resolve(None, false, Page::Mentors),
            Screen::MentorDirectory
        );
        assert_eq!(
            Screen::resolve(None, false, Page::Sessions),
            Screen::SessionList
        );
        assert_eq!(
            Screen::resolve(None, false, Page::Feedback),
            Screen::FeedbackForm
        );
    }

    #[test]
    fn test_resolve_selected_mentor_overrides_page() {
        for page in Page::ALL {
            assert_eq!(Screen::resolve(None, true, page), Screen::MentorProfile);
        }
    }

    #[test]
    fn test_resolve_pending_feedback_overrides_everything() {
        let p = pending();
        for page in Page::ALL {
            assert_eq!(Screen::resolve(Some(&p), true, page), Screen::FeedbackForm);
            assert_eq!(Screen::resolve(Some(&p), false, page), Screen::FeedbackForm);
        }
    }
}
