//! Form editing state types.
//!
//! This module contains the field enums for the sign-in, booking, and
//! feedback forms, and the session list filter.

use crate::gateway::SessionStatus;

/// Specifying which landing-screen form is shown.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AuthMode {
    SignIn,
    ResetPassword,
}

/// Specifying sign-in form field state.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AuthField {
    Email,
    Password,
}

/// Specifying booking form field state.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BookingField {
    Topic,
    Date,
    Time,
    Notes,
}

impl BookingField {
    /// Return the next field in tab order, wrapping.
    ///
    pub fn next(&self) -> BookingField {
        match self {
            BookingField::Topic => BookingField::Date,
            BookingField::Date => BookingField::Time,
            BookingField::Time => BookingField::Notes,
            BookingField::Notes => BookingField::Topic,
        }
    }
}

/// Specifying feedback form field state.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FeedbackField {
    Rating,
    Comment,
}

/// Specifying session list filter options.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SessionFilter {
    All,
    Status(SessionStatus),
}

impl SessionFilter {
    /// Return the next filter in cycle order.
    ///
    pub fn next(&self) -> SessionFilter {
        match self {
            SessionFilter::All => SessionFilter::Status(SessionStatus::Scheduled),
            SessionFilter::Status(SessionStatus::Scheduled) => {
                SessionFilter::Status(SessionStatus::Completed)
            }
            SessionFilter::Status(SessionStatus::Completed) => {
                SessionFilter::Status(SessionStatus::Cancelled)
            }
            SessionFilter::Status(_) => SessionFilter::All,
        }
    }

    /// Return the display label for the filter.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            SessionFilter::All => "All",
            SessionFilter::Status(status) => status.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_mode() {
        assert_eq!(AuthMode::SignIn, AuthMode::SignIn);
        assert_ne!(AuthMode::SignIn, AuthMode::ResetPassword);
    }

    #[test]
    fn test_booking_field_tab_order_wraps() {
        let mut field = BookingField::Topic;
        for expected in [
            BookingField::Date,
            BookingField::Time,
            BookingField::Notes,
            BookingField::Topic,
        ] {
            field = field.next();
            assert_eq!(field, expected);
        }
    }

    #[test]
    fn test_session_filter_cycle_returns_to_all() {
        let mut filter = SessionFilter::All;
        filter = filter.next();
        assert_eq!(filter, SessionFilter::Status(SessionStatus::Scheduled));
        filter = filter.next();
        assert_eq!(filter, SessionFilter::Status(SessionStatus::Completed));
        filter = filter.next();
        assert_eq!(filter, SessionFilter::Status(SessionStatus::Cancelled));
        filter = filter.next();
        assert_eq!(filter, SessionFilter::All);
    }

    #[test]
    fn test_session_filter_labels() {
        assert_eq!(SessionFilter::All.label(), "All");
        assert_eq!(
            SessionFilter::Status(SessionStatus::Scheduled).label(),
            "Scheduled"
        );
    }
}
