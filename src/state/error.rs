//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// User not set in state
    #[error("User not set in state")]
    #[allow(dead_code)]
    UserNotSet,

    /// Mentor not found in state
    #[error("Mentor not found: {id}")]
    #[allow(dead_code)]
    MentorNotFound { id: String },

    /// Session not found in state
    #[error("Session not found: {id}")]
    #[allow(dead_code)]
    SessionNotFound { id: String },

    /// Invalid screen transition
    #[error("Invalid screen transition: {0}")]
    #[allow(dead_code)]
    InvalidScreenTransition(String),

    /// Generic state error
    #[error("State error: {0}")]
    #[allow(dead_code)]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_error_display() {
        let error = StateError::UserNotSet;
        assert!(error.to_string().contains("User not set"));

        let error = StateError::MentorNotFound {
            id: "m-123".to_string(),
        };
        assert!(error.to_string().contains("Mentor not found"));
        assert!(error.to_string().contains("m-123"));

        let error = StateError::SessionNotFound {
            id: "s-456".to_string(),
        };
        assert!(error.to_string().contains("s-456"));

        let error = StateError::InvalidScreenTransition("Invalid".to_string());
        assert!(error.to_string().contains("Invalid screen transition"));

        let error = StateError::Other("Generic error".to_string());
        assert!(error.to_string().contains("State error"));
        assert!(error.to_string().contains("Generic error"));
    }
}
