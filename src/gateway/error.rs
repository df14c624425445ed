//! Remote data gateway error types.

/// Errors that can occur while talking to the remote store.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to deserialize API response
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Count query returned no usable Content-Range header
    #[error("Count query returned no usable Content-Range header")]
    MissingCount,

    /// Caller is not signed in
    #[error("Not signed in")]
    #[allow(dead_code)]
    NotSignedIn,

    /// Generic gateway error
    #[error("Gateway error: {0}")]
    #[allow(dead_code)]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_display() {
        let error = GatewayError::Api {
            status: 401,
            message: "Invalid login credentials".to_string(),
        };
        let error_str = error.to_string();
        assert!(error_str.contains("401"));
        assert!(error_str.contains("Invalid login credentials"));

        let error = GatewayError::MissingCount;
        assert!(error.to_string().contains("Content-Range"));

        let error = GatewayError::Other("Test error".to_string());
        assert!(error.to_string().contains("Gateway error"));
        assert!(error.to_string().contains("Test error"));
    }
}
