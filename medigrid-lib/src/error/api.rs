//! API error types

/// Message the backend returns when a request is made without a valid
/// session. A fetch failing with this message must redirect the user to
/// the application root.
pub const AUTH_REJECTION_MESSAGE: &str =
    "You are not authorized! Please log in to access this resource.";

/// Errors that can occur while fetching a page of grid data.
///
/// No variant is retried automatically: every failure is terminal for
/// that request and must be re-triggered by the user.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP error response from the API.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message, taken from the body's `message` field when the
        /// body is a JSON object.
        message: String,
    },

    /// Network error during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to decode the response body.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` when the failure is an authentication rejection.
    ///
    /// Matches a 401 status or the documented rejection message; this is
    /// the one failure that triggers a redirect to the application root.
    pub fn is_auth_rejection(&self) -> bool {
        match self {
            Self::Http { status, message } => {
                *status == 401 || message == AUTH_REJECTION_MESSAGE
            }
            _ => false,
        }
    }
}
