use thiserror::Error;

/// Generic text shown when the backend cannot be reached
pub const CONNECTIVITY_MESSAGE: &str =
    "Could not reach the travel service. Check your connection and that the backend is running.";

/// Generic text shown for responses the client could not understand
pub const UNEXPECTED_MESSAGE: &str = "Something went wrong. Please try again.";

/// Trip assistant errors
#[derive(Error, Debug)]
pub enum TripError {
    /// Input rejected before any request was issued
    #[error("Validation Error: {0}")]
    Validation(String),

    /// Connect, timeout or body transfer failure
    #[error("Transport Error: {0}")]
    Transport(String),

    /// The server answered with a failure; `detail` is its message verbatim
    #[error("HTTP Error: {status_code} - {detail}")]
    Server { status_code: u16, detail: String },

    #[error("Parsing Error: {0}")]
    Parse(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Storage Error: {0}")]
    Storage(String),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TripError {
    pub fn is_validation(&self) -> bool {
        matches!(self, TripError::Validation(_))
    }

    /// Text suitable for showing to the user.
    ///
    /// Validation and server errors are surfaced as-is, transport problems
    /// collapse into a connectivity message and anything unexpected into a
    /// generic failure.
    pub fn user_message(&self) -> String {
        match self {
            TripError::Validation(msg) => msg.clone(),
            TripError::Server { detail, .. } => detail.clone(),
            TripError::Transport(_) => CONNECTIVITY_MESSAGE.to_string(),
            TripError::Config(msg) | TripError::Storage(msg) => msg.clone(),
            TripError::Parse(_) | TripError::Serde(_) | TripError::Io(_) => {
                UNEXPECTED_MESSAGE.to_string()
            }
        }
    }
}

/// Result type for trip assistant operations
pub type TripResult<T> = Result<T, TripError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_per_category() {
        let validation = TripError::Validation("Please enter a destination".to_string());
        assert_eq!(validation.user_message(), "Please enter a destination");
        assert!(validation.is_validation());

        let server = TripError::Server {
            status_code: 404,
            detail: "Trip not found".to_string(),
        };
        assert_eq!(server.user_message(), "Trip not found");
        assert!(!server.is_validation());

        let transport = TripError::Transport("connection refused".to_string());
        assert_eq!(transport.user_message(), CONNECTIVITY_MESSAGE);

        let parse = TripError::Parse("expected value at line 1".to_string());
        assert_eq!(parse.user_message(), UNEXPECTED_MESSAGE);
    }
}
