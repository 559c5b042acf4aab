pub const INVALID_FILE_MESSAGE: &str = "Please select a valid image file";
pub const NO_FILE_MESSAGE: &str = "Please select an image first";
pub const PREDICTION_FAILED_MESSAGE: &str = "Prediction failed";
pub const CONNECT_FAILED_MESSAGE: &str =
    "Failed to connect to server. Make sure the backend is running.";

/// Every failure the upload session can surface. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("{}", INVALID_FILE_MESSAGE)]
    InvalidFileType { mime: String },

    #[error("{}", NO_FILE_MESSAGE)]
    NoFileSelected,

    /// The service answered but reported a failure
    #[error("{}", .message.as_deref().unwrap_or(PREDICTION_FAILED_MESSAGE))]
    Service { message: Option<String> },

    /// No usable answer: refused, timed out, or an HTTP error status
    #[error("{}", .message.as_deref().unwrap_or(CONNECT_FAILED_MESSAGE))]
    Transport { message: Option<String> },

    #[error("A prediction is already running")]
    Busy,
}

impl SessionError {
    pub fn service(message: Option<String>) -> Self {
        SessionError::Service {
            message: non_empty(message),
        }
    }

    pub fn transport(message: Option<String>) -> Self {
        SessionError::Transport {
            message: non_empty(message),
        }
    }
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_messages() {
        assert_eq!(SessionError::service(None).to_string(), "Prediction failed");
        assert_eq!(
            SessionError::transport(None).to_string(),
            "Failed to connect to server. Make sure the backend is running."
        );
    }

    #[test]
    fn test_empty_server_message_falls_back() {
        assert_eq!(
            SessionError::service(Some(String::new())).to_string(),
            PREDICTION_FAILED_MESSAGE
        );
        assert_eq!(
            SessionError::transport(Some(" ".to_string())).to_string(),
            CONNECT_FAILED_MESSAGE
        );
    }

    #[test]
    fn test_server_message_wins() {
        let err = SessionError::transport(Some("Model not loaded".to_string()));
        assert_eq!(err.to_string(), "Model not loaded");
    }
}
