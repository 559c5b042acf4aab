use leafscan_core::SessionError;
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Service error: {}", .message.as_deref().unwrap_or("no message"))]
    Service { message: Option<String> },
}

impl ClientError {
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Transport(_) => None,
            ClientError::Rejected { message, .. } | ClientError::Service { message } => {
                message.as_deref()
            }
        }
    }
}

/// An error status counts as a connection failure that may carry the
/// server's `message`; a 2xx body saying "not success" is a service failure.
impl From<ClientError> for SessionError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Transport(_) => SessionError::transport(None),
            ClientError::Rejected { message, .. } => SessionError::transport(message),
            ClientError::Service { message } => SessionError::service(message),
        }
    }
}
