use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("No active session")]
    MissingSession,

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error {status}: {}", message.as_deref().unwrap_or("<no message>"))]
    Api { status: u16, message: Option<String> },

    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Session storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Session storage migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Request cancelled")]
    Cancelled,
}

impl ClientError {
    /// Text to surface in an alert. Application errors carry the server's
    /// message verbatim; everything else falls back to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ClientError::Validation(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_is_shown_verbatim() {
        let err = ClientError::Api {
            status: 400,
            message: Some("정원이 가득 찼습니다.".to_string()),
        };
        assert_eq!(err.user_message("수강신청에 실패했습니다."), "정원이 가득 찼습니다.");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn blank_or_missing_message_uses_fallback() {
        let blank = ClientError::Api {
            status: 500,
            message: Some("  ".to_string()),
        };
        let missing = ClientError::Api {
            status: 500,
            message: None,
        };
        assert_eq!(blank.user_message("fallback"), "fallback");
        assert_eq!(missing.user_message("fallback"), "fallback");
        assert_eq!(ClientError::Cancelled.user_message("fallback"), "fallback");
    }
}
