//! Error types for chatline.

use thiserror::Error;

/// Main error type for chatline operations.
#[derive(Error, Debug)]
pub enum ChatlineError {
    /// History fetch failed; callers recover with an empty conversation.
    #[error("history unavailable: {0}")]
    HistoryUnavailable(String),

    /// Chat call failed or returned a non-success status.
    #[error("exchange failed: {0}")]
    ExchangeFailed(String),

    /// Session deletion call failed; local reset proceeds regardless.
    #[error("session reset failed: {0}")]
    ResetFailed(String),

    /// Stored or supplied session token is not usable.
    #[error("invalid session token: {0:?}")]
    InvalidToken(String),

    /// HTTP client construction or transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type for chatline operations.
pub type Result<T> = std::result::Result<T, ChatlineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_unavailable_display() {
        let err = ChatlineError::HistoryUnavailable("connection refused".into());
        assert!(err.to_string().contains("history unavailable"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_exchange_failed_display() {
        let err = ChatlineError::ExchangeFailed("status 502".into());
        assert!(err.to_string().contains("exchange failed"));
        assert!(err.to_string().contains("status 502"));
    }

    #[test]
    fn test_reset_failed_display() {
        let err = ChatlineError::ResetFailed("status 500".into());
        assert!(err.to_string().contains("reset failed"));
    }

    #[test]
    fn test_invalid_token_display() {
        let err = ChatlineError::InvalidToken("  ".into());
        assert!(err.to_string().contains("invalid session token"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ChatlineError = io_err.into();
        assert!(matches!(err, ChatlineError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }
}
