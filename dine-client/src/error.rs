//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Access token rejected as invalid or expired
    #[error("Session expired, please log in again")]
    TokenExpired,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (HTTP 400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Rejected before any request was sent
    #[error(transparent)]
    App(#[from] AppError),

    /// Receipt could not be printed
    #[error("Print failed: {0}")]
    Print(#[from] dine_printer::PrintError),

    /// Session file could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ClientError {
    /// Unified error code for display and logging
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(_) => ErrorCode::NetworkError,
            Self::InvalidResponse(_) | Self::Serialization(_) | Self::Internal(_) => {
                ErrorCode::InternalError
            }
            Self::Unauthorized(_) => ErrorCode::NotAuthenticated,
            Self::TokenExpired => ErrorCode::TokenExpired,
            Self::Forbidden(_) => ErrorCode::PermissionDenied,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::App(e) => e.code,
            Self::Print(_) => ErrorCode::PrintFailed,
            Self::Storage(_) => ErrorCode::StorageError,
        }
    }

    pub fn is_token_expired(&self) -> bool {
        matches!(self, Self::TokenExpired)
            || matches!(self, Self::App(e) if e.code == ErrorCode::SessionExpired)
    }

    /// Declined confirmation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::App(e) if e.is_cancelled())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ClientError::TokenExpired.code(), ErrorCode::TokenExpired);
        assert_eq!(
            ClientError::Validation("bad".into()).code(),
            ErrorCode::ValidationFailed
        );
        let app: ClientError = AppError::new(ErrorCode::OrderEmpty).into();
        assert_eq!(app.code(), ErrorCode::OrderEmpty);
    }

    #[test]
    fn test_session_expired_counts_as_token_expired() {
        assert!(ClientError::TokenExpired.is_token_expired());
        assert!(ClientError::App(AppError::session_expired()).is_token_expired());
        assert!(!ClientError::NotFound("x".into()).is_token_expired());
        assert!(ClientError::App(AppError::cancelled()).is_cancelled());
    }
}
