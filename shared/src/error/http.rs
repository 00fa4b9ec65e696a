//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the HTTP status code this error corresponds to
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound
            | Self::OrderNotFound
            | Self::DishNotFound
            | Self::TableNotFound
            | Self::FloorNotFound
            | Self::MessNotFound
            | Self::CreditUserNotFound => StatusCode::NOT_FOUND,

            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::SessionExpired => StatusCode::UNAUTHORIZED,

            Self::PermissionDenied | Self::RoleRequired => StatusCode::FORBIDDEN,

            Self::InternalError
            | Self::Unknown
            | Self::PrintFailed
            | Self::StorageError => StatusCode::INTERNAL_SERVER_ERROR,

            Self::NetworkError => StatusCode::BAD_GATEWAY,

            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Best-effort code for an HTTP status returned by the API
    pub fn from_http_status(status: StatusCode) -> Self {
        match status {
            s if s.is_success() => Self::Success,
            StatusCode::BAD_REQUEST => Self::ValidationFailed,
            StatusCode::UNAUTHORIZED => Self::NotAuthenticated,
            StatusCode::FORBIDDEN => Self::PermissionDenied,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                Self::NetworkError
            }
            _ => Self::InternalError,
        }
    }
}
