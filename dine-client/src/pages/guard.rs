//! Error boundary for page actions

use crate::error::{ClientError, ClientResult};
use shared::error::ErrorCode;
use std::future::Future;
use tracing::{error, warn};

pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";
pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

/// Message shown to the operator for a failed action
///
/// Client-side validation keeps its own message; server and transport
/// failures collapse into a generic alert.
pub fn user_message(err: &ClientError) -> String {
    match err {
        e if e.is_token_expired() => SESSION_EXPIRED.to_string(),
        ClientError::App(e) if e.code == ErrorCode::Cancelled => "Cancelled".to_string(),
        ClientError::App(e) => e.message.clone(),
        ClientError::Forbidden(_) => "You do not have permission to do that.".to_string(),
        ClientError::NotFound(_) => "Not found.".to_string(),
        ClientError::Print(e) => format!("Printing failed: {e}"),
        _ => GENERIC_ERROR.to_string(),
    }
}

/// Run an action, logging its failure and turning it into a display message
pub async fn guard<T, F>(action: F) -> Result<T, String>
where
    F: Future<Output = ClientResult<T>>,
{
    match action.await {
        Ok(v) => Ok(v),
        Err(e) => {
            if e.is_cancelled() {
                warn!("Action cancelled");
            } else {
                error!(code = %e.code(), error = %e, "Action failed");
            }
            Err(user_message(&e))
        }
    }
}
