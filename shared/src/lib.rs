//! Shared types for the dine workspace
//!
//! API records, the paginated envelope, auth DTOs, unified errors and the
//! client-side form logic that runs before a request leaves the terminal.

pub mod bills;
pub mod client;
pub mod error;
pub mod membership;
pub mod models;
pub mod order;
pub mod response;
pub mod util;

// Re-exports
pub use http;
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use response::{DataEnvelope, Paginated, Pager};
