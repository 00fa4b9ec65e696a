//! Dine Client - REST client and page controllers for the restaurant API
//!
//! [`DineClient`] wraps an [`HttpClient`] and the shared [`SessionHandle`];
//! endpoint groups live in [`api`], screen logic in [`pages`].

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod pages;
pub mod receipt;
pub mod session;

pub use api::DineClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use session::{Session, SessionHandle, SessionStore};

// Re-export shared types for convenience
pub use shared::client::{LoginResponse, Role, Route, UserInfo};
