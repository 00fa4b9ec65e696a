//! Endpoint groups of the restaurant API
//!
//! Every group is an `impl` block on [`DineClient`] in its own module.

mod auth;
mod billing;
mod catalog;
mod credit;
mod delivery;
mod mess;
mod notifications;
mod orders;
mod reports;
mod tables;

pub use delivery::DriverToggle;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::session::{SessionHandle, SessionStore};
use serde::Serialize;

/// API client bound to a session
#[derive(Debug, Clone)]
pub struct DineClient<C: HttpClient = NetworkHttpClient> {
    http: C,
    store: Option<SessionStore>,
    page_size: u32,
}

impl DineClient<NetworkHttpClient> {
    pub fn new(config: &ClientConfig, session: SessionHandle) -> ClientResult<Self> {
        Ok(Self::with_http(
            NetworkHttpClient::new(config, session)?,
            config.page_size,
        ))
    }
}

impl<C: HttpClient> DineClient<C> {
    pub fn with_http(http: C, page_size: u32) -> Self {
        Self {
            http,
            store: None,
            page_size: page_size.max(1),
        }
    }

    /// Persist the session to `store` on login and logout
    pub fn with_store(mut self, store: SessionStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn session(&self) -> &SessionHandle {
        self.http.session()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    async fn persist(&self) -> ClientResult<()> {
        if let Some(store) = &self.store {
            store.save(&self.session().snapshot().await).await?;
        }
        Ok(())
    }
}

/// `?page=` query
#[derive(Debug, Serialize)]
struct PageQuery {
    page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_size: Option<u32>,
}

/// `?time_range=` query
#[derive(Debug, Serialize)]
struct RangeQuery<'a> {
    time_range: &'a str,
}

/// Some list endpoints are paginated, some return a bare array
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum ListOrPage<T> {
    Plain(Vec<T>),
    Paged(shared::response::Paginated<T>),
}

impl<T> ListOrPage<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Plain(v) => v,
            Self::Paged(p) => p.results,
        }
    }
}
