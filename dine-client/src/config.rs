//! Client configuration

use shared::response::DEFAULT_PAGE_SIZE;

/// Client configuration for connecting to the restaurant API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://127.0.0.1:8000/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Page size for paginated lists
    pub page_size: u32,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Load from environment variables
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | DINE_API_URL | http://127.0.0.1:8000/api |
    /// | DINE_TIMEOUT_SECS | 30 |
    /// | DINE_PAGE_SIZE | 10 |
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("DINE_API_URL") {
            config.base_url = url;
        }
        if let Some(timeout) = std::env::var("DINE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout = timeout;
        }
        if let Some(size) = std::env::var("DINE_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|s: &u32| *s > 0)
        {
            config.page_size = size;
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://127.0.0.1:8000/api")
    }
}
