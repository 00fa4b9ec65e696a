//! HTTP transport for the restaurant API

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionHandle;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::ErrorCode;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Message the API puts in its 401 body when the access token is stale
pub const TOKEN_EXPIRED_MESSAGE: &str = "Token is invalid or expired";
const TOKEN_NOT_VALID_CODE: &str = "token_not_valid";

/// HTTP client trait
///
/// Paths are relative to the API base URL (`orders/12/`).
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn get_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn delete(&self, path: &str) -> ClientResult<()>;
    fn session(&self) -> &SessionHandle;
}

/// reqwest-backed client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    session: SessionHandle,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig, session: SessionHandle) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let req = match self.session.access_token().await {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            debug!(
                %status,
                code = %ErrorCode::from_http_status(status),
                body = %text,
                "API error response"
            );
            return Err(match status {
                StatusCode::UNAUTHORIZED if is_token_expired_body(&text) => {
                    warn!("Access token rejected, flagging session");
                    self.session.mark_token_expired().await;
                    ClientError::TokenExpired
                }
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized(text),
                StatusCode::FORBIDDEN => ClientError::Forbidden(text),
                StatusCode::NOT_FOUND => ClientError::NotFound(text),
                StatusCode::BAD_REQUEST => ClientError::Validation(text),
                _ => ClientError::Internal(format!("{status}: {text}")),
            });
        }

        // 204 and empty bodies decode as null
        let body = if text.trim().is_empty() { "null" } else { &text };
        serde_json::from_str(body)
            .map_err(|e| ClientError::InvalidResponse(format!("{e} in {status} response")))
    }
}

/// Recognize the token-expired 401 body
///
/// `{"code": "token_not_valid", "messages": [{"message": "Token is invalid or expired"}]}`
pub fn is_token_expired_body(body: &str) -> bool {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return false;
    };
    let by_message = value
        .get("messages")
        .and_then(|m| m.get(0))
        .and_then(|m| m.get("message"))
        .and_then(|m| m.as_str())
        == Some(TOKEN_EXPIRED_MESSAGE);
    let by_code = value.get("code").and_then(|c| c.as_str()) == Some(TOKEN_NOT_VALID_CODE);
    by_message || by_code
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    #[instrument(skip(self))]
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.client.get(self.url(path))).await
    }

    #[instrument(skip(self, query))]
    async fn get_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        self.send(self.client.get(self.url(path)).query(query)).await
    }

    #[instrument(skip(self, body))]
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    #[instrument(skip(self))]
    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.client.post(self.url(path))).await
    }

    #[instrument(skip(self, body))]
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.client.put(self.url(path)).json(body)).await
    }

    #[instrument(skip(self, body))]
    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.client.patch(self.url(path)).json(body)).await
    }

    #[instrument(skip(self))]
    async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.client.patch(self.url(path))).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, path: &str) -> ClientResult<()> {
        let _: serde_json::Value = self.send(self.client.delete(self.url(path))).await?;
        Ok(())
    }

    fn session(&self) -> &SessionHandle {
        &self.session
    }
}
