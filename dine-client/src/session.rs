//! Session state shared by every request
//!
//! Holds the JWT pair and the logged-in user. The HTTP layer reads the access
//! token from here and raises `token_expired` when the API rejects it; the
//! front end then shows the session-expired notice. [`SessionStore`] keeps
//! the session across runs as a JSON file in the data directory.

use crate::error::ClientResult;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::client::{Area, LoginResponse, Role, UserInfo};
use shared::error::{AppError, AppResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<UserInfo>,
    pub access: Option<String>,
    pub refresh: Option<String>,
    #[serde(default)]
    pub token_expired: bool,
}

impl Session {
    pub fn from_login(login: LoginResponse) -> Self {
        Self {
            user: Some(login.user),
            access: Some(login.access),
            refresh: Some(login.refresh),
            token_expired: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access.is_some()
    }

    pub fn role(&self) -> Option<&Role> {
        self.user.as_ref().map(|u| &u.role)
    }

    /// Expiry embedded in the access token
    pub fn access_expires_at(&self) -> Option<DateTime<Utc>> {
        let exp = parse_jwt_exp(self.access.as_deref()?)?;
        DateTime::from_timestamp(exp as i64, 0)
    }

    /// Token flagged by the API or past its `exp`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.token_expired || self.access_expires_at().is_some_and(|exp| exp <= now)
    }

    /// Gate for a protected area
    pub fn require(&self, area: Area) -> AppResult<&UserInfo> {
        let user = match (&self.access, &self.user) {
            (Some(_), Some(user)) => user,
            _ => return Err(AppError::not_authenticated()),
        };
        if self.is_expired(Utc::now()) {
            return Err(AppError::session_expired());
        }
        if !user.role.can_access(area) {
            return Err(AppError::permission_denied(format!(
                "role '{}' cannot open this page",
                user.role
            )));
        }
        Ok(user)
    }
}

/// Read the `exp` claim (unix seconds) without verifying the signature
pub fn parse_jwt_exp(token: &str) -> Option<u64> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let payload = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let payload: serde_json::Value = serde_json::from_slice(&payload).ok()?;
    payload.get("exp")?.as_u64()
}

/// Shared, cloneable handle to the current session
#[derive(Debug, Clone, Default)]
pub struct SessionHandle(Arc<RwLock<Session>>);

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self(Arc::new(RwLock::new(session)))
    }

    pub async fn snapshot(&self) -> Session {
        self.0.read().await.clone()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.0.read().await.access.clone()
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.0.read().await.refresh.clone()
    }

    pub async fn replace(&self, session: Session) {
        *self.0.write().await = session;
    }

    pub async fn clear(&self) {
        *self.0.write().await = Session::default();
    }

    pub async fn mark_token_expired(&self) {
        self.0.write().await.token_expired = true;
    }

    pub async fn token_expired(&self) -> bool {
        self.0.read().await.token_expired
    }

    pub async fn require(&self, area: Area) -> AppResult<UserInfo> {
        self.0.read().await.require(area).cloned()
    }
}

/// JSON file holding the session between runs
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable files yield an empty session
    pub async fn load(&self) -> Session {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "Discarding corrupt session file");
                Session::default()
            }),
            Err(_) => Session::default(),
        }
    }

    pub async fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(session)?;
        tokio::fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    pub async fn clear(&self) -> ClientResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
