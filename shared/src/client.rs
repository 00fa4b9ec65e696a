//! Auth types shared by the client library and the terminal front end
//!
//! Login DTOs, user roles and the role-based landing route.

use crate::error::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Username/password login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> AppResult<Self> {
        let username = username.into();
        let password = password.into();
        if username.trim().is_empty() {
            return Err(AppError::required("Username"));
        }
        if password.is_empty() {
            return Err(AppError::required("Password"));
        }
        Ok(Self {
            username: username.trim().to_string(),
            password,
        })
    }
}

/// Length of a staff passcode
pub const PASSCODE_LEN: usize = 6;

/// Passcode login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasscodeLoginRequest {
    pub passcode: String,
}

impl PasscodeLoginRequest {
    /// Passcodes are exactly six digits
    pub fn new(passcode: impl Into<String>) -> AppResult<Self> {
        let passcode = passcode.into();
        let passcode = passcode.trim();
        if passcode.len() != PASSCODE_LEN || !passcode.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::with_message(
                ErrorCode::InvalidCredentials,
                "Passcode must be 6 digits",
            ));
        }
        Ok(Self {
            passcode: passcode.to_string(),
        })
    }
}

/// Login response: JWT pair plus the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserInfo,
}

/// Logged-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
}

/// Logout request; the refresh token is blacklisted server-side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

/// Token refresh request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Token refresh response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

// =============================================================================
// Roles and routing
// =============================================================================

/// User role as reported by the API
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Staff,
    Driver,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Driver => "driver",
            Self::Other(s) => s,
        }
    }

    pub fn can_access(&self, area: Area) -> bool {
        match area {
            Area::Restaurant => matches!(self, Self::Admin | Self::Staff),
            Area::Driver => matches!(self, Self::Driver),
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            "staff" => Self::Staff,
            "driver" => Self::Driver,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Ok(Role::from(s.as_str()))
    }
}

/// Protected section of the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    /// Orders, bills, tables, mess, reports (staff and admin)
    Restaurant,
    /// Driver's delivery list and profile
    Driver,
}

/// Screen a user lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    DriverHome,
    Login,
    PasscodeLogin,
    Unauthorized,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::DriverHome => "/driver",
            Self::Login => "/login",
            Self::PasscodeLogin => "/login-passcode",
            Self::Unauthorized => "/unauthorized",
        }
    }
}

/// Where a freshly logged-in user goes
pub fn landing_route(role: &Role) -> Route {
    match role {
        Role::Driver => Route::DriverHome,
        _ => Route::Home,
    }
}
