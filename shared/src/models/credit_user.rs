//! Credit User Model

use crate::error::{AppError, AppResult, ErrorCode};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Customer allowed to defer payment against a running balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub mobile_number: Option<String>,
    /// End of the current credit period
    #[serde(default)]
    pub time_period: Option<NaiveDate>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub last_payment_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_due: Decimal,
    #[serde(default)]
    pub limit_amount: Option<Decimal>,
}

impl CreditUser {
    /// Credit period ended before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.time_period.is_some_and(|end| end < today) && self.total_due > Decimal::ZERO
    }
}

/// Create credit user payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditUserCreate {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    pub time_period: Option<NaiveDate>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_amount: Option<Decimal>,
}

/// Update credit user payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditUserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_amount: Option<Decimal>,
}

impl CreditUserCreate {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            mobile_number: None,
            time_period: None,
            is_active: true,
            limit_amount: None,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.username.trim().is_empty() {
            return Err(AppError::required("username"));
        }
        check_limit(self.limit_amount)
    }
}

impl CreditUserUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.is_empty() {
            return Err(AppError::validation("Nothing to update"));
        }
        if self.username.as_deref().is_some_and(|u| u.trim().is_empty()) {
            return Err(AppError::required("username"));
        }
        check_limit(self.limit_amount)
    }
}

fn check_limit(limit: Option<Decimal>) -> AppResult<()> {
    match limit {
        Some(l) if l < Decimal::ZERO => {
            Err(AppError::new(ErrorCode::InvalidAmount).with_detail("field", "limit_amount"))
        }
        _ => Ok(()),
    }
}

/// Payment against a credit user's balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditPayment {
    pub payment_amount: Decimal,
}

impl CreditPayment {
    /// Validate a payment against the user's outstanding balance
    pub fn new(amount: Decimal, user: &CreditUser) -> AppResult<Self> {
        if amount <= Decimal::ZERO {
            return Err(AppError::new(ErrorCode::InvalidAmount));
        }
        if amount > user.total_due {
            return Err(AppError::new(ErrorCode::AmountExceedsDue)
                .with_detail("total_due", user.total_due.to_string()));
        }
        Ok(Self {
            payment_amount: amount,
        })
    }
}
