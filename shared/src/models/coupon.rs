//! Coupon Model

use crate::error::{AppError, AppResult, ErrorCode};
use crate::util::format_money;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discount coupon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: i64,
    pub code: String,
    #[serde(default)]
    pub discount_amount: Decimal,
    #[serde(default)]
    pub discount_percentage: Option<Decimal>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub usage_count: u32,
    #[serde(default)]
    pub min_purchase_amount: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Coupon {
    /// Active, inside its date window and below its usage limit
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        if !self.is_active {
            return false;
        }
        if self.start_date > now || self.end_date < now {
            return false;
        }
        self.usage_limit
            .is_none_or(|limit| self.usage_count < limit)
    }

    /// Amount after discount; a percentage wins over a fixed amount
    pub fn apply_discount(&self, amount: Decimal) -> Decimal {
        if let Some(pct) = self.discount_percentage.filter(|p| !p.is_zero()) {
            return amount - amount * pct / Decimal::ONE_HUNDRED;
        }
        if !self.discount_amount.is_zero() {
            return (amount - self.discount_amount).max(Decimal::ZERO);
        }
        amount
    }

    /// Whether an order total reaches the minimum purchase amount
    pub fn meets_minimum(&self, amount: Decimal) -> bool {
        self.min_purchase_amount.is_none_or(|min| amount >= min)
    }

    /// Human label such as `10% off` or `QAR 5.00 off`
    pub fn discount_label(&self) -> String {
        match self.discount_percentage.filter(|p| !p.is_zero()) {
            Some(pct) => format!("{}% off", pct.normalize()),
            None if !self.discount_amount.is_zero() => {
                format!("{} off", format_money(self.discount_amount))
            }
            None => "No discount".to_string(),
        }
    }
}

/// Create coupon payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponCreate {
    pub code: String,
    pub discount_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<Decimal>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_purchase_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CouponCreate {
    /// Form checks before the coupon is sent
    pub fn validate(&self) -> AppResult<()> {
        if self.code.trim().is_empty() {
            return Err(AppError::required("code"));
        }
        if self.discount_amount < Decimal::ZERO {
            return Err(AppError::new(ErrorCode::InvalidAmount).with_detail("field", "discount_amount"));
        }
        if let Some(pct) = self.discount_percentage {
            if pct <= Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
                return Err(AppError::with_message(
                    ErrorCode::CouponInvalid,
                    "Discount percentage must be between 0 and 100",
                )
                .with_detail("discount_percentage", pct.to_string()));
            }
        }
        if self.end_date <= self.start_date {
            return Err(AppError::validation("End date must be after start date"));
        }
        if self.usage_limit == Some(0) {
            return Err(AppError::with_message(ErrorCode::CouponInvalid, "Usage limit must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn coupon() -> Coupon {
        Coupon {
            id: 1,
            code: "EID10".to_string(),
            discount_amount: Decimal::new(5, 0),
            discount_percentage: None,
            start_date: Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 4, 30, 0, 0, 0).unwrap(),
            is_active: true,
            usage_limit: Some(2),
            usage_count: 0,
            min_purchase_amount: None,
            description: None,
        }
    }

    #[test]
    fn test_validity_window_and_usage() {
        let c = coupon();
        let inside = c.start_date + Duration::days(3);
        assert!(c.is_valid(inside));
        assert!(!c.is_valid(c.start_date - Duration::seconds(1)));
        assert!(!c.is_valid(c.end_date + Duration::seconds(1)));

        let used_up = Coupon { usage_count: 2, ..coupon() };
        assert!(!used_up.is_valid(inside));

        let unlimited = Coupon { usage_limit: None, usage_count: 99, ..coupon() };
        assert!(unlimited.is_valid(inside));

        let inactive = Coupon { is_active: false, ..coupon() };
        assert!(!inactive.is_valid(inside));
    }

    #[test]
    fn test_percentage_takes_precedence() {
        let c = Coupon {
            discount_percentage: Some(Decimal::new(10, 0)),
            ..coupon()
        };
        assert_eq!(c.apply_discount(Decimal::new(200, 0)), Decimal::new(180, 0));
        assert_eq!(c.discount_label(), "10% off");

        let fixed = coupon();
        assert_eq!(fixed.apply_discount(Decimal::new(20, 0)), Decimal::new(15, 0));
        assert_eq!(fixed.apply_discount(Decimal::new(3, 0)), Decimal::ZERO);
        assert_eq!(fixed.discount_label(), "QAR 5.00 off");
    }

    fn create() -> CouponCreate {
        CouponCreate {
            code: "RAMADAN".to_string(),
            discount_amount: Decimal::ZERO,
            discount_percentage: Some(Decimal::new(15, 0)),
            start_date: Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 4, 9, 0, 0, 0).unwrap(),
            is_active: true,
            usage_limit: None,
            min_purchase_amount: None,
            description: None,
        }
    }

    #[test]
    fn test_create_validation() {
        assert!(create().validate().is_ok());

        let blank = CouponCreate { code: "  ".to_string(), ..create() };
        assert_eq!(blank.validate().unwrap_err().code, ErrorCode::RequiredField);

        let over = CouponCreate { discount_percentage: Some(Decimal::new(101, 0)), ..create() };
        assert_eq!(over.validate().unwrap_err().code, ErrorCode::CouponInvalid);

        let negative = CouponCreate {
            discount_percentage: None,
            discount_amount: Decimal::new(-5, 0),
            ..create()
        };
        assert_eq!(negative.validate().unwrap_err().code, ErrorCode::InvalidAmount);

        let backwards = CouponCreate { end_date: create().start_date, ..create() };
        assert_eq!(backwards.validate().unwrap_err().code, ErrorCode::ValidationFailed);

        let no_uses = CouponCreate { usage_limit: Some(0), ..create() };
        assert_eq!(no_uses.validate().unwrap_err().code, ErrorCode::CouponInvalid);
    }
}
