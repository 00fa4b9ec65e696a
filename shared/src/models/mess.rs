//! Mess membership and transaction Model

use super::menu::MessTypeRef;
use super::order::PaymentMethod;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::util::opt_string_or_number;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which menus a membership follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuType {
    /// The restaurant's standard menus for the mess type
    #[default]
    OwnMenu,
    /// Menus built for this member
    CustomMenu,
}

/// Mess (subscription meal plan) member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mess {
    pub id: i64,
    pub customer_name: String,
    #[serde(deserialize_with = "mobile")]
    pub mobile_number: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub mess_type: MessTypeRef,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    pub total_amount: Decimal,
    #[serde(default)]
    pub paid_amount: Decimal,
    #[serde(default)]
    pub pending_amount: Decimal,
    #[serde(default)]
    pub discount_amount: Decimal,
    #[serde(default)]
    pub grand_total: Option<Decimal>,
    #[serde(default)]
    pub menu_type: MenuType,
    #[serde(default)]
    pub menus: Vec<i64>,
}

fn mobile<'de, D: serde::Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(opt_string_or_number(d)?.unwrap_or_default())
}

/// The membership endpoint spells the split method `cash_and_bank`
fn mess_payment_method<S: serde::Serializer>(m: &PaymentMethod, s: S) -> Result<S::Ok, S::Error> {
    match m {
        PaymentMethod::CashBank => s.serialize_str("cash_and_bank"),
        other => other.serialize(s),
    }
}

fn mess_payment_method_opt<S: serde::Serializer>(
    m: &Option<PaymentMethod>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match m {
        Some(m) => mess_payment_method(m, s),
        None => s.serialize_none(),
    }
}

impl Mess {
    /// Membership is running on `today`
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.start_date <= today && today <= self.end_date
    }
}

/// Enroll member payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessCreate {
    pub customer_name: String,
    pub mobile_number: String,
    pub mess_type: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(serialize_with = "mess_payment_method")]
    pub payment_method: PaymentMethod,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub pending_amount: Decimal,
    pub discount_amount: Decimal,
    pub grand_total: Decimal,
    pub cash_amount: Decimal,
    pub bank_amount: Decimal,
    pub menu_type: MenuType,
    pub menus: Vec<i64>,
}

/// Edit member payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "mess_payment_method_opt"
    )]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_amount: Option<Decimal>,
}

impl MessUpdate {
    /// Edit form checks: something to change, a name, a forward date range
    pub fn validate(&self) -> AppResult<()> {
        if self == &Self::default() {
            return Err(AppError::validation("Nothing to update"));
        }
        if self.customer_name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::required("customer_name"));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(AppError::validation("End date must not be before start date"));
            }
        }
        let negative = [self.paid_amount, self.pending_amount]
            .into_iter()
            .flatten()
            .any(|a| a < Decimal::ZERO);
        if negative {
            return Err(AppError::new(ErrorCode::InvalidAmount));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
}

/// Payment received against a mess membership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(default)]
    pub mess: Option<i64>,
    pub received_amount: Decimal,
    #[serde(default)]
    pub cash_amount: Decimal,
    #[serde(default)]
    pub bank_amount: Decimal,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default, alias = "created_at")]
    pub date: Option<DateTime<Utc>>,
}

/// Record a received payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionCreate {
    pub mess: i64,
    pub received_amount: Decimal,
    pub cash_amount: Decimal,
    pub bank_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mess_report_row_with_nested_type() {
        let json = r#"{
            "id": 5, "customer_name": "Faisal", "mobile_number": 55501234,
            "start_date": "2024-05-01", "end_date": "2024-05-14",
            "mess_type": {"id": 2, "name": "Non-Veg"},
            "payment_method": "cash", "total_amount": "700.00",
            "paid_amount": "500.00", "pending_amount": "200.00", "menus": [1, 2]
        }"#;
        let mess: Mess = serde_json::from_str(json).unwrap();
        assert_eq!(mess.mobile_number, "55501234");
        assert_eq!(mess.mess_type.id(), 2);
        assert_eq!(mess.mess_type.name(), Some("Non-Veg"));
        assert_eq!(mess.menu_type, MenuType::OwnMenu);
        assert!(mess.is_current(NaiveDate::from_ymd_opt(2024, 5, 14).unwrap()));
        assert!(!mess.is_current(NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()));
    }

    #[test]
    fn test_mess_update_spells_split_method() {
        let update = MessUpdate {
            payment_method: Some(PaymentMethod::CashBank),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"payment_method": "cash_and_bank"}));
    }

    #[test]
    fn test_mess_update_validation() {
        assert!(MessUpdate::default().validate().is_err());
        let rename = MessUpdate {
            customer_name: Some("Faisal Ahmed".to_string()),
            mobile_number: Some("55501234".to_string()),
            ..Default::default()
        };
        assert!(rename.validate().is_ok());

        let blank = MessUpdate {
            customer_name: Some(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.validate().unwrap_err().code, ErrorCode::RequiredField);

        let backwards = MessUpdate {
            start_date: NaiveDate::from_ymd_opt(2024, 5, 14),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            ..Default::default()
        };
        assert_eq!(backwards.validate().unwrap_err().code, ErrorCode::ValidationFailed);

        let negative = MessUpdate {
            pending_amount: Some(Decimal::new(-1, 0)),
            ..Default::default()
        };
        assert_eq!(negative.validate().unwrap_err().code, ErrorCode::InvalidAmount);
    }
}
