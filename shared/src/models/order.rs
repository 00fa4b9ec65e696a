//! Order Model

use crate::error::{AppError, AppResult};
use crate::util::opt_string_or_number;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Approved,
    Cancelled,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Approved,
        OrderStatus::Cancelled,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Cancelled => "cancelled",
            Self::Delivered => "delivered",
        }
    }

    /// Delivered and cancelled orders no longer accept status changes or new items
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the order is served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    #[default]
    Dining,
    Takeaway,
    Delivery,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dining => "dining",
            Self::Takeaway => "takeaway",
            Self::Delivery => "delivery",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the customer pays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "cash")]
    Cash,
    #[serde(rename = "bank")]
    Bank,
    /// Split between cash and bank
    #[serde(rename = "cash-bank", alias = "cash_and_bank")]
    CashBank,
    /// Deferred against a credit user's running balance
    #[serde(rename = "credit")]
    Credit,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Bank => "bank",
            Self::CashBank => "cash-bank",
            Self::Credit => "credit",
        }
    }

    /// Whether part of the amount is taken in cash
    pub fn takes_cash(&self) -> bool {
        matches!(self, Self::Cash | Self::CashBank)
    }

    /// Whether part of the amount is taken by bank transfer or card
    pub fn takes_bank(&self) -> bool {
        matches!(self, Self::Bank | Self::CashBank)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line item on an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub id: Option<i64>,
    pub dish: i64,
    #[serde(default)]
    pub dish_name: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Items appended after the kitchen ticket went out
    #[serde(default)]
    pub is_newly_added: bool,
}

/// Driver summary nested in delivery orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverSummary {
    pub username: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    #[serde(default)]
    pub bill_generated: bool,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub cash_amount: Option<Decimal>,
    #[serde(default)]
    pub bank_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub customer_phone_number: Option<String>,
    #[serde(default)]
    pub delivery_charge: Option<Decimal>,
    #[serde(default)]
    pub delivery_driver_id: Option<i64>,
    #[serde(default)]
    pub delivery_driver: Option<DriverSummary>,
    #[serde(default)]
    pub delivery_order_status: Option<String>,
    #[serde(default)]
    pub credit_user_id: Option<i64>,
    #[serde(default)]
    pub kitchen_note: Option<String>,
    #[serde(default)]
    pub invoice_number: Option<String>,
}

impl Order {
    /// Sum of item quantities
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// New items can be appended only while the order is still open
    pub fn accepts_items(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// Item reference in create payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub dish: i64,
    pub quantity: u32,
}

/// Create order payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub items: Vec<OrderItemInput>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_amount: Option<Decimal>,
    pub customer_name: String,
    pub address: String,
    pub customer_phone_number: String,
    pub delivery_charge: Decimal,
    pub delivery_driver_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kitchen_note: Option<String>,
}

/// Status change payload; payment fields ride along on the delivered transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_user_id: Option<i64>,
}

impl OrderStatusUpdate {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status,
            payment_method: None,
            cash_amount: None,
            bank_amount: None,
            credit_user_id: None,
        }
    }
}

/// Item appended to an existing order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppendedItem {
    pub dish: i64,
    pub quantity: u32,
    /// Line total (quantity × price)
    pub total_amount: Decimal,
}

/// Payload for adding products to an existing order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemsAppend {
    pub items: Vec<AppendedItem>,
    /// Previous order total plus the appended lines
    pub total_amount: Decimal,
}

/// Payment update payload (payment modal)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPaymentUpdate {
    pub payment_method: PaymentMethod,
    pub cash_amount: Decimal,
    pub bank_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_user_id: Option<i64>,
}

/// Change order type payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTypeChange {
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_driver_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_charge: Option<Decimal>,
}

/// Customer details corrected from the sales report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderCustomerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone_number: Option<String>,
}

impl OrderCustomerUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if self == &Self::default() {
            return Err(AppError::validation("Nothing to update"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_update_sends_only_edited_fields() {
        assert!(OrderCustomerUpdate::default().validate().is_err());
        let update = OrderCustomerUpdate {
            customer_phone_number: Some("55501234".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"customer_phone_number": "55501234"}));
    }

    #[test]
    fn test_order_deserialize_api_shape() {
        let json = r#"{
            "id": 17,
            "created_at": "2024-05-01T18:20:00.123456+03:00",
            "total_amount": "42.00",
            "status": "approved",
            "bill_generated": false,
            "items": [{"dish": 3, "quantity": 2}],
            "order_type": "delivery",
            "payment_method": "cash-bank",
            "customer_name": "Aisha",
            "customer_phone_number": 55501234,
            "address": "Al Sadd",
            "delivery_driver": {"username": "ravi", "mobile_number": 5551, "email": "r@x.qa"}
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Approved);
        assert_eq!(order.order_type, OrderType::Delivery);
        assert_eq!(order.payment_method, Some(PaymentMethod::CashBank));
        assert_eq!(order.customer_phone_number.as_deref(), Some("55501234"));
        assert_eq!(order.total_quantity(), 2);
        assert!(order.accepts_items());
    }

    #[test]
    fn test_payment_method_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CashBank).unwrap(),
            "\"cash-bank\""
        );
        let m: PaymentMethod = serde_json::from_str("\"cash_and_bank\"").unwrap();
        assert_eq!(m, PaymentMethod::CashBank);
        assert!(PaymentMethod::CashBank.takes_cash() && PaymentMethod::CashBank.takes_bank());
        assert!(!PaymentMethod::Credit.takes_cash());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Approved.is_terminal());
    }

    #[test]
    fn test_status_update_skips_empty_payment() {
        let json = serde_json::to_value(OrderStatusUpdate::status(OrderStatus::Cancelled)).unwrap();
        assert_eq!(json, serde_json::json!({"status": "cancelled"}));
    }
}
