//! Unified error codes for the dine workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Dish errors
//! - 7xxx: Table errors
//! - 8xxx: Mess and credit errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values so they survive JSON and log round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,
    /// The user declined a confirmation prompt
    Cancelled = 9,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password or passcode)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Session has expired
    SessionExpired = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order is delivered or cancelled and can no longer change
    OrderLocked = 4002,
    /// Order has no items
    OrderEmpty = 4003,
    /// Delivery order is missing its address
    DeliveryAddressRequired = 4004,
    /// Delivery order is missing its driver
    DeliveryDriverRequired = 4005,
    /// Status transition is not allowed from the current status
    InvalidStatusTransition = 4006,

    // ==================== 5xxx: Payment ====================
    /// Payment method not selected
    PaymentMethodRequired = 5001,
    /// Cash and bank amounts do not add up to the total
    PaymentSplitMismatch = 5002,
    /// Credit payment without a credit user
    CreditUserRequired = 5003,
    /// Payment amount must be positive
    InvalidAmount = 5004,
    /// Payment exceeds the amount due
    AmountExceedsDue = 5005,
    /// Coupon is inactive, expired or used up
    CouponInvalid = 5006,

    // ==================== 6xxx: Dish ====================
    /// Dish not found
    DishNotFound = 6001,
    /// Quantity below the minimum of one
    InvalidQuantity = 6002,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Floor not found
    FloorNotFound = 7002,

    // ==================== 8xxx: Mess and credit ====================
    /// Mess member not found
    MessNotFound = 8001,
    /// No menu selected for the membership
    MenuRequired = 8002,
    /// Mess type not selected
    MessTypeRequired = 8003,
    /// Membership length outside 1..=4 weeks
    InvalidWeeks = 8004,
    /// All seven custom menus already exist
    CustomMenuLimit = 8005,
    /// Credit user not found
    CreditUserNotFound = 8006,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error talking to the API
    NetworkError = 9002,
    /// Print operation failed
    PrintFailed = 9003,
    /// Local storage failure
    StorageError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",
            ErrorCode::Cancelled => "Action cancelled",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::SessionExpired => "Session has expired, please log in again",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderLocked => "Order is already delivered or cancelled",
            ErrorCode::OrderEmpty => "Order has no items",
            ErrorCode::DeliveryAddressRequired => "Delivery address is required",
            ErrorCode::DeliveryDriverRequired => "Delivery driver is required",
            ErrorCode::InvalidStatusTransition => "Status change is not allowed",

            // Payment
            ErrorCode::PaymentMethodRequired => "Please select a payment method",
            ErrorCode::PaymentSplitMismatch => "Cash and bank amounts must add up to the total",
            ErrorCode::CreditUserRequired => "Please select a credit user",
            ErrorCode::InvalidAmount => "Amount must be greater than zero",
            ErrorCode::AmountExceedsDue => "Amount exceeds the amount due",
            ErrorCode::CouponInvalid => "Coupon is not valid",

            // Dish
            ErrorCode::DishNotFound => "Dish not found",
            ErrorCode::InvalidQuantity => "Quantity must be at least 1",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::FloorNotFound => "Floor not found",

            // Mess and credit
            ErrorCode::MessNotFound => "Mess member not found",
            ErrorCode::MenuRequired => "Please select at least one menu",
            ErrorCode::MessTypeRequired => "Please select a mess type",
            ErrorCode::InvalidWeeks => "Number of weeks must be between 1 and 4",
            ErrorCode::CustomMenuLimit => "A custom menu already exists for every day",
            ErrorCode::CreditUserNotFound => "Credit user not found",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::PrintFailed => "Print operation failed",
            ErrorCode::StorageError => "Local storage error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            5 => ErrorCode::InvalidRequest,
            7 => ErrorCode::RequiredField,
            8 => ErrorCode::ValueOutOfRange,
            9 => ErrorCode::Cancelled,

            1001 => ErrorCode::NotAuthenticated,
            1002 => ErrorCode::InvalidCredentials,
            1003 => ErrorCode::TokenExpired,
            1004 => ErrorCode::TokenInvalid,
            1005 => ErrorCode::SessionExpired,

            2001 => ErrorCode::PermissionDenied,
            2002 => ErrorCode::RoleRequired,

            4001 => ErrorCode::OrderNotFound,
            4002 => ErrorCode::OrderLocked,
            4003 => ErrorCode::OrderEmpty,
            4004 => ErrorCode::DeliveryAddressRequired,
            4005 => ErrorCode::DeliveryDriverRequired,
            4006 => ErrorCode::InvalidStatusTransition,

            5001 => ErrorCode::PaymentMethodRequired,
            5002 => ErrorCode::PaymentSplitMismatch,
            5003 => ErrorCode::CreditUserRequired,
            5004 => ErrorCode::InvalidAmount,
            5005 => ErrorCode::AmountExceedsDue,
            5006 => ErrorCode::CouponInvalid,

            6001 => ErrorCode::DishNotFound,
            6002 => ErrorCode::InvalidQuantity,

            7001 => ErrorCode::TableNotFound,
            7002 => ErrorCode::FloorNotFound,

            8001 => ErrorCode::MessNotFound,
            8002 => ErrorCode::MenuRequired,
            8003 => ErrorCode::MessTypeRequired,
            8004 => ErrorCode::InvalidWeeks,
            8005 => ErrorCode::CustomMenuLimit,
            8006 => ErrorCode::CreditUserNotFound,

            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::NetworkError,
            9003 => ErrorCode::PrintFailed,
            9004 => ErrorCode::StorageError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::Cancelled.code(), 9);
        assert_eq!(ErrorCode::TokenExpired.code(), 1003);
        assert_eq!(ErrorCode::OrderLocked.code(), 4002);
        assert_eq!(ErrorCode::PaymentMethodRequired.code(), 5001);
        assert_eq!(ErrorCode::InvalidWeeks.code(), 8004);
        assert_eq!(ErrorCode::PrintFailed.code(), 9003);
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(4999), Err(InvalidErrorCode(4999)));
        assert_eq!(
            InvalidErrorCode(4999).to_string(),
            "invalid error code: 4999"
        );
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::CreditUserRequired).unwrap();
        assert_eq!(json, "5003");
        let code: ErrorCode = serde_json::from_str("4006").unwrap();
        assert_eq!(code, ErrorCode::InvalidStatusTransition);
        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_every_code_survives_u16() {
        let all = [
            ErrorCode::Unknown,
            ErrorCode::RequiredField,
            ErrorCode::SessionExpired,
            ErrorCode::RoleRequired,
            ErrorCode::DeliveryDriverRequired,
            ErrorCode::CouponInvalid,
            ErrorCode::InvalidQuantity,
            ErrorCode::FloorNotFound,
            ErrorCode::CreditUserNotFound,
            ErrorCode::StorageError,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }
}
