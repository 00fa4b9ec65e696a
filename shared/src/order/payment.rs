use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::PaymentMethod;
use crate::util::round_money;
use rust_decimal::Decimal;

/// Payment method with its cash/bank split for a given total
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentSelection {
    method: PaymentMethod,
    total: Decimal,
    cash: Decimal,
    bank: Decimal,
    credit_user_id: Option<i64>,
}

impl PaymentSelection {
    /// Select a method; cash-bank starts as an even split
    pub fn new(method: PaymentMethod, total: Decimal) -> Self {
        let (cash, bank) = match method {
            PaymentMethod::Cash => (total, Decimal::ZERO),
            PaymentMethod::Bank => (Decimal::ZERO, total),
            PaymentMethod::CashBank => {
                let cash = round_money(total / Decimal::TWO);
                (cash, total - cash)
            }
            PaymentMethod::Credit => (Decimal::ZERO, Decimal::ZERO),
        };
        Self {
            method,
            total,
            cash,
            bank,
            credit_user_id: None,
        }
    }

    /// Switch method, resetting the split for the same total
    pub fn change_method(&mut self, method: PaymentMethod) {
        let credit_user_id = self.credit_user_id;
        *self = Self::new(method, self.total);
        self.credit_user_id = credit_user_id;
    }

    /// Edit the cash part; the bank part takes the remainder
    pub fn set_cash(&mut self, cash: Decimal) {
        self.cash = cash;
        self.bank = self.total - cash;
    }

    /// Explicit split as typed into both fields
    pub fn with_split(mut self, cash: Decimal, bank: Decimal) -> Self {
        self.cash = cash;
        self.bank = bank;
        self
    }

    pub fn with_credit_user(mut self, credit_user_id: Option<i64>) -> Self {
        self.credit_user_id = credit_user_id;
        self
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn cash_amount(&self) -> Decimal {
        self.cash
    }

    pub fn bank_amount(&self) -> Decimal {
        self.bank
    }

    pub fn credit_user_id(&self) -> Option<i64> {
        self.credit_user_id
    }

    /// Check the split and the credit user before submitting
    pub fn validate(&self) -> AppResult<()> {
        if self.cash < Decimal::ZERO || self.bank < Decimal::ZERO {
            return Err(AppError::new(ErrorCode::InvalidAmount)
                .with_detail("cash_amount", self.cash.to_string())
                .with_detail("bank_amount", self.bank.to_string()));
        }
        match self.method {
            PaymentMethod::CashBank if self.cash + self.bank != self.total => {
                Err(AppError::new(ErrorCode::PaymentSplitMismatch)
                    .with_detail("total", self.total.to_string()))
            }
            PaymentMethod::Credit if self.credit_user_id.is_none() => {
                Err(AppError::new(ErrorCode::CreditUserRequired))
            }
            _ => Ok(()),
        }
    }

    /// Split amounts are only sent for cash-bank payments
    pub fn split_fields(&self) -> (Option<Decimal>, Option<Decimal>) {
        match self.method {
            PaymentMethod::CashBank => (Some(self.cash), Some(self.bank)),
            _ => (None, None),
        }
    }

    /// Credit user is only sent for credit payments
    pub fn credit_field(&self) -> Option<i64> {
        match self.method {
            PaymentMethod::Credit => self.credit_user_id,
            _ => None,
        }
    }
}
