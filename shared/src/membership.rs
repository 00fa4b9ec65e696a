//! Mess membership arithmetic
//!
//! Enrollment totals, the membership end date, and received-payment
//! bookkeeping for the mess page.

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{
    DayOfWeek, Menu, MenuType, MessCreate, PaymentMethod, Transaction, TransactionCreate,
    TransactionStatus,
};
use crate::util::round_money;
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

/// Longest membership sold in one go
pub const MAX_WEEKS: u32 = 4;

/// One custom menu per weekday
pub const MAX_CUSTOM_MENUS: usize = 7;

/// Owner recorded on the restaurant's standard menus
pub const STANDARD_MENU_OWNER: &str = "admin";

/// Last day of a membership starting on `start` and lasting `weeks`
pub fn end_date(start: NaiveDate, weeks: u32) -> NaiveDate {
    start + Duration::days(weeks as i64 * 7 - 1)
}

/// Menus that count for a member: every standard menu, or the member's own custom ones
pub fn selected_menus<'a>(menus: &'a [Menu], menu_type: MenuType, mobile_number: &str) -> Vec<&'a Menu> {
    match menu_type {
        MenuType::OwnMenu => menus.iter().collect(),
        MenuType::CustomMenu => menus
            .iter()
            .filter(|m| m.created_by.as_deref() == Some(mobile_number))
            .collect(),
    }
}

/// Weekday for the next custom menu, or an error once all seven exist
pub fn next_custom_day(existing: &[Menu]) -> AppResult<DayOfWeek> {
    if existing.len() >= MAX_CUSTOM_MENUS {
        return Err(AppError::new(ErrorCode::CustomMenuLimit));
    }
    DayOfWeek::ALL
        .into_iter()
        .find(|day| !existing.iter().any(|m| m.day_of_week == Some(*day)))
        .ok_or_else(|| AppError::new(ErrorCode::CustomMenuLimit))
}

/// New member form
#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    pub customer_name: String,
    pub mobile_number: String,
    pub mess_type: Option<i64>,
    pub menu_type: MenuType,
    pub start_date: NaiveDate,
    pub weeks: u32,
    pub discount: Decimal,
    pub payment_method: PaymentMethod,
    pub paid_amount: Decimal,
    pub cash_amount: Decimal,
    pub bank_amount: Decimal,
}

impl Enrollment {
    pub fn new(customer_name: impl Into<String>, mobile_number: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            customer_name: customer_name.into(),
            mobile_number: mobile_number.into(),
            mess_type: None,
            menu_type: MenuType::OwnMenu,
            start_date,
            weeks: 1,
            discount: Decimal::ZERO,
            payment_method: PaymentMethod::Cash,
            paid_amount: Decimal::ZERO,
            cash_amount: Decimal::ZERO,
            bank_amount: Decimal::ZERO,
        }
    }

    pub fn end_date(&self) -> NaiveDate {
        end_date(self.start_date, self.weeks)
    }

    /// Σ menu sub-totals × weeks
    pub fn total(&self, menus: &[&Menu]) -> Decimal {
        let per_week: Decimal = menus.iter().map(|m| m.sub_total).sum();
        round_money(per_week * Decimal::from(self.weeks))
    }

    /// Total less discount, floored at zero
    pub fn grand_total(&self, menus: &[&Menu]) -> Decimal {
        (self.total(menus) - self.discount).max(Decimal::ZERO)
    }

    pub fn pending(&self, menus: &[&Menu]) -> Decimal {
        (self.grand_total(menus) - self.paid_amount).max(Decimal::ZERO)
    }

    /// Validate and build the enroll payload from the loaded menus
    pub fn to_create(&self, menus: &[Menu]) -> AppResult<MessCreate> {
        if self.customer_name.trim().is_empty() {
            return Err(AppError::required("Customer name"));
        }
        if self.mobile_number.trim().is_empty() {
            return Err(AppError::required("Mobile number"));
        }
        let mess_type = self
            .mess_type
            .ok_or_else(|| AppError::new(ErrorCode::MessTypeRequired))?;
        if !(1..=MAX_WEEKS).contains(&self.weeks) {
            return Err(AppError::new(ErrorCode::InvalidWeeks).with_detail("weeks", self.weeks));
        }
        if self.discount < Decimal::ZERO || self.paid_amount < Decimal::ZERO {
            return Err(AppError::new(ErrorCode::InvalidAmount));
        }

        let mobile = self.mobile_number.trim();
        let chosen = selected_menus(menus, self.menu_type, mobile);
        if chosen.is_empty() {
            return Err(AppError::new(ErrorCode::MenuRequired));
        }

        let (cash_amount, bank_amount) = match self.payment_method {
            PaymentMethod::Cash => (self.cash_amount, Decimal::ZERO),
            PaymentMethod::Bank => (Decimal::ZERO, self.bank_amount),
            PaymentMethod::CashBank => (self.cash_amount, self.bank_amount),
            PaymentMethod::Credit => (Decimal::ZERO, Decimal::ZERO),
        };

        Ok(MessCreate {
            customer_name: self.customer_name.trim().to_string(),
            mobile_number: mobile.to_string(),
            mess_type,
            start_date: self.start_date,
            end_date: self.end_date(),
            payment_method: self.payment_method,
            total_amount: self.total(&chosen),
            paid_amount: self.paid_amount,
            pending_amount: self.pending(&chosen),
            discount_amount: self.discount,
            grand_total: self.grand_total(&chosen),
            cash_amount,
            bank_amount,
            menu_type: self.menu_type,
            menus: chosen.iter().map(|m| m.id).collect(),
        })
    }
}

/// Payment received from a member
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedPayment {
    pub received_amount: Decimal,
    pub cash_amount: Decimal,
    pub bank_amount: Decimal,
    pub payment_method: PaymentMethod,
}

impl ReceivedPayment {
    /// Build the transaction payload; amounts not taken by the method are zeroed
    pub fn to_create(&self, mess_id: i64) -> AppResult<TransactionCreate> {
        if self.received_amount < Decimal::ZERO {
            return Err(AppError::new(ErrorCode::InvalidAmount));
        }
        let method = self.payment_method;
        let cash_amount = if method.takes_cash() { self.cash_amount } else { Decimal::ZERO };
        let bank_amount = if method.takes_bank() { self.bank_amount } else { Decimal::ZERO };
        Ok(TransactionCreate {
            mess: mess_id,
            received_amount: self.received_amount,
            cash_amount,
            bank_amount,
            payment_method: method,
            status: if self.received_amount > Decimal::ZERO {
                TransactionStatus::Completed
            } else {
                TransactionStatus::Pending
            },
        })
    }
}

/// Totals shown under a member's transaction list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionSummary {
    pub total_received: Decimal,
    pub total_cash: Decimal,
    pub total_bank: Decimal,
    /// Received but not yet accounted for as cash or bank
    pub pending: Decimal,
}

impl TransactionSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut summary = Self::default();
        for t in transactions {
            summary.total_received += t.received_amount;
            summary.total_cash += t.cash_amount;
            summary.total_bank += t.bank_amount;
        }
        summary.pending = summary.total_received - (summary.total_cash + summary.total_bank);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(id: i64, sub_total: i64, created_by: &str, day: DayOfWeek) -> Menu {
        Menu {
            id,
            name: day.as_str().to_string(),
            day_of_week: Some(day),
            sub_total: Decimal::new(sub_total, 0),
            is_custom: created_by != STANDARD_MENU_OWNER,
            mess_type: Some(1),
            created_by: Some(created_by.to_string()),
            menu_items: vec![],
        }
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_end_date_spans_whole_weeks() {
        assert_eq!(end_date(start(), 1), NaiveDate::from_ymd_opt(2024, 5, 7).unwrap());
        assert_eq!(end_date(start(), 4), NaiveDate::from_ymd_opt(2024, 5, 28).unwrap());
    }

    #[test]
    fn test_totals() {
        let menus = vec![
            menu(1, 30, "admin", DayOfWeek::Monday),
            menu(2, 20, "admin", DayOfWeek::Tuesday),
        ];
        let mut form = Enrollment::new("Faisal", "55501234", start());
        form.mess_type = Some(1);
        form.weeks = 3;
        form.discount = Decimal::new(10, 0);
        form.paid_amount = Decimal::new(100, 0);

        let create = form.to_create(&menus).unwrap();
        assert_eq!(create.total_amount, Decimal::new(150, 0));
        assert_eq!(create.grand_total, Decimal::new(140, 0));
        assert_eq!(create.pending_amount, Decimal::new(40, 0));
        assert_eq!(create.end_date, NaiveDate::from_ymd_opt(2024, 5, 21).unwrap());
        assert_eq!(create.menus, vec![1, 2]);
    }

    #[test]
    fn test_custom_menus_filtered_by_mobile() {
        let menus = vec![
            menu(1, 30, "55501234", DayOfWeek::Monday),
            menu(2, 25, "55509999", DayOfWeek::Monday),
        ];
        let mut form = Enrollment::new("Faisal", "55501234", start());
        form.mess_type = Some(1);
        form.menu_type = MenuType::CustomMenu;
        let create = form.to_create(&menus).unwrap();
        assert_eq!(create.menus, vec![1]);
        assert_eq!(create.total_amount, Decimal::new(30, 0));

        form.mobile_number = "0000".to_string();
        assert_eq!(form.to_create(&menus).unwrap_err().code, ErrorCode::MenuRequired);
    }

    #[test]
    fn test_enrollment_validation() {
        let menus = vec![menu(1, 30, "admin", DayOfWeek::Monday)];
        let mut form = Enrollment::new("Faisal", "55501234", start());
        assert_eq!(form.to_create(&menus).unwrap_err().code, ErrorCode::MessTypeRequired);
        form.mess_type = Some(2);
        form.weeks = 5;
        assert_eq!(form.to_create(&menus).unwrap_err().code, ErrorCode::InvalidWeeks);
        form.weeks = 0;
        assert_eq!(form.to_create(&menus).unwrap_err().code, ErrorCode::InvalidWeeks);
    }

    #[test]
    fn test_split_method_wire_name() {
        let menus = vec![menu(1, 30, "admin", DayOfWeek::Monday)];
        let mut form = Enrollment::new("Faisal", "55501234", start());
        form.mess_type = Some(1);
        form.payment_method = PaymentMethod::CashBank;
        let json = serde_json::to_value(form.to_create(&menus).unwrap()).unwrap();
        assert_eq!(json["payment_method"], "cash_and_bank");
        assert_eq!(json["menu_type"], "own_menu");
    }

    #[test]
    fn test_next_custom_day() {
        let existing = vec![menu(1, 10, "5550", DayOfWeek::Monday)];
        assert_eq!(next_custom_day(&existing).unwrap(), DayOfWeek::Tuesday);
        let full: Vec<Menu> = DayOfWeek::ALL
            .iter()
            .enumerate()
            .map(|(i, d)| menu(i as i64, 10, "5550", *d))
            .collect();
        assert_eq!(next_custom_day(&full).unwrap_err().code, ErrorCode::CustomMenuLimit);
    }

    #[test]
    fn test_received_payment_status_and_fields() {
        let payment = ReceivedPayment {
            received_amount: Decimal::new(200, 0),
            cash_amount: Decimal::new(120, 0),
            bank_amount: Decimal::new(80, 0),
            payment_method: PaymentMethod::Cash,
        };
        let create = payment.to_create(5).unwrap();
        assert_eq!(create.status, TransactionStatus::Completed);
        assert_eq!(create.bank_amount, Decimal::ZERO);
        assert_eq!(create.cash_amount, Decimal::new(120, 0));

        let nothing = ReceivedPayment {
            received_amount: Decimal::ZERO,
            ..payment
        };
        assert_eq!(nothing.to_create(5).unwrap().status, TransactionStatus::Pending);
    }

    #[test]
    fn test_transaction_summary_pending() {
        let tx = |received: i64, cash: i64, bank: i64| Transaction {
            id: 1,
            mess: Some(5),
            received_amount: Decimal::new(received, 0),
            cash_amount: Decimal::new(cash, 0),
            bank_amount: Decimal::new(bank, 0),
            payment_method: PaymentMethod::CashBank,
            status: TransactionStatus::Completed,
            date: None,
        };
        let summary = TransactionSummary::from_transactions(&[tx(100, 60, 40), tx(50, 20, 0)]);
        assert_eq!(summary.total_received, Decimal::new(150, 0));
        assert_eq!(summary.total_cash, Decimal::new(80, 0));
        assert_eq!(summary.total_bank, Decimal::new(40, 0));
        assert_eq!(summary.pending, Decimal::new(30, 0));
    }
}
