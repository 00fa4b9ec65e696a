use super::payment::PaymentSelection;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{Order, OrderStatus, OrderStatusUpdate};
use std::fmt;
use std::str::FromStr;

/// Which receipt to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BillKind {
    /// Items and quantities for the kitchen, no prices
    Kitchen,
    /// Customer receipt with prices and payment
    #[default]
    Sales,
}

impl FromStr for BillKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kitchen" => Ok(Self::Kitchen),
            "sales" => Ok(Self::Sales),
            other => Err(format!("unknown bill type: {}", other)),
        }
    }
}

/// Choice made in an order's status dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Pending,
    Approved,
    Delivered,
    /// Mark delivered, print only the kitchen ticket
    DeliverWithoutBill,
    Cancelled,
}

impl StatusAction {
    /// Status the server ends up with
    pub fn target(&self) -> OrderStatus {
        match self {
            Self::Pending => OrderStatus::Pending,
            Self::Approved => OrderStatus::Approved,
            Self::Delivered | Self::DeliverWithoutBill => OrderStatus::Delivered,
            Self::Cancelled => OrderStatus::Cancelled,
        }
    }
}

impl FromStr for StatusAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(Self::Pending),
            "approved" | "approve" => Ok(Self::Approved),
            "delivered" | "deliver" => Ok(Self::Delivered),
            "order_without_bill" | "without_bill" => Ok(Self::DeliverWithoutBill),
            "cancelled" | "cancel" => Ok(Self::Cancelled),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

impl fmt::Display for StatusAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeliverWithoutBill => f.write_str("order_without_bill"),
            other => f.write_str(other.target().as_str()),
        }
    }
}

/// Confirmation dialog text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub title: &'static str,
    pub text: &'static str,
}

/// Steps to carry out for a status change, in order:
/// confirm, print (if `print_before`), update, print (otherwise)
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlan {
    pub order_id: i64,
    pub action: StatusAction,
    pub previous: OrderStatus,
    pub confirmation: Option<Confirmation>,
    pub print: Option<BillKind>,
    pub print_before: bool,
    pub update: OrderStatusUpdate,
}

impl TransitionPlan {
    pub fn target(&self) -> OrderStatus {
        self.update.status
    }
}

/// Planner for order status changes
pub struct StatusFlow;

impl StatusFlow {
    /// Plan a status change for `order`
    ///
    /// Delivered and cancelled orders are locked. Delivering needs a valid
    /// payment selection, whose fields ride along on the update.
    pub fn plan(
        order: &Order,
        action: StatusAction,
        payment: Option<&PaymentSelection>,
        bill: Option<BillKind>,
    ) -> AppResult<TransitionPlan> {
        if order.status.is_terminal() {
            return Err(AppError::new(ErrorCode::OrderLocked)
                .with_detail("status", order.status.as_str()));
        }
        if action.target() == order.status {
            return Err(AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("Order is already {}", order.status),
            ));
        }

        let mut plan = TransitionPlan {
            order_id: order.id,
            action,
            previous: order.status,
            confirmation: None,
            print: None,
            print_before: true,
            update: OrderStatusUpdate::status(action.target()),
        };

        match action {
            StatusAction::Pending => {}
            StatusAction::Approved => {
                plan.print = Some(BillKind::Kitchen);
            }
            StatusAction::Delivered => {
                let payment = payment.ok_or_else(|| AppError::new(ErrorCode::PaymentMethodRequired))?;
                let payment = if payment.total() == order.total_amount {
                    payment.clone()
                } else {
                    PaymentSelection::new(payment.method(), order.total_amount)
                        .with_credit_user(payment.credit_user_id())
                };
                payment.validate()?;
                let (cash, bank) = payment.split_fields();
                plan.update.payment_method = Some(payment.method());
                plan.update.cash_amount = cash;
                plan.update.bank_amount = bank;
                plan.update.credit_user_id = payment.credit_field();
                plan.print = Some(bill.unwrap_or_default());
            }
            StatusAction::DeliverWithoutBill => {
                plan.confirmation = Some(Confirmation {
                    title: "Continue without Bill?",
                    text: "Do you want to continue without generating a bill?",
                });
                plan.print = Some(BillKind::Kitchen);
                plan.print_before = false;
            }
            StatusAction::Cancelled => {
                plan.confirmation = Some(Confirmation {
                    title: "Are you sure?",
                    text: "Do you want to cancel the order?",
                });
            }
        }

        Ok(plan)
    }
}
