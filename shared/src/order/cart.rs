use super::payment::PaymentSelection;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{Dish, OrderCreate, OrderItemInput, OrderStatus, OrderType};
use crate::util::{non_blank, round_money};
use rust_decimal::Decimal;

/// Dish with the quantity ordered
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub dish: Dish,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.dish.price * Decimal::from(self.quantity)
    }
}

/// New order being built on the dish grid
///
/// Adding a dish that is already in the cart bumps its quantity; a line whose
/// quantity reaches zero disappears.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one of `dish`
    pub fn add(&mut self, dish: &Dish) -> AppResult<()> {
        self.add_quantity(dish, 1)
    }

    /// Add `quantity` of `dish`; a line that would overflow is left untouched
    pub fn add_quantity(&mut self, dish: &Dish, quantity: u32) -> AppResult<()> {
        if quantity == 0 {
            return Ok(());
        }
        match self.lines.iter_mut().find(|l| l.dish.id == dish.id) {
            Some(line) => line.quantity = checked_quantity(line.quantity, quantity)?,
            None => self.lines.push(CartLine {
                dish: dish.clone(),
                quantity,
            }),
        }
        Ok(())
    }

    /// Apply a +/- change to a line, dropping it at zero
    pub fn change_quantity(&mut self, dish_id: i64, change: i64) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.dish.id == dish_id) {
            let next = i64::from(line.quantity)
                .saturating_add(change)
                .clamp(0, i64::from(u32::MAX));
            line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        }
        self.lines.retain(|l| l.quantity > 0);
    }

    pub fn set_quantity(&mut self, dish_id: i64, quantity: u32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.dish.id == dish_id) {
            line.quantity = quantity;
        }
        self.lines.retain(|l| l.quantity > 0);
    }

    pub fn remove(&mut self, dish_id: i64) {
        self.lines.retain(|l| l.dish.id != dish_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn total(&self) -> Decimal {
        round_money(self.lines.iter().map(CartLine::line_total).sum())
    }

    /// Validate the checkout form and build the create-order payload
    pub fn checkout(&self, form: &CheckoutForm) -> AppResult<OrderCreate> {
        if self.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }

        let is_delivery = form.order_type == OrderType::Delivery;
        let address = non_blank(&form.address);
        if is_delivery && address.is_none() {
            return Err(AppError::new(ErrorCode::DeliveryAddressRequired)
                .with_detail("field", "address"));
        }
        if is_delivery && form.delivery_driver_id.is_none() {
            return Err(AppError::new(ErrorCode::DeliveryDriverRequired)
                .with_detail("field", "delivery_driver_id"));
        }

        let total = self.total();
        let payment = match &form.payment {
            Some(p) if p.total() == total => p.clone(),
            Some(p) => PaymentSelection::new(p.method(), total)
                .with_credit_user(p.credit_user_id()),
            None => return Err(AppError::new(ErrorCode::PaymentMethodRequired)),
        };
        payment.validate()?;
        let (cash_amount, bank_amount) = payment.split_fields();

        Ok(OrderCreate {
            items: self
                .lines
                .iter()
                .map(|l| OrderItemInput {
                    dish: l.dish.id,
                    quantity: l.quantity,
                })
                .collect(),
            total_amount: total,
            status: OrderStatus::Pending,
            order_type: form.order_type,
            payment_method: Some(payment.method()),
            cash_amount,
            bank_amount,
            customer_name: form.customer_name.trim().to_string(),
            address: if is_delivery {
                address.unwrap_or_default()
            } else {
                String::new()
            },
            customer_phone_number: form.customer_phone_number.trim().to_string(),
            delivery_charge: if is_delivery {
                form.delivery_charge
            } else {
                Decimal::ZERO
            },
            delivery_driver_id: if is_delivery {
                form.delivery_driver_id
            } else {
                None
            },
            credit_user_id: payment.credit_field(),
            kitchen_note: form.kitchen_note.as_deref().and_then(non_blank),
        })
    }
}

/// Grow a line quantity, rejecting overflow
pub(crate) fn checked_quantity(current: u32, added: u32) -> AppResult<u32> {
    current.checked_add(added).ok_or_else(|| {
        AppError::with_message(ErrorCode::InvalidQuantity, "Quantity is too large")
            .with_detail("quantity", current)
    })
}

/// Checkout panel input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutForm {
    pub order_type: OrderType,
    pub customer_name: String,
    pub customer_phone_number: String,
    pub address: String,
    pub delivery_charge: Decimal,
    pub delivery_driver_id: Option<i64>,
    pub payment: Option<PaymentSelection>,
    pub kitchen_note: Option<String>,
}
