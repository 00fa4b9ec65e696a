use super::cart::checked_quantity;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{AppendedItem, Dish, Order, OrderItemsAppend};
use crate::util::round_money;
use rust_decimal::Decimal;

/// Products being added to an order that already exists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddProductsDraft {
    products: Vec<(Dish, u32)>,
}

impl AddProductsDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of `dish`; an existing line grows instead of duplicating
    pub fn add(&mut self, dish: &Dish, quantity: u32) -> AppResult<()> {
        if quantity < 1 {
            return Err(AppError::new(ErrorCode::InvalidQuantity));
        }
        match self.products.iter_mut().find(|(d, _)| d.id == dish.id) {
            Some((_, q)) => *q = checked_quantity(*q, quantity)?,
            None => self.products.push((dish.clone(), quantity)),
        }
        Ok(())
    }

    /// Overwrite a line's quantity, never below one
    pub fn set_quantity(&mut self, dish_id: i64, quantity: u32) {
        if let Some((_, q)) = self.products.iter_mut().find(|(d, _)| d.id == dish_id) {
            *q = quantity.max(1);
        }
    }

    pub fn remove(&mut self, dish_id: i64) {
        self.products.retain(|(d, _)| d.id != dish_id);
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn products(&self) -> &[(Dish, u32)] {
        &self.products
    }

    /// Sum of the added lines
    pub fn added_total(&self) -> Decimal {
        round_money(
            self.products
                .iter()
                .map(|(d, q)| d.price * Decimal::from(*q))
                .sum(),
        )
    }

    /// Build the PUT payload: new lines plus the order's grown total
    pub fn payload(&self, order: &Order) -> AppResult<OrderItemsAppend> {
        if !order.accepts_items() {
            return Err(AppError::new(ErrorCode::OrderLocked)
                .with_detail("status", order.status.as_str()));
        }
        if self.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }
        Ok(OrderItemsAppend {
            items: self
                .products
                .iter()
                .map(|(d, q)| AppendedItem {
                    dish: d.id,
                    quantity: *q,
                    total_amount: round_money(d.price * Decimal::from(*q)),
                })
                .collect(),
            total_amount: order.total_amount + self.added_total(),
        })
    }
}
