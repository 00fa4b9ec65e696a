//! Orders screen
//!
//! Holds one server page of orders. Status changes are shown immediately and
//! rolled back when printing or the API call fails.

use super::confirm::{Confirm, DELETE_CONFIRMATION};
use crate::api::DineClient;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::receipt::PrintStation;
use dine_printer::Printer;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Order, OrderItem, OrderPaymentUpdate, OrderStatus, OrderType, OrderTypeChange,
};
use shared::order::{AddProductsDraft, BillKind, PaymentSelection, StatusAction, StatusFlow};
use shared::response::{Pager, Paginated};
use tracing::{info, instrument, warn};

/// Result of an action that also prints
#[derive(Debug)]
pub struct BoardOutcome {
    pub order: Order,
    /// Receipt that went out, if any
    pub printed: Option<BillKind>,
    /// Print failure after the change was already saved
    pub print_error: Option<ClientError>,
}

pub struct OrderBoard<'a, C: HttpClient, P: Printer> {
    client: &'a DineClient<C>,
    station: &'a PrintStation<P>,
    page: u32,
    orders: Paginated<Order>,
    loaded: bool,
}

impl<'a, C: HttpClient, P: Printer> OrderBoard<'a, C, P> {
    pub fn new(client: &'a DineClient<C>, station: &'a PrintStation<P>) -> Self {
        Self {
            client,
            station,
            page: 1,
            orders: Paginated::default(),
            loaded: false,
        }
    }

    #[instrument(skip(self))]
    pub async fn load(&mut self, page: u32) -> ClientResult<&[Order]> {
        let page = page.max(1);
        self.orders = self.client.orders(page).await?;
        self.page = page;
        self.loaded = true;
        Ok(&self.orders.results)
    }

    pub async fn refresh(&mut self) -> ClientResult<&[Order]> {
        self.load(self.page).await
    }

    pub async fn next_page(&mut self) -> ClientResult<&[Order]> {
        if self.orders.has_next() {
            self.load(self.page + 1).await
        } else {
            Ok(&self.orders.results)
        }
    }

    pub async fn previous_page(&mut self) -> ClientResult<&[Order]> {
        if self.page > 1 {
            self.load(self.page - 1).await
        } else {
            Ok(&self.orders.results)
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders.results
    }

    pub fn pager(&self) -> Pager {
        Pager::for_envelope(self.page, self.client.page_size(), &self.orders)
    }

    pub fn find(&self, id: i64) -> Option<&Order> {
        self.orders.results.iter().find(|o| o.id == id)
    }

    fn set_local_status(&mut self, id: i64, status: OrderStatus) {
        if let Some(order) = self.orders.results.iter_mut().find(|o| o.id == id) {
            order.status = status;
        }
    }

    fn replace_local(&mut self, order: &Order) {
        if let Some(slot) = self.orders.results.iter_mut().find(|o| o.id == order.id) {
            *slot = order.clone();
        }
    }

    async fn order(&self, id: i64) -> ClientResult<Order> {
        match self.find(id) {
            Some(order) => Ok(order.clone()),
            None => self.client.order(id).await,
        }
    }

    /// Reload the shown page; a board that never loaded has nothing to refresh
    async fn refetch(&mut self) {
        if !self.loaded {
            return;
        }
        if let Err(e) = self.refresh().await {
            warn!(error = %e, "Order list refresh failed");
        }
    }

    /// Run a status change: confirm, print, update, in the planned order
    #[instrument(skip(self, payment, confirm))]
    pub async fn change_status(
        &mut self,
        id: i64,
        action: StatusAction,
        payment: Option<&PaymentSelection>,
        bill: Option<BillKind>,
        confirm: &dyn Confirm,
    ) -> ClientResult<BoardOutcome> {
        let order = self.order(id).await?;
        let plan = StatusFlow::plan(&order, action, payment, bill)?;

        if let Some(c) = &plan.confirmation {
            if !confirm.confirm(c) {
                return Err(AppError::cancelled().into());
            }
        }

        // Receipt shows the payment being recorded
        let mut receipt = order.clone();
        if plan.update.payment_method.is_some() {
            receipt.payment_method = plan.update.payment_method;
            receipt.cash_amount = plan.update.cash_amount;
            receipt.bank_amount = plan.update.bank_amount;
            receipt.credit_user_id = plan.update.credit_user_id;
        }

        self.set_local_status(id, plan.target());

        if plan.print_before {
            if let Some(kind) = plan.print {
                if let Err(e) = self.station.print_bill(kind, &receipt).await {
                    self.set_local_status(id, plan.previous);
                    return Err(e);
                }
            }
        }

        let updated = match self.client.update_order_status(id, &plan.update).await {
            Ok(updated) => updated,
            Err(e) => {
                warn!(error = %e, previous = %plan.previous, "Status change failed, reverting");
                self.set_local_status(id, plan.previous);
                return Err(e);
            }
        };
        info!(status = %updated.status, "Order status changed");
        self.replace_local(&updated);

        let mut print_error = None;
        if !plan.print_before {
            if let Some(kind) = plan.print {
                if let Err(e) = self.station.print_bill(kind, &receipt).await {
                    warn!(error = %e, "Receipt not printed after status change");
                    print_error = Some(e);
                }
            }
        }

        self.refetch().await;
        Ok(BoardOutcome {
            order: updated,
            printed: plan.print.filter(|_| print_error.is_none()),
            print_error,
        })
    }

    /// Append products; approved orders get a kitchen ticket of the new items
    #[instrument(skip(self, draft))]
    pub async fn add_products(
        &mut self,
        id: i64,
        draft: &AddProductsDraft,
    ) -> ClientResult<BoardOutcome> {
        let order = self.order(id).await?;
        let payload = draft.payload(&order)?;
        let updated = self.client.append_order_items(id, &payload).await?;
        self.replace_local(&updated);

        let mut printed = None;
        let mut print_error = None;
        if updated.status == OrderStatus::Approved {
            let mut ticket = updated.clone();
            ticket.items = draft
                .products()
                .iter()
                .map(|(dish, quantity)| OrderItem {
                    id: None,
                    dish: dish.id,
                    dish_name: Some(dish.name.clone()),
                    quantity: *quantity,
                    price: Some(dish.price),
                    is_newly_added: true,
                })
                .collect();
            match self.station.print_bill(BillKind::Kitchen, &ticket).await {
                Ok(()) => printed = Some(BillKind::Kitchen),
                Err(e) => {
                    warn!(error = %e, "Kitchen ticket for added items not printed");
                    print_error = Some(e);
                }
            }
        }

        self.refetch().await;
        Ok(BoardOutcome {
            order: updated,
            printed,
            print_error,
        })
    }

    /// Record or correct an order's payment
    pub async fn update_payment(
        &mut self,
        id: i64,
        payment: &PaymentSelection,
    ) -> ClientResult<Order> {
        let order = self.order(id).await?;
        let payment = if payment.total() == order.total_amount {
            payment.clone()
        } else {
            PaymentSelection::new(payment.method(), order.total_amount)
                .with_credit_user(payment.credit_user_id())
        };
        payment.validate()?;
        let update = OrderPaymentUpdate {
            payment_method: payment.method(),
            cash_amount: payment.cash_amount(),
            bank_amount: payment.bank_amount(),
            credit_user_id: payment.credit_field(),
        };
        let updated = self.client.update_order_payment(id, &update).await?;
        self.replace_local(&updated);
        Ok(updated)
    }

    /// Switch dining/takeaway/delivery; delivery needs an address and a driver
    pub async fn change_type(&mut self, id: i64, change: &OrderTypeChange) -> ClientResult<Order> {
        let order = self.order(id).await?;
        if order.status.is_terminal() {
            return Err(AppError::new(ErrorCode::OrderLocked).into());
        }
        if change.order_type == OrderType::Delivery {
            if change.address.as_deref().is_none_or(|a| a.trim().is_empty()) {
                return Err(AppError::new(ErrorCode::DeliveryAddressRequired).into());
            }
            if change.delivery_driver_id.is_none() {
                return Err(AppError::new(ErrorCode::DeliveryDriverRequired).into());
            }
        }
        let updated = self.client.change_order_type(id, change).await?;
        self.replace_local(&updated);
        Ok(updated)
    }

    /// Delete after confirmation; a declined dialog is a no-op
    pub async fn delete(&mut self, id: i64, confirm: &dyn Confirm) -> ClientResult<bool> {
        if !confirm.confirm(&DELETE_CONFIRMATION) {
            return Ok(false);
        }
        self.client.delete_order(id).await?;
        self.orders.results.retain(|o| o.id != id);
        self.refetch().await;
        Ok(true)
    }
}
