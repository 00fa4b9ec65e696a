//! Receipt rendering
//!
//! Kitchen tickets (quantities only), customer sales receipts, and the sales
//! and mess report prints. Everything goes through [`EscPosBuilder`], so the
//! same [`Ticket`] feeds a thermal printer or a text preview.

use crate::error::ClientResult;
use chrono::Local;
use dine_printer::{EscPosBuilder, Encoding, Printer, Ticket, WIDTH_80MM, pad_width};
use rust_decimal::Decimal;
use shared::models::{Dish, Mess, Order, OrderItem, OrderType, PaymentMethod, TimeRange};
use shared::order::BillKind;
use shared::util::{format_money, round_money};
use std::collections::HashMap;
use tracing::{info, instrument};

/// Paper and header settings
#[derive(Debug, Clone)]
pub struct ReceiptConfig {
    pub width: usize,
    pub encoding: Encoding,
    /// Restaurant name printed on top of every receipt
    pub header: String,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            width: WIDTH_80MM,
            encoding: Encoding::Ascii,
            header: "RESTAURANT".to_string(),
        }
    }
}

/// Renders receipts, resolving dish names and prices from the catalog
pub struct ReceiptRenderer<'a> {
    config: &'a ReceiptConfig,
    dishes: HashMap<i64, &'a Dish>,
}

impl<'a> ReceiptRenderer<'a> {
    pub fn new(config: &'a ReceiptConfig, dishes: &'a [Dish]) -> Self {
        Self {
            config,
            dishes: dishes.iter().map(|d| (d.id, d)).collect(),
        }
    }

    fn builder(&self) -> EscPosBuilder {
        EscPosBuilder::new(self.config.width).with_encoding(self.config.encoding)
    }

    fn item_name(&self, item: &OrderItem) -> String {
        item.dish_name
            .clone()
            .or_else(|| self.dishes.get(&item.dish).map(|d| d.name.clone()))
            .unwrap_or_else(|| format!("Dish #{}", item.dish))
    }

    fn item_price(&self, item: &OrderItem) -> Decimal {
        item.price
            .or_else(|| self.dishes.get(&item.dish).map(|d| d.price))
            .unwrap_or(Decimal::ZERO)
    }

    pub fn render(&self, kind: BillKind, order: &Order) -> Ticket {
        match kind {
            BillKind::Kitchen => self.kitchen(order),
            BillKind::Sales => self.sales(order),
        }
    }

    fn order_header(&self, b: &mut EscPosBuilder, title: &str, order: &Order) {
        b.center().bold().line(&self.config.header).bold_off();
        b.double_height().line(title).reset_size();
        b.left().sep_double();
        let created = order.created_at.with_timezone(&Local);
        b.line_lr(&format!("Order #{}", order.id), order_type_label(order.order_type));
        b.line_lr(
            &created.format("%d %b %Y").to_string(),
            &created.format("%H:%M:%S").to_string(),
        );
        if let Some(invoice) = &order.invoice_number {
            b.line_lr("Invoice", invoice);
        }
        if order.order_type == OrderType::Delivery {
            if let Some(name) = order.customer_name.as_deref().filter(|s| !s.is_empty()) {
                b.line(&format!("Customer: {name}"));
            }
            if let Some(phone) = order.customer_phone_number.as_deref().filter(|s| !s.is_empty()) {
                b.line(&format!("Phone: {phone}"));
            }
            if let Some(address) = order.address.as_deref().filter(|s| !s.is_empty()) {
                b.line(&format!("Address: {address}"));
            }
        }
    }

    /// Kitchen ticket: regular items, then the newly added ones
    pub fn kitchen(&self, order: &Order) -> Ticket {
        let mut b = self.builder();
        self.order_header(&mut b, "KITCHEN", order);

        let (added, regular): (Vec<&OrderItem>, Vec<&OrderItem>) =
            order.items.iter().partition(|i| i.is_newly_added);

        if !regular.is_empty() {
            self.kitchen_items(&mut b, &regular);
        }
        if !added.is_empty() {
            b.newline().center().bold().line("NEWLY ADDED").bold_off().left();
            self.kitchen_items(&mut b, &added);
        }
        if let Some(note) = order.kitchen_note.as_deref().filter(|s| !s.is_empty()) {
            b.sep_single().bold().line(&format!("Note: {note}")).bold_off();
        }
        b.sep_double().cut_feed(4);
        b.build()
    }

    fn kitchen_items(&self, b: &mut EscPosBuilder, items: &[&OrderItem]) {
        b.sep_single().line_lr("Item", "Qty").sep_single();
        b.double_height();
        for item in items {
            b.line_lr(&self.item_name(item), &item.quantity.to_string());
        }
        b.reset_size();
    }

    /// Customer receipt with prices, totals and payment
    pub fn sales(&self, order: &Order) -> Ticket {
        let mut b = self.builder();
        self.order_header(&mut b, "INVOICE", order);

        b.sep_single().item_row("Item", "Qty", "Amount").sep_single();
        let mut subtotal = Decimal::ZERO;
        for item in &order.items {
            let price = self.item_price(item);
            let line_total = round_money(price * Decimal::from(item.quantity));
            subtotal += line_total;
            b.item_row(
                &self.item_name(item),
                &item.quantity.to_string(),
                &format!("{line_total:.2}"),
            );
            b.line(&format!("  @ {price:.2}"));
        }
        b.sep_single();
        b.line_lr("Total quantity", &order.total_quantity().to_string());
        b.line_lr("Subtotal", &format_money(subtotal));
        if let Some(charge) = order.delivery_charge.filter(|c| !c.is_zero()) {
            b.line_lr("Delivery charge", &format_money(charge));
        }
        b.bold().double_height();
        b.line_lr("TOTAL", &format_money(order.total_amount));
        b.reset_size().bold_off();

        if let Some(method) = order.payment_method {
            b.sep_single().line_lr("Payment", payment_label(method));
            if method == PaymentMethod::CashBank {
                b.line_lr("  Cash", &format_money(order.cash_amount.unwrap_or_default()));
                b.line_lr("  Bank", &format_money(order.bank_amount.unwrap_or_default()));
            }
        }
        b.sep_double().center().line("Thank you!").left();
        b.cut_feed(4);
        b.build()
    }

    /// Sales report table, one row per order
    pub fn sales_report(&self, range: TimeRange, orders: &[Order]) -> Ticket {
        let mut b = self.builder();
        b.center().bold().line(&self.config.header).line("SALES REPORT").bold_off();
        b.line(&format!("Period: {range}")).left().sep_double();

        let mut total = Decimal::ZERO;
        let mut cash = Decimal::ZERO;
        let mut bank = Decimal::ZERO;
        for order in orders {
            let created = order.created_at.with_timezone(&Local);
            let invoice = order.invoice_number.as_deref().unwrap_or("-");
            b.line_lr(
                &format!("#{} {}", order.id, invoice),
                &created.format("%d/%m/%Y").to_string(),
            );
            let method = order.payment_method.map(payment_label).unwrap_or("-");
            b.line_lr(
                &format!("  {} / {}", order_type_label(order.order_type), method),
                &format!("{:.2}", order.total_amount),
            );
            total += order.total_amount;
            cash += order.cash_amount.unwrap_or_default();
            bank += order.bank_amount.unwrap_or_default();
        }
        b.sep_single();
        b.line_lr("Orders", &orders.len().to_string());
        b.line_lr("Cash", &format_money(cash));
        b.line_lr("Bank", &format_money(bank));
        b.bold().line_lr("Total", &format_money(total)).bold_off();
        b.sep_double().cut_feed(4);
        b.build()
    }

    /// Mess report table, one row per member
    pub fn mess_report(&self, range: TimeRange, members: &[Mess]) -> Ticket {
        let mut b = self.builder();
        b.center().bold().line(&self.config.header).line("MESS REPORT").bold_off();
        b.line(&format!("Period: {range}")).left().sep_double();

        let mut total = Decimal::ZERO;
        let mut paid = Decimal::ZERO;
        let mut pending = Decimal::ZERO;
        for m in members {
            let mess_type = m.mess_type.name().unwrap_or("-");
            b.line_lr(&format!("{} ({})", m.customer_name, m.mobile_number), mess_type);
            b.line(&format!(
                "  {} - {}",
                m.start_date.format("%d/%m/%Y"),
                m.end_date.format("%d/%m/%Y")
            ));
            b.line(&format!(
                "  {}{}Due {:.2}",
                pad_width(&format!("Total {:.2}", m.total_amount), 16, false),
                pad_width(&format!("Paid {:.2}", m.paid_amount), 16, false),
                m.pending_amount
            ));
            total += m.total_amount;
            paid += m.paid_amount;
            pending += m.pending_amount;
        }
        b.sep_single();
        b.line_lr("Members", &members.len().to_string());
        b.line_lr("Total", &format_money(total));
        b.line_lr("Paid", &format_money(paid));
        b.bold().line_lr("Pending", &format_money(pending)).bold_off();
        b.sep_double().cut_feed(4);
        b.build()
    }
}

/// Printer plus everything needed to render for it
pub struct PrintStation<P: Printer> {
    printer: P,
    config: ReceiptConfig,
    dishes: Vec<Dish>,
}

impl<P: Printer> PrintStation<P> {
    pub fn new(printer: P, config: ReceiptConfig) -> Self {
        Self {
            printer,
            config,
            dishes: Vec::new(),
        }
    }

    /// Catalog used to name and price items the order only references by id
    pub fn with_dishes(mut self, dishes: Vec<Dish>) -> Self {
        self.dishes = dishes;
        self
    }

    pub fn set_dishes(&mut self, dishes: Vec<Dish>) {
        self.dishes = dishes;
    }

    pub fn renderer(&self) -> ReceiptRenderer<'_> {
        ReceiptRenderer::new(&self.config, &self.dishes)
    }

    pub fn printer(&self) -> &P {
        &self.printer
    }

    #[instrument(skip(self, order), fields(order_id = order.id))]
    pub async fn print_bill(&self, kind: BillKind, order: &Order) -> ClientResult<()> {
        let ticket = self.renderer().render(kind, order);
        self.printer.print(&ticket).await?;
        info!(?kind, "Receipt printed");
        Ok(())
    }

    pub async fn print_ticket(&self, ticket: &Ticket) -> ClientResult<()> {
        self.printer.print(ticket).await?;
        Ok(())
    }
}

fn order_type_label(order_type: OrderType) -> &'static str {
    match order_type {
        OrderType::Dining => "Dine-in",
        OrderType::Takeaway => "Takeaway",
        OrderType::Delivery => "Delivery",
    }
}

fn payment_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "Cash",
        PaymentMethod::Bank => "Bank",
        PaymentMethod::CashBank => "Cash + Bank",
        PaymentMethod::Credit => "Credit",
    }
}
