use super::{payment_selection, print_pager};
use crate::cli::{ItemArg, OrdersSubcommand};
use crate::context::Context;
use crate::error::CliResult;
use chrono::Local;
use dine_client::pages::{BoardOutcome, OrderBoard};
use shared::error::{AppError, ErrorCode};
use shared::models::{Order, OrderTypeChange};
use shared::order::AddProductsDraft;
use shared::util::format_money;

fn print_row(order: &Order) {
    let created = order.created_at.with_timezone(&Local);
    println!(
        "{:>6}  {}  {:<9} {:<10} {:>12}  {}",
        order.id,
        created.format("%d/%m %H:%M"),
        order.order_type.as_str(),
        order.status.as_str(),
        format_money(order.total_amount),
        order.payment_method.map(|m| m.as_str()).unwrap_or("-"),
    );
}

fn print_detail(order: &Order) {
    print_row(order);
    if let Some(invoice) = &order.invoice_number {
        println!("        Invoice {invoice}");
    }
    for item in &order.items {
        let name = item
            .dish_name
            .clone()
            .unwrap_or_else(|| format!("Dish #{}", item.dish));
        let added = if item.is_newly_added { "  (new)" } else { "" };
        println!("        {:>3} x {name}{added}", item.quantity);
    }
    if let Some(name) = order.customer_name.as_deref().filter(|s| !s.is_empty()) {
        println!("        Customer {name}");
    }
    if let Some(address) = order.address.as_deref().filter(|s| !s.is_empty()) {
        println!("        Address {address}");
    }
    if let Some(note) = order.kitchen_note.as_deref().filter(|s| !s.is_empty()) {
        println!("        Note {note}");
    }
}

fn report(outcome: &BoardOutcome) {
    print_row(&outcome.order);
    if let Some(kind) = outcome.printed {
        println!("Printed {kind:?} receipt");
    }
    if let Some(err) = &outcome.print_error {
        eprintln!("Saved, but the receipt was not printed: {err}");
    }
}

async fn draft(ctx: &Context, items: &[ItemArg]) -> CliResult<AddProductsDraft> {
    let mut draft = AddProductsDraft::new();
    for item in items {
        let dish = ctx.client.dish(item.dish).await?;
        draft.add(&dish, item.quantity)?;
    }
    Ok(draft)
}

pub async fn run(ctx: &mut Context, command: OrdersSubcommand) -> CliResult<()> {
    match command {
        OrdersSubcommand::List { page } => {
            let mut board = OrderBoard::new(&ctx.client, &ctx.station);
            board.load(page).await?;
            board.orders().iter().for_each(print_row);
            print_pager(&board.pager());
        }
        OrdersSubcommand::Show { id } => {
            print_detail(&ctx.client.order(id).await?);
        }
        OrdersSubcommand::Status {
            id,
            status,
            bill,
            payment,
        } => {
            ctx.load_catalog().await?;
            let order = ctx.client.order(id).await?;
            let payment = payment_selection(&payment, order.total_amount);
            let mut board = OrderBoard::new(&ctx.client, &ctx.station);
            let outcome = board
                .change_status(id, status, payment.as_ref(), Some(bill), ctx.confirm())
                .await?;
            report(&outcome);
        }
        OrdersSubcommand::Add { id, items } => {
            let draft = draft(ctx, &items).await?;
            ctx.load_catalog().await?;
            let mut board = OrderBoard::new(&ctx.client, &ctx.station);
            let outcome = board.add_products(id, &draft).await?;
            report(&outcome);
        }
        OrdersSubcommand::Pay { id, payment } => {
            let order = ctx.client.order(id).await?;
            let payment = payment_selection(&payment, order.total_amount)
                .ok_or_else(|| AppError::new(ErrorCode::PaymentMethodRequired))?;
            let mut board = OrderBoard::new(&ctx.client, &ctx.station);
            let updated = board.update_payment(id, &payment).await?;
            print_row(&updated);
        }
        OrdersSubcommand::ChangeType {
            id,
            order_type,
            address,
            customer,
            phone,
            driver,
            delivery_charge,
        } => {
            let change = OrderTypeChange {
                order_type: order_type.into(),
                address,
                customer_name: customer,
                customer_phone_number: phone,
                delivery_driver_id: driver,
                delivery_charge,
            };
            let mut board = OrderBoard::new(&ctx.client, &ctx.station);
            let updated = board.change_type(id, &change).await?;
            print_row(&updated);
        }
        OrdersSubcommand::Print { id, bill } => {
            ctx.load_catalog().await?;
            let order = ctx.client.order(id).await?;
            ctx.station.print_bill(bill, &order).await?;
        }
        OrdersSubcommand::Delete { id } => {
            let mut board = OrderBoard::new(&ctx.client, &ctx.station);
            if board.delete(id, ctx.confirm()).await? {
                println!("Order #{id} deleted");
            } else {
                println!("Kept order #{id}");
            }
        }
    }
    Ok(())
}
