use super::mess::print_member;
use crate::cli::ReportsSubcommand;
use crate::context::Context;
use crate::error::CliResult;
use chrono::Local;
use dine_client::pages::{Dashboard, guard};
use rust_decimal::Decimal;
use shared::models::{OrderCustomerUpdate, TimeRange};
use shared::util::format_money;

pub async fn run(ctx: &Context, command: ReportsSubcommand) -> CliResult<()> {
    match command {
        ReportsSubcommand::Sales { range, print } => sales_report(ctx, range, print).await,
        ReportsSubcommand::Mess { range, print } => mess_report(ctx, range, print).await,
        ReportsSubcommand::EditOrder {
            id,
            customer,
            phone,
        } => {
            let update = OrderCustomerUpdate {
                customer_name: customer.map(|c| c.trim().to_string()),
                customer_phone_number: phone.map(|p| p.trim().to_string()),
            };
            let order = ctx.client.update_order_customer(id, &update).await?;
            println!(
                "Order #{}: {} {}",
                order.id,
                order.customer_name.as_deref().unwrap_or("-"),
                order.customer_phone_number.as_deref().unwrap_or("-"),
            );
            Ok(())
        }
        ReportsSubcommand::Analytics => {
            let analytics = ctx.client.order_analytics().await?;
            for day in &analytics.daily_sales {
                println!(
                    "{:<12} {:>5} orders  {:>12}",
                    day.date,
                    day.order_count,
                    format_money(day.total_sales)
                );
            }
            println!("Income          {}", format_money(analytics.total_income));
            println!("New customers   {}", analytics.new_customers);
            Ok(())
        }
    }
}

async fn sales_report(ctx: &Context, range: TimeRange, print: bool) -> CliResult<()> {
    let orders = ctx.client.sales_report(range).await?;
    for order in &orders {
        println!(
            "{:>6}  {:<14} {}  {:<9} {:<10} {:>12}",
            order.id,
            order.invoice_number.as_deref().unwrap_or("-"),
            order.created_at.with_timezone(&Local).format("%d/%m/%Y %H:%M"),
            order.order_type.as_str(),
            order.payment_method.map(|m| m.as_str()).unwrap_or("-"),
            format_money(order.total_amount),
        );
    }
    let total = orders.iter().map(|o| o.total_amount).sum();
    println!("{} orders, {}", orders.len(), format_money(total));
    if print {
        let ticket = ctx.station.renderer().sales_report(range, &orders);
        ctx.station.print_ticket(&ticket).await?;
    }
    Ok(())
}

pub(super) async fn mess_report(ctx: &Context, range: TimeRange, print: bool) -> CliResult<()> {
    let members = ctx.client.mess_report(range).await?;
    members.iter().for_each(print_member);
    let pending = members.iter().map(|m| m.pending_amount).sum();
    println!("{} members, {} pending", members.len(), format_money(pending));
    if print {
        let ticket = ctx.station.renderer().mess_report(range, &members);
        ctx.station.print_ticket(&ticket).await?;
    }
    Ok(())
}

fn trend(change: Decimal) -> String {
    if change.is_sign_negative() {
        format!("{change}%")
    } else {
        format!("+{change}%")
    }
}

pub async fn dashboard(ctx: &Context, range: TimeRange) -> CliResult<()> {
    let mut dashboard = Dashboard::new(range);
    let data = match guard(dashboard.refresh(&ctx.client)).await {
        Ok(data) => data,
        Err(_) if ctx.client.session().token_expired().await => {
            return Err(dine_client::ClientError::TokenExpired.into());
        }
        Err(message) => {
            eprintln!("{message}");
            return Ok(());
        }
    };
    println!("Period          {range}");
    println!(
        "Income          {}  ({})",
        format_money(data.total_income),
        trend(data.total_income_trend)
    );
    println!("Orders          {}  ({})", data.total_orders, trend(data.total_orders_trend));
    println!(
        "Average order   {}  ({})",
        format_money(data.avg_order_value),
        trend(data.avg_order_value_trend)
    );
    println!("Peak hour       {}", data.peak_hour());
    if !data.top_dishes.is_empty() {
        println!("Top dishes");
        for dish in data.top_dishes.iter().take(5) {
            println!("  {:<28} {:>5}", dish.name, dish.orders);
        }
    }
    if !data.category_sales.is_empty() {
        println!("Sales by category");
        for c in &data.category_sales {
            println!("  {:<28} {:>12}", c.category, format_money(c.value));
        }
    }
    Ok(())
}
