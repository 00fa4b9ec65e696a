use super::confirm_delete;
use crate::cli::{DeliveriesSubcommand, DriversSubcommand};
use crate::context::Context;
use crate::error::CliResult;
use chrono::Local;
use dine_client::api::DriverToggle;
use shared::models::DeliveryDriver;
use shared::util::format_money;

fn print_driver(driver: &DeliveryDriver) {
    println!(
        "{:>5}  {:<20} {:<12} {:<8} {}",
        driver.id,
        driver.username,
        driver.mobile_number.as_deref().unwrap_or("-"),
        if driver.is_active { "active" } else { "inactive" },
        if driver.is_available { "available" } else { "busy" },
    );
}

pub async fn drivers(ctx: &Context, command: DriversSubcommand) -> CliResult<()> {
    let (id, toggle) = match command {
        DriversSubcommand::List => {
            ctx.client.delivery_drivers().await?.iter().for_each(print_driver);
            return Ok(());
        }
        DriversSubcommand::ToggleActive { id } => (id, DriverToggle::Active),
        DriversSubcommand::ToggleAvailable { id } => (id, DriverToggle::Available),
    };
    ctx.client.toggle_driver(id, toggle).await?;
    print_driver(&ctx.client.delivery_driver(id).await?);
    Ok(())
}

pub async fn deliveries(ctx: &Context, command: DeliveriesSubcommand) -> CliResult<()> {
    match command {
        DeliveriesSubcommand::List => {
            for delivery in ctx.client.delivery_orders().await? {
                let order = &delivery.order;
                println!(
                    "{:>5}  order #{:<6} {}  {:<12} {:>12}",
                    delivery.id,
                    order.id,
                    delivery.created_at.with_timezone(&Local).format("%d/%m %H:%M"),
                    delivery.status.as_str(),
                    format_money(order.total_amount),
                );
                if let Some(address) = order.address.as_deref().filter(|s| !s.is_empty()) {
                    println!("       {address}");
                }
                if let Some(phone) = order.customer_phone_number.as_deref() {
                    println!("       {phone}");
                }
            }
        }
        DeliveriesSubcommand::Status { id, status } => {
            ctx.client.update_delivery_status(id, status).await?;
            println!("Delivery #{id} is now {status}");
        }
        DeliveriesSubcommand::Delete { id } => {
            confirm_delete(ctx)?;
            ctx.client.delete_delivery_order(id).await?;
            println!("Delivery #{id} deleted");
        }
    }
    Ok(())
}
