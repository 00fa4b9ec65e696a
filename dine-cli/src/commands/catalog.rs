use super::{payment_selection, print_pager};
use crate::cli::{CartArgs, CategoriesSubcommand, DishesSubcommand};
use crate::context::Context;
use crate::error::CliResult;
use shared::models::{CategoryCreate, Dish};
use shared::order::{Cart, CheckoutForm};
use shared::response::Pager;
use shared::util::format_money;
use tracing::info;

fn print_dish(dish: &Dish) {
    println!("{:>5}  {:<32} {:>12}", dish.id, dish.name, format_money(dish.price));
}

pub async fn dishes(ctx: &Context, command: DishesSubcommand) -> CliResult<()> {
    match command {
        DishesSubcommand::List { page } => {
            let page = page.max(1);
            let dishes = ctx.client.dishes(page).await?;
            dishes.results.iter().for_each(print_dish);
            print_pager(&Pager::for_envelope(page, ctx.client.page_size(), &dishes));
        }
        DishesSubcommand::Search { query } => {
            let found = ctx.client.search_dishes(&query).await?;
            if found.is_empty() {
                println!("No dishes found");
            }
            found.iter().for_each(print_dish);
        }
        DishesSubcommand::Show { id } => {
            let dish = ctx.client.dish(id).await?;
            print_dish(&dish);
            if !dish.description.is_empty() {
                println!("       {}", dish.description);
            }
            println!("       Category #{}", dish.category.id());
        }
    }
    Ok(())
}

pub async fn categories(ctx: &Context, command: CategoriesSubcommand) -> CliResult<()> {
    match command {
        CategoriesSubcommand::List => {
            for category in ctx.client.categories().await? {
                println!("{:>5}  {}", category.id, category.name);
            }
        }
        CategoriesSubcommand::Add { name } => {
            let category = ctx.client.create_category(&CategoryCreate { name }).await?;
            println!("Category #{} created: {}", category.id, category.name);
        }
    }
    Ok(())
}

/// Fill a cart from `--item` flags and place the order
pub async fn checkout(ctx: &Context, args: CartArgs) -> CliResult<()> {
    let mut cart = Cart::new();
    for item in &args.items {
        let dish = ctx.client.dish(item.dish).await?;
        cart.add_quantity(&dish, item.quantity)?;
    }
    for line in cart.lines() {
        println!(
            "{:>3} x {:<30} {:>12}",
            line.quantity,
            line.dish.name,
            format_money(line.line_total())
        );
    }

    let form = CheckoutForm {
        order_type: args.order_type.into(),
        customer_name: args.customer,
        customer_phone_number: args.phone,
        address: args.address,
        delivery_charge: args.delivery_charge,
        delivery_driver_id: args.driver,
        payment: payment_selection(&args.payment, cart.total()),
        kitchen_note: args.note,
    };
    let payload = cart.checkout(&form)?;
    let order = ctx.client.create_order(&payload).await?;
    info!(order_id = order.id, "Order placed");
    println!("Order #{} placed, total {}", order.id, format_money(order.total_amount));
    Ok(())
}
