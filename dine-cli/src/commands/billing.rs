use super::{confirm_delete, print_pager};
use crate::cli::{BillsSubcommand, CouponArgs, CouponsSubcommand};
use crate::context::Context;
use crate::error::CliResult;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use dine_client::pages::BillsBoard;
use shared::bills::BillFilter;
use shared::error::AppError;
use shared::models::{Coupon, CouponCreate};
use shared::util::{format_money, non_blank, round_money};

pub async fn bills(ctx: &Context, command: BillsSubcommand) -> CliResult<()> {
    match command {
        BillsSubcommand::List {
            page,
            from,
            to,
            search,
        } => {
            let mut board = BillsBoard::new(&ctx.client);
            board.load().await?;
            board.set_filter(BillFilter {
                from,
                to,
                search,
                utc_offset: *Local::now().offset(),
            });
            board.go_to(page);
            let view = board.view();
            if view.bills.is_empty() {
                println!("No bills");
            }
            for bill in &view.bills {
                println!(
                    "{:>6}  order #{:<6} {}  {:>12}  {}",
                    bill.id,
                    bill.order,
                    bill.billed_at.with_timezone(&Local).format("%d/%m/%Y %H:%M"),
                    format_money(bill.total_amount),
                    if bill.paid { "paid" } else { "unpaid" },
                );
            }
            print_pager(&view.pager);
        }
        BillsSubcommand::Cancel { id } => {
            let mut board = BillsBoard::new(&ctx.client);
            board.load().await?;
            if board.cancel(id, ctx.confirm()).await? {
                println!("Bill #{id} cancelled");
            } else {
                println!("Kept bill #{id}");
            }
        }
        BillsSubcommand::Create { order, total } => {
            let bill = ctx.client.generate_bill(order, total).await?;
            println!("Bill #{} for order #{}: {}", bill.id, bill.order, format_money(bill.total_amount));
        }
    }
    Ok(())
}

fn print_coupon(coupon: &Coupon) {
    let state = if coupon.is_valid(Utc::now()) { "valid" } else { "invalid" };
    println!(
        "{:>5}  {:<16} {:>16}  {} - {}  {}",
        coupon.id,
        coupon.code,
        coupon.discount_label(),
        coupon.start_date.with_timezone(&Local).format("%d/%m/%Y"),
        coupon.end_date.with_timezone(&Local).format("%d/%m/%Y"),
        state,
    );
}

/// Local midnight of `day` (or the last second of it) in UTC
fn local_day_edge(day: NaiveDate, end: bool) -> CliResult<DateTime<Utc>> {
    let time = if end {
        NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
    } else {
        NaiveTime::MIN
    };
    day.and_time(time)
        .and_local_timezone(Local)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| AppError::validation(format!("No local time for {day}")).into())
}

fn coupon_create(args: CouponArgs) -> CliResult<CouponCreate> {
    let from = args.from.unwrap_or_else(|| Local::now().date_naive());
    Ok(CouponCreate {
        code: args.code.trim().to_uppercase(),
        discount_amount: args.amount,
        discount_percentage: args.percent,
        start_date: local_day_edge(from, false)?,
        end_date: local_day_edge(args.to, true)?,
        is_active: !args.inactive,
        usage_limit: args.limit,
        min_purchase_amount: args.min_purchase,
        description: args.description.as_deref().and_then(non_blank),
    })
}

pub async fn coupons(ctx: &Context, command: CouponsSubcommand) -> CliResult<()> {
    match command {
        CouponsSubcommand::List => ctx.client.coupons().await?.iter().for_each(print_coupon),
        CouponsSubcommand::Show { id, amount } => {
            let coupon = ctx.client.coupon(id).await?;
            print_coupon(&coupon);
            let limit = coupon
                .usage_limit
                .map_or_else(|| "unlimited".to_string(), |l| l.to_string());
            println!("       Used {} of {limit}", coupon.usage_count);
            if let Some(min) = coupon.min_purchase_amount {
                println!("       Minimum purchase {}", format_money(min));
            }
            if let Some(description) = &coupon.description {
                println!("       {description}");
            }
            if let Some(amount) = amount {
                if coupon.meets_minimum(amount) {
                    println!(
                        "       {} -> {}",
                        format_money(amount),
                        format_money(round_money(coupon.apply_discount(amount)))
                    );
                } else {
                    println!("       {} is below the minimum purchase", format_money(amount));
                }
            }
        }
        CouponsSubcommand::Create(args) => {
            let coupon = ctx.client.create_coupon(&coupon_create(args)?).await?;
            print_coupon(&coupon);
        }
        CouponsSubcommand::Delete { id } => {
            confirm_delete(ctx)?;
            ctx.client.delete_coupon(id).await?;
            println!("Coupon #{id} deleted");
        }
    }
    Ok(())
}
