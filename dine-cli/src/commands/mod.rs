//! Command handlers, one module per screen of the front end

mod auth;
mod billing;
mod catalog;
mod credit;
mod delivery;
mod mess;
mod notifications;
mod orders;
mod reports;
mod tables;

use crate::cli::{Command, PaymentArgs};
use crate::context::Context;
use crate::error::CliResult;
use dine_client::pages::DELETE_CONFIRMATION;
use rust_decimal::Decimal;
use shared::client::Area;
use shared::error::AppError;
use shared::models::PaymentMethod;
use shared::order::PaymentSelection;
use shared::response::Pager;

/// Section of the front end a command belongs to; `None` needs no session
fn area(command: &Command) -> Option<Area> {
    match command {
        Command::Login { .. } | Command::LoginPasscode { .. } | Command::Logout | Command::Whoami => {
            None
        }
        Command::Deliveries(_) => Some(Area::Driver),
        _ => Some(Area::Restaurant),
    }
}

pub async fn run(command: Command, ctx: &mut Context) -> CliResult<()> {
    if let Some(area) = area(&command) {
        ctx.require(area).await?;
    }
    match command {
        Command::Login { username, password } => auth::login(ctx, &username, password).await,
        Command::LoginPasscode { passcode } => auth::login_passcode(ctx, &passcode).await,
        Command::Logout => auth::logout(ctx).await,
        Command::Whoami => auth::whoami(ctx).await,
        Command::Dishes(cmd) => catalog::dishes(ctx, cmd.command).await,
        Command::Categories(cmd) => catalog::categories(ctx, cmd.command).await,
        Command::Cart(args) => catalog::checkout(ctx, args).await,
        Command::Orders(cmd) => orders::run(ctx, cmd.command).await,
        Command::Bills(cmd) => billing::bills(ctx, cmd.command).await,
        Command::Coupons(cmd) => billing::coupons(ctx, cmd.command).await,
        Command::Tables(cmd) => tables::run(ctx, cmd.command).await,
        Command::Mess(cmd) => mess::run(ctx, cmd.command).await,
        Command::Credit(cmd) => credit::run(ctx, cmd.command).await,
        Command::Reports(cmd) => reports::run(ctx, cmd.command).await,
        Command::Dashboard { range } => reports::dashboard(ctx, range).await,
        Command::Notifications(cmd) => notifications::run(ctx, cmd.command).await,
        Command::Drivers(cmd) => delivery::drivers(ctx, cmd.command).await,
        Command::Deliveries(cmd) => delivery::deliveries(ctx, cmd.command).await,
    }
}

/// Payment selection for `total` from the payment flags
///
/// Explicit cash/bank amounts replace the even split.
fn payment_selection(args: &PaymentArgs, total: Decimal) -> Option<PaymentSelection> {
    let method: PaymentMethod = args.payment?.into();
    let mut selection = PaymentSelection::new(method, total).with_credit_user(args.credit_user);
    if let (Some(cash), Some(bank)) = (args.cash, args.bank) {
        selection = selection.with_split(cash, bank);
    }
    Some(selection)
}

/// Ask before deleting; a declined prompt ends the command as cancelled
fn confirm_delete(ctx: &Context) -> CliResult<()> {
    if ctx.confirm().confirm(&DELETE_CONFIRMATION) {
        Ok(())
    } else {
        Err(AppError::cancelled().into())
    }
}

fn print_pager(pager: &Pager) {
    if pager.total_pages() > 1 {
        println!(
            "Page {} of {} ({} total){}{}",
            pager.page,
            pager.total_pages(),
            pager.total,
            if pager.has_previous() { "  [prev]" } else { "" },
            if pager.has_next() { "  [next]" } else { "" },
        );
    }
}
