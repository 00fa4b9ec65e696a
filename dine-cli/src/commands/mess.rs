use super::{confirm_delete, reports};
use crate::cli::{EnrollArgs, MenusSubcommand, MessSubcommand, MessUpdateArgs};
use crate::context::Context;
use crate::error::CliResult;
use chrono::Local;
use rust_decimal::Decimal;
use shared::membership::{Enrollment, ReceivedPayment, TransactionSummary};
use shared::models::{Menu, MenuItemCreate, Mess, MessUpdate, PaymentMethod};
use shared::util::format_money;
use tracing::info;

pub(super) fn print_member(m: &Mess) {
    let today = Local::now().date_naive();
    println!(
        "{:>5}  {:<24} {:<12} {} - {}  {:>12} due{}",
        m.id,
        m.customer_name,
        m.mobile_number,
        m.start_date.format("%d/%m/%Y"),
        m.end_date.format("%d/%m/%Y"),
        format_money(m.pending_amount),
        if m.is_current(today) { "" } else { "  (ended)" },
    );
}

/// Cash and bank parts of `amount` for `method` when not given explicitly
fn split(
    method: PaymentMethod,
    amount: Decimal,
    cash: Option<Decimal>,
    bank: Option<Decimal>,
) -> (Decimal, Decimal) {
    match method {
        PaymentMethod::Cash => (cash.unwrap_or(amount), Decimal::ZERO),
        PaymentMethod::Bank => (Decimal::ZERO, bank.unwrap_or(amount)),
        PaymentMethod::CashBank => {
            let cash = cash.unwrap_or_else(|| amount - bank.unwrap_or_default());
            (cash, bank.unwrap_or(amount - cash))
        }
        PaymentMethod::Credit => (Decimal::ZERO, Decimal::ZERO),
    }
}

async fn enroll(ctx: &Context, args: EnrollArgs) -> CliResult<()> {
    let method: PaymentMethod = args.payment.into();
    let (cash_amount, bank_amount) = split(method, args.paid, args.cash, args.bank);
    let start = args.start.unwrap_or_else(|| Local::now().date_naive());

    let mut enrollment = Enrollment::new(args.name, args.mobile, start);
    enrollment.mess_type = Some(args.mess_type);
    enrollment.menu_type = args.menu_type.into();
    enrollment.weeks = args.weeks;
    enrollment.discount = args.discount;
    enrollment.payment_method = method;
    enrollment.paid_amount = args.paid;
    enrollment.cash_amount = cash_amount;
    enrollment.bank_amount = bank_amount;

    let menus = ctx
        .client
        .member_menus(args.mess_type, enrollment.menu_type, &enrollment.mobile_number)
        .await?;
    let member = ctx.client.enroll(&enrollment, &menus).await?;
    info!(mess_id = member.id, "Member enrolled");
    print_member(&member);
    Ok(())
}

fn print_menu(menu: &Menu) {
    let day = menu.day_of_week.map(|d| d.as_str()).unwrap_or("-");
    println!(
        "{:>5}  {:<24} {:<10} {:>12}",
        menu.id,
        menu.name,
        day,
        format_money(menu.sub_total)
    );
    for item in &menu.menu_items {
        println!("  {:>5}  {:<10} {}", item.id, item.meal_type.as_str(), item.dish.name);
    }
}

fn mess_update(args: MessUpdateArgs) -> MessUpdate {
    MessUpdate {
        customer_name: args.name.map(|n| n.trim().to_string()),
        mobile_number: args.mobile.map(|m| m.trim().to_string()),
        start_date: args.start,
        end_date: args.end,
        payment_method: args.payment.map(Into::into),
        paid_amount: args.paid,
        pending_amount: args.pending,
    }
}

async fn menus(ctx: &Context, command: MenusSubcommand) -> CliResult<()> {
    match command {
        MenusSubcommand::List {
            mess_type,
            menu_type,
            mobile,
        } => {
            let menus = ctx
                .client
                .member_menus(mess_type, menu_type.into(), &mobile)
                .await?;
            if menus.is_empty() {
                println!("No menus");
            }
            menus.iter().for_each(print_menu);
        }
        MenusSubcommand::Add { mess_type, mobile } => {
            let menu = ctx.client.add_custom_menu(mess_type, &mobile).await?;
            info!(menu_id = menu.id, "Custom menu created");
            print_menu(&menu);
        }
        MenusSubcommand::AddItem { menu, meal, dish } => {
            let item = MenuItemCreate {
                meal_type: meal.into(),
                menu,
                dish_id: dish,
            };
            let created = ctx.client.create_menu_item(&item).await?;
            println!(
                "Added {} to menu #{menu} for {}",
                created.dish.name,
                created.meal_type.as_str()
            );
        }
        MenusSubcommand::RemoveItem { id } => {
            confirm_delete(ctx)?;
            ctx.client.delete_menu_item(id).await?;
            println!("Menu item #{id} removed");
        }
    }
    Ok(())
}

pub async fn run(ctx: &Context, command: MessSubcommand) -> CliResult<()> {
    match command {
        MessSubcommand::Members => ctx.client.messes().await?.iter().for_each(print_member),
        MessSubcommand::Enroll(args) => enroll(ctx, args).await?,
        MessSubcommand::Show { id } => {
            let member = ctx.client.mess(id).await?;
            print_member(&member);
            println!(
                "       {}  total {}  paid {}  discount {}",
                member.mess_type.name().unwrap_or("-"),
                format_money(member.total_amount),
                format_money(member.paid_amount),
                format_money(member.discount_amount),
            );
            if let Some(method) = member.payment_method {
                println!("       Paid by {method}");
            }
        }
        MessSubcommand::Update(args) => {
            let id = args.id;
            let member = ctx.client.update_mess(id, &mess_update(args)).await?;
            print_member(&member);
        }
        MessSubcommand::Delete { id } => {
            confirm_delete(ctx)?;
            ctx.client.delete_mess(id).await?;
            println!("Member #{id} deleted");
        }
        MessSubcommand::Types => {
            for t in ctx.client.mess_types().await? {
                println!("{:>5}  {}", t.id, t.name);
            }
        }
        MessSubcommand::Menus(cmd) => menus(ctx, cmd.command).await?,
        MessSubcommand::Transactions { mess_id } => {
            let transactions = ctx.client.transactions(mess_id).await?;
            for t in &transactions {
                let date = t
                    .date
                    .map(|d| d.with_timezone(&Local).format("%d/%m/%Y").to_string())
                    .unwrap_or_default();
                println!(
                    "{:>5}  {:<10} {:>12}  cash {:.2}  bank {:.2}  {}",
                    t.id,
                    date,
                    format_money(t.received_amount),
                    t.cash_amount,
                    t.bank_amount,
                    t.payment_method,
                );
            }
            let summary = TransactionSummary::from_transactions(&transactions);
            println!(
                "Received {}  cash {}  bank {}",
                format_money(summary.total_received),
                format_money(summary.total_cash),
                format_money(summary.total_bank)
            );
        }
        MessSubcommand::Receive {
            mess_id,
            amount,
            payment,
            cash,
            bank,
        } => {
            let method: PaymentMethod = payment.into();
            let (cash_amount, bank_amount) = split(method, amount, cash, bank);
            let received = ReceivedPayment {
                received_amount: amount,
                cash_amount,
                bank_amount,
                payment_method: method,
            };
            let transaction = ctx.client.receive_payment(mess_id, &received).await?;
            println!(
                "Transaction #{} recorded: {}",
                transaction.id,
                format_money(transaction.received_amount)
            );
        }
        MessSubcommand::Report { range, print } => reports::mess_report(ctx, range, print).await?,
    }
    Ok(())
}
