use super::confirm_delete;
use crate::cli::CreditSubcommand;
use crate::context::Context;
use crate::error::CliResult;
use chrono::Local;
use shared::models::{CreditUser, CreditUserCreate, CreditUserUpdate};
use shared::util::{format_money, non_blank};

fn print_account(user: &CreditUser) {
    let today = Local::now().date_naive();
    let limit = user.limit_amount.map(format_money).unwrap_or_else(|| "-".to_string());
    println!(
        "{:>5}  {:<20} {:<12} {:>12} due  limit {:<12}{}{}",
        user.id,
        user.username,
        user.mobile_number.as_deref().unwrap_or("-"),
        format_money(user.total_due),
        limit,
        if user.is_active { "" } else { "  inactive" },
        if user.is_overdue(today) { "  OVERDUE" } else { "" },
    );
}

pub async fn run(ctx: &Context, command: CreditSubcommand) -> CliResult<()> {
    match command {
        CreditSubcommand::List => ctx.client.credit_users().await?.iter().for_each(print_account),
        CreditSubcommand::Active => ctx
            .client
            .active_credit_users()
            .await?
            .iter()
            .for_each(print_account),
        CreditSubcommand::Create {
            username,
            mobile,
            until,
            limit,
            inactive,
        } => {
            let user = CreditUserCreate {
                mobile_number: mobile.as_deref().and_then(non_blank),
                time_period: until,
                is_active: !inactive,
                limit_amount: limit,
                ..CreditUserCreate::new(username.trim())
            };
            print_account(&ctx.client.create_credit_user(&user).await?);
        }
        CreditSubcommand::Update {
            id,
            username,
            mobile,
            until,
            limit,
            active,
        } => {
            let update = CreditUserUpdate {
                username: username.map(|u| u.trim().to_string()),
                mobile_number: mobile.map(|m| m.trim().to_string()),
                time_period: until,
                is_active: active,
                limit_amount: limit,
            };
            print_account(&ctx.client.update_credit_user(id, &update).await?);
        }
        CreditSubcommand::Delete { id } => {
            confirm_delete(ctx)?;
            ctx.client.delete_credit_user(id).await?;
            println!("Credit account #{id} deleted");
        }
        CreditSubcommand::Pay { id, amount } => {
            ctx.client.make_credit_payment(id, amount).await?;
            print_account(&ctx.client.credit_user(id).await?);
        }
    }
    Ok(())
}
