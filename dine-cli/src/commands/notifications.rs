use crate::cli::NotificationsSubcommand;
use crate::context::Context;
use crate::error::CliResult;
use chrono::Local;
use dine_client::pages::NotificationCenter;
use shared::models::Notification;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::warn;

fn print_notification(n: &Notification) {
    println!(
        "{:>5}  {}  {}{}",
        n.id,
        n.created_at.with_timezone(&Local).format("%d/%m %H:%M"),
        n.message,
        if n.is_read { "" } else { "  *" },
    );
}

pub async fn run(ctx: &Context, command: NotificationsSubcommand) -> CliResult<()> {
    let mut center = NotificationCenter::new(&ctx.client);
    match command {
        NotificationsSubcommand::List => {
            center.load().await?.iter().for_each(print_notification);
            println!("{} unread", center.unread());
        }
        NotificationsSubcommand::Unread => {
            ctx.client
                .unread_notifications()
                .await?
                .iter()
                .for_each(print_notification);
        }
        NotificationsSubcommand::Read { id } => {
            center.mark_read(id).await?;
            println!("Notification #{id} marked as read");
        }
        NotificationsSubcommand::Delete { id } => {
            center.delete(id).await?;
            println!("Notification #{id} deleted");
        }
        NotificationsSubcommand::Watch { interval } => {
            let cancel = CancellationToken::new();
            let stop = cancel.clone();
            tokio::spawn(async move {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!(error = %e, "Could not listen for Ctrl-C");
                }
                stop.cancel();
            });
            let mut last = None;
            center
                .poll(Duration::from_secs(interval.max(1)), cancel, |count| {
                    if last != Some(count) {
                        println!("{} unread notifications", count);
                        last = Some(count);
                    }
                })
                .await;
            if ctx.client.session().token_expired().await {
                return Err(dine_client::ClientError::TokenExpired.into());
            }
        }
    }
    Ok(())
}
