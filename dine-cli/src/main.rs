//! `dine`: terminal front end for the restaurant point of sale

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use anyhow::Context as _;
use clap::Parser;
use cli::Cli;
use context::Context;
use dine_client::pages::user_message;
use error::CliError;
use shared::error::ErrorCode;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Missing .env is fine
    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    let _guard = logging::init(&cli.data_dir, cli.verbose)
        .with_context(|| format!("cannot write logs under {}", cli.data_dir.display()))?;
    info!(version = env!("CARGO_PKG_VERSION"), "dine starting");

    let mut ctx = Context::new(&cli).await?;
    let result = commands::run(cli.command, &mut ctx).await;

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if e.is_token_expired() => {
            warn!("Session expired, clearing stored session");
            if let Err(clear) = ctx.client.expire_session().await {
                warn!(error = %clear, "Could not clear the stored session");
            }
            if let CliError::Client(e) = &e {
                eprintln!("{}", user_message(e));
            }
            eprintln!("Run `dine login-passcode <passcode>` to sign in again.");
            Ok(ExitCode::from(2))
        }
        Err(e) if e.is_cancelled() => {
            println!("Cancelled");
            Ok(ExitCode::SUCCESS)
        }
        Err(CliError::Client(e)) => {
            error!(code = %e.code(), error = %e, "Command failed");
            eprintln!("{}", user_message(&e));
            if e.code() == ErrorCode::NotAuthenticated {
                eprintln!("Run `dine login <username>` first.");
            }
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
