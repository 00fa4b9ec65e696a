use crate::context::{Context, prompt};
use crate::error::CliResult;
use chrono::{Local, Utc};

pub async fn login(ctx: &Context, username: &str, password: Option<String>) -> CliResult<()> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password")?,
    };
    let route = ctx.client.login(username, &password).await?;
    println!("Logged in as {username} ({})", route.path());
    Ok(())
}

pub async fn login_passcode(ctx: &Context, passcode: &str) -> CliResult<()> {
    let route = ctx.client.login_passcode(passcode).await?;
    let session = ctx.client.session().snapshot().await;
    let name = session.user.map(|u| u.username).unwrap_or_default();
    println!("Logged in as {name} ({})", route.path());
    Ok(())
}

pub async fn logout(ctx: &Context) -> CliResult<()> {
    ctx.client.logout().await?;
    println!("Logged out");
    Ok(())
}

pub async fn whoami(ctx: &Context) -> CliResult<()> {
    let session = ctx.client.session().snapshot().await;
    let Some(user) = session.user.as_ref().filter(|_| session.is_authenticated()) else {
        println!("Not logged in");
        return Ok(());
    };
    println!("{} ({})", user.username, user.role);
    if let Some(email) = &user.email {
        println!("Email: {email}");
    }
    if let Some(expires) = session.access_expires_at() {
        let state = if session.is_expired(Utc::now()) { "expired" } else { "valid" };
        println!(
            "Token {state}, expires {}",
            expires.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}
