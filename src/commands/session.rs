use crate::commands::{CommandContext, CommandResult};
use crate::components::session::landing_route;
use chrono::Utc;
use rust_i18n::t;

pub async fn login(ctx: &CommandContext, login: &str, password: &str) -> CommandResult {
    let session = ctx.client.login(login, password).await?;
    let name = session
        .user
        .as_ref()
        .map(|user| user.display_name())
        .unwrap_or_else(|| login.to_string());

    println!(
        "{}",
        t!("login_success", name = name, route = landing_route(session.role()))
    );
    Ok(())
}

pub async fn logout(ctx: &CommandContext) -> CommandResult {
    ctx.client.session().clear().await?;
    println!("{}", t!("logout_success"));
    Ok(())
}

pub async fn whoami(ctx: &CommandContext) -> CommandResult {
    let Some(session) = ctx.client.session().current().await else {
        println!("{}", t!("whoami_anonymous"));
        return Ok(());
    };

    let role = session.role();
    let name = session
        .user
        .as_ref()
        .map(|user| user.display_name())
        .unwrap_or_else(|| "User".to_string());

    println!(
        "{}",
        t!(
            "whoami_user",
            name = name,
            role = role.map(|r| r.as_str()).unwrap_or("unknown"),
            route = landing_route(role)
        )
    );

    if session.is_expired(Utc::now()) {
        println!("{}", t!("session_expired_at"));
    }
    Ok(())
}
