use crate::commands::{CommandContext, CommandResult, ProfileAction};
use crate::components::management::{
    change_password, register_for_event, update_profile, PasswordChange, ProfileUpdate,
};
use chrono::Utc;
use rust_i18n::t;

pub async fn profile(ctx: &CommandContext, action: ProfileAction) -> CommandResult {
    ctx.client.ensure_session(Utc::now()).await?;

    match action {
        ProfileAction::Update {
            first_name,
            last_name,
            phone,
        } => {
            let update = ProfileUpdate {
                first_name,
                last_name,
                phone,
            };
            update_profile(&ctx.client, &update).await?;
            println!("{}", t!("profile_updated"));
        }
        ProfileAction::Password {
            current,
            new_password,
            confirm,
        } => {
            let change = PasswordChange {
                current_password: current,
                new_password,
                confirm_password: confirm,
            };
            change_password(&ctx.client, &change).await?;
            println!("{}", t!("password_changed"));
        }
    }
    Ok(())
}

pub async fn register(ctx: &CommandContext, event_id: &str) -> CommandResult {
    ctx.client.ensure_session(Utc::now()).await?;
    register_for_event(&ctx.client, event_id).await?;
    println!("{}", t!("event_registered", id = event_id));
    Ok(())
}
