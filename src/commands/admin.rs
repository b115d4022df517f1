use crate::commands::render::{
    phase_label, render_payments, render_requests, render_stats, render_users,
};
use crate::commands::{
    CommandContext, CommandResult, EventsAction, PaymentsAction, RequestsAction, UsersAction,
};
use crate::components::api::Resource;
use crate::components::calendar::{decode_events, phase, sort_chronological};
use crate::components::dashboard::{
    category_chart, event_type_breakdown, events_per_month_chart, fetch_dashboard, revenue_chart,
    user_growth_chart, ChartSlot,
};
use crate::components::management::{
    create_event, delete_event, delete_user, list_payments, list_requests, list_users,
    process_request, set_user_active, submit_coordinator_request, update_event,
    update_payment_status, update_user, CoordinatorApplication, Decision, EventDraft, UserUpdate,
};
use crate::components::report::generate_report;
use crate::error::AppResult;
use crate::utils::time::today_in;
use chrono::{Datelike, Utc};
use rust_i18n::t;
use serde_json::json;
use std::path::Path;

pub async fn dashboard(ctx: &CommandContext, as_json: bool) -> CommandResult {
    ctx.client.ensure_session(Utc::now()).await?;

    let data = fetch_dashboard(&ctx.client).await?;
    let stats = data.stats;
    let events = decode_events(&data.events, &ctx.timezone).events;
    let categories = event_type_breakdown(&events);

    if !as_json {
        print!("{}", render_stats(&stats, &categories));
        return Ok(());
    }

    let year = today_in(&ctx.timezone).year();
    let mut revenue = ChartSlot::new("revenue");
    let mut users = ChartSlot::new("users");
    let mut category = ChartSlot::new("categories");
    let mut monthly = ChartSlot::new("events-per-month");

    let output = json!({
        "stats": stats,
        "charts": {
            "revenue": revenue.install(revenue_chart(&stats)),
            "users": users.install(user_growth_chart(&stats)),
            "categories": category.install(category_chart(&categories)),
            "eventsPerMonth": monthly.install(events_per_month_chart(&events, year)),
        }
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub async fn events(ctx: &CommandContext, action: EventsAction) -> CommandResult {
    ctx.client.ensure_session(Utc::now()).await?;

    match action {
        EventsAction::List => {
            let raws = ctx.client.list(Resource::Events, &[]).await?;
            let classification = decode_events(&raws, &ctx.timezone);
            let mut events = classification.events;
            sort_chronological(&mut events);

            if events.is_empty() && classification.undated.is_empty() {
                println!("{}", t!("events_empty"));
            }
            let today = today_in(&ctx.timezone);
            for event in &events {
                let id = event.id.as_ref().map(ToString::to_string).unwrap_or_default();
                let status = event.status.as_ref().map(|s| s.as_str()).unwrap_or("-");
                println!(
                    "{:>6}  {}  {:<8} {:<32} {}",
                    id,
                    event.occurs_at.format("%Y-%m-%d %H:%M"),
                    phase_label(phase(event, today)),
                    event.title,
                    status
                );
            }
            for undated in &classification.undated {
                let id = undated.id.as_ref().map(ToString::to_string).unwrap_or_default();
                println!("{:>6}  {:<16}  {}", id, "(no date)", undated.title);
            }
        }
        EventsAction::Create { file } => {
            let draft = read_draft(&file).await?;
            create_event(&ctx.client, &draft).await?;
            println!("{}", t!("event_saved", name = draft.event_name));
        }
        EventsAction::Update { id, file } => {
            let draft = read_draft(&file).await?;
            update_event(&ctx.client, &id, &draft).await?;
            println!("{}", t!("event_saved", name = draft.event_name));
        }
        EventsAction::Delete { id } => {
            delete_event(&ctx.client, &id).await?;
            println!("{}", t!("event_deleted", id = id));
        }
    }
    Ok(())
}

async fn read_draft(path: &Path) -> AppResult<EventDraft> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

pub async fn users(ctx: &CommandContext, action: Option<UsersAction>) -> CommandResult {
    ctx.client.ensure_session(Utc::now()).await?;

    let id = match action {
        None => {
            print!("{}", render_users(&list_users(&ctx.client).await?));
            return Ok(());
        }
        Some(UsersAction::Update {
            id,
            first_name,
            last_name,
            email,
            phone,
            role,
        }) => {
            let update = UserUpdate {
                first_name,
                last_name,
                email,
                phone,
                role,
                is_active: None,
            };
            update_user(&ctx.client, &id, &update).await?;
            id
        }
        Some(UsersAction::Activate { id }) => {
            set_user_active(&ctx.client, &id, true).await?;
            id
        }
        Some(UsersAction::Deactivate { id }) => {
            set_user_active(&ctx.client, &id, false).await?;
            id
        }
        Some(UsersAction::Delete { id }) => {
            delete_user(&ctx.client, &id).await?;
            println!("{}", t!("user_deleted", id = id));
            return Ok(());
        }
    };

    println!("{}", t!("user_updated", id = id));
    Ok(())
}

pub async fn payments(ctx: &CommandContext, action: Option<PaymentsAction>) -> CommandResult {
    ctx.client.ensure_session(Utc::now()).await?;

    match action {
        None => print!("{}", render_payments(&list_payments(&ctx.client).await?)),
        Some(PaymentsAction::SetStatus { id, status }) => {
            update_payment_status(&ctx.client, &id, status).await?;
            println!("{}", t!("payment_updated", id = id, status = status.as_str()));
        }
    }
    Ok(())
}

pub async fn requests(ctx: &CommandContext, action: Option<RequestsAction>) -> CommandResult {
    ctx.client.ensure_session(Utc::now()).await?;

    let (id, decision) = match action {
        None => {
            print!("{}", render_requests(&list_requests(&ctx.client).await?));
            return Ok(());
        }
        Some(RequestsAction::Submit { reason, experience }) => {
            let application = CoordinatorApplication { reason, experience };
            submit_coordinator_request(&ctx.client, &application).await?;
            println!("{}", t!("request_submitted"));
            return Ok(());
        }
        Some(RequestsAction::Approve { id }) => (id, Decision::Approve),
        Some(RequestsAction::Reject { id }) => (id, Decision::Reject),
    };

    process_request(&ctx.client, &id, decision).await?;
    println!(
        "{}",
        t!("request_processed", id = id, status = decision.status())
    );
    Ok(())
}

pub async fn report(ctx: &CommandContext, out: &Path) -> CommandResult {
    ctx.client.ensure_session(Utc::now()).await?;
    generate_report(&ctx.client, &ctx.config, out).await?;
    println!("{}", t!("report_written", file = out.display()));
    Ok(())
}
