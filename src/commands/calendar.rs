use crate::commands::render::{render_day, render_month, render_upcoming, render_week};
use crate::commands::{CommandContext, CommandResult};
use crate::components::api::Resource;
use crate::components::calendar::links::{
    google_calendar_url, icalendar, ics_file_name, outlook_calendar_url,
};
use crate::components::calendar::{
    bucket_by_day, bucket_by_week, classify_all, compute_window, decode_event, decode_events,
    navigate, sort_chronological, upcoming_window, DecodedEvent, Direction, ViewMode,
};
use crate::error::calendar_error;
use crate::utils::time::today_in;
use chrono::{Datelike, NaiveDate, Utc};
use rust_i18n::t;
use std::path::Path;
use tracing::debug;

/// Navigation flags to a direction; clap keeps them exclusive
pub fn direction(prev: bool, next: bool) -> Option<Direction> {
    match (prev, next) {
        (true, _) => Some(Direction::Previous),
        (_, true) => Some(Direction::Next),
        _ => None,
    }
}

/// Render the calendar for the focus date
pub async fn show(
    ctx: &CommandContext,
    mode: ViewMode,
    date: Option<NaiveDate>,
    direction: Option<Direction>,
) -> CommandResult {
    ctx.client.ensure_session(Utc::now()).await?;

    let tz = ctx.timezone;
    let mut focus = date.unwrap_or_else(|| today_in(&tz));
    if let Some(direction) = direction {
        focus = navigate(focus, mode, direction);
    }

    let window = compute_window(focus, mode);
    debug!("Showing {} view {} to {}", mode, window.start, window.end);

    let raws = ctx.client.list(Resource::Events, &window.query_params()).await?;
    let mut classification = classify_all(&raws, &window, &tz);

    println!(
        "{}\n",
        t!(
            "calendar_title",
            view = mode,
            start = window.start,
            end = window.end,
            tz = tz.name()
        )
    );

    let text = match mode {
        ViewMode::Month => {
            let buckets = bucket_by_day(&classification.events, focus.year(), focus.month());
            render_month(&window, &buckets, focus.year(), focus.month())
        }
        ViewMode::Week => render_week(&bucket_by_week(&classification.events, &window)),
        ViewMode::Day => {
            sort_chronological(&mut classification.events);
            render_day(focus, &classification.events)
        }
    };
    print!("{}", text);

    if !classification.undated.is_empty() {
        println!(
            "\n{}",
            t!("calendar_undated", count = classification.undated.len())
        );
    }
    Ok(())
}

pub async fn upcoming(ctx: &CommandContext, limit: Option<usize>) -> CommandResult {
    ctx.client.ensure_session(Utc::now()).await?;

    let tz = ctx.timezone;
    let raws = ctx.client.list(Resource::Events, &[]).await?;
    let events = decode_events(&raws, &tz).events;

    let limit = limit.unwrap_or(ctx.config.upcoming_limit);
    let upcoming = upcoming_window(&events, today_in(&tz), limit);
    print!("{}", render_upcoming(&upcoming));
    Ok(())
}

/// Print calendar links for an event and write its ICS file into `dir`
pub async fn links(ctx: &CommandContext, id: &str, dir: &Path) -> CommandResult {
    ctx.client.ensure_session(Utc::now()).await?;

    let raw = ctx.client.get(Resource::Events, id).await?;
    let event = match decode_event(&raw, &ctx.timezone) {
        DecodedEvent::Dated(event) => event,
        DecodedEvent::Undated(undated) => {
            return Err(calendar_error(&format!(
                "Event '{}' has no usable date",
                undated.title
            )))
        }
    };

    println!("{}", t!("links_google", url = google_calendar_url(&event)?));
    println!("{}", t!("links_outlook", url = outlook_calendar_url(&event)?));

    let source_url = event
        .url
        .clone()
        .unwrap_or_else(|| format!("{}events/{}", ctx.config.api_url, id));
    let path = dir.join(ics_file_name(&event));
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(&path, icalendar(&event, &source_url)).await?;

    println!("{}", t!("links_ics", file = path.display()));
    Ok(())
}
