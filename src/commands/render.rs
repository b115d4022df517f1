use crate::components::calendar::{
    month_grid, truncate_description, CalendarEvent, DayBuckets, DateWindow, EventPhase,
};
use crate::components::dashboard::DashboardStats;
use crate::components::management::{
    format_currency, CoordinatorRequestRecord, PaymentRecord, UserRecord,
};
use chrono::NaiveDate;
use rust_i18n::t;
use std::fmt::Write;

const CELL_WIDTH: usize = 5;

fn title_line(event: &CalendarEvent) -> String {
    let mut line = format!("{}  {}", event.occurs_at.format("%H:%M"), event.title);
    if let Some(location) = &event.location {
        line.push_str(&format!(" @ {}", location));
    }
    line
}

/// Short label for where an event sits relative to today
pub fn phase_label(phase: EventPhase) -> &'static str {
    match phase {
        EventPhase::Past => "past",
        EventPhase::Current => "today",
        EventPhase::Upcoming => "upcoming",
    }
}

/// Month grid followed by the capped list of each day's events
pub fn render_month(window: &DateWindow, buckets: &DayBuckets, year: i32, month: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", window.start.format("%B %Y"));

    for name in t!("calendar_weekdays").split_whitespace() {
        let _ = write!(out, "{:>width$}", name, width = CELL_WIDTH);
    }
    out.push('\n');

    for week in month_grid(year, month).chunks(7) {
        for cell in week {
            let text = match cell {
                Some(day) if !buckets.events_on(*day).is_empty() => format!("{}*", day),
                Some(day) => day.to_string(),
                None => String::new(),
            };
            let _ = write!(out, "{:>width$}", text, width = CELL_WIDTH);
        }
        out.push('\n');
    }

    if buckets.total() == 0 {
        let _ = writeln!(out, "\n{}", t!("calendar_no_events"));
        return out;
    }

    for (day, _) in buckets.days() {
        let cell = buckets.cell(day);
        let _ = writeln!(out, "\n{:>2}", day);
        for event in cell.visible {
            let _ = writeln!(out, "    {}", title_line(event));
        }
        if cell.overflow_count > 0 {
            let _ = writeln!(out, "    {}", t!("calendar_more", count = cell.overflow_count));
        }
    }

    out
}

/// One block per day of the week
pub fn render_week(columns: &[(NaiveDate, Vec<CalendarEvent>)]) -> String {
    let mut out = String::new();
    for (day, events) in columns {
        let _ = writeln!(out, "{}", day.format("%a %d %b"));
        if events.is_empty() {
            let _ = writeln!(out, "    -");
        }
        for event in events {
            let _ = writeln!(out, "    {}", title_line(event));
        }
    }
    out
}

/// Detailed list for a single day
pub fn render_day(day: NaiveDate, events: &[CalendarEvent]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", day.format("%A, %d %B %Y"));

    if events.is_empty() {
        let _ = writeln!(out, "{}", t!("calendar_no_events"));
        return out;
    }

    for event in events {
        let _ = writeln!(out, "\n{}", title_line(event));
        if let Some(description) = &event.description {
            let _ = writeln!(out, "    {}", truncate_description(description));
        }
        if let Some(count) = event.participants_count {
            let _ = writeln!(out, "    {} participants", count);
        }
    }
    out
}

pub fn render_upcoming(events: &[CalendarEvent]) -> String {
    if events.is_empty() {
        return format!("{}\n", t!("upcoming_empty"));
    }

    let mut out = format!("{}\n", t!("upcoming_title"));
    for event in events {
        let _ = writeln!(
            out,
            "{}  {}",
            event.occurs_at.format("%a %d %b %Y"),
            title_line(event)
        );
    }
    out
}

pub fn render_stats(stats: &DashboardStats, categories: &[(String, u64)]) -> String {
    let mut out = format!("{}\n", t!("dashboard_title"));
    let rows = [
        (t!("dashboard_users"), stats.total_users.to_string()),
        (t!("dashboard_events"), stats.total_events.to_string()),
        (t!("dashboard_revenue"), format_currency(stats.total_revenue)),
        (t!("dashboard_active"), stats.active_events.to_string()),
        (t!("dashboard_pending"), stats.pending_requests.to_string()),
        (t!("dashboard_average"), format_currency(stats.average_ticket())),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {:<20} {}", label, value);
    }

    let _ = writeln!(out, "\n{}", t!("dashboard_categories"));
    for (label, count) in categories {
        let _ = writeln!(out, "  {:<20} {}", label, count);
    }
    out
}

pub fn render_users(users: &[UserRecord]) -> String {
    if users.is_empty() {
        return format!("{}\n", t!("users_empty"));
    }

    let mut out = String::new();
    for user in users {
        let _ = writeln!(
            out,
            "{:>6}  {:<24} {:<28} {:<12} {}",
            user.id,
            user.full_name,
            user.email,
            user.role.as_str(),
            if user.is_active { "active" } else { "inactive" }
        );
    }
    out
}

pub fn render_payments(payments: &[PaymentRecord]) -> String {
    if payments.is_empty() {
        return format!("{}\n", t!("payments_empty"));
    }

    let mut out = String::new();
    for payment in payments {
        let _ = writeln!(
            out,
            "{:>6}  {:<24} {:<24} {:>12} {:<10} {}",
            payment.id,
            payment.user_name,
            payment.event_name,
            format_currency(payment.amount),
            payment.status,
            payment.method
        );
    }
    out
}

pub fn render_requests(requests: &[CoordinatorRequestRecord]) -> String {
    if requests.is_empty() {
        return format!("{}\n", t!("requests_empty"));
    }

    let mut out = String::new();
    for request in requests {
        let requested = request
            .requested_on
            .map(|d| d.format("%d %b %Y").to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let _ = writeln!(
            out,
            "{:>6}  {:<24} {:<28} {:<12} {:<12} {}",
            request.id,
            request.name,
            request.email.as_deref().unwrap_or("N/A"),
            request.phone.as_deref().unwrap_or("N/A"),
            requested,
            request.status
        );
    }
    out
}
