use crate::components::calendar::CalendarEvent;
use crate::components::dashboard::{event_type_breakdown, DashboardStats};
use crate::components::management::format_currency;
use askama::Template;
use chrono::NaiveDate;

pub const REPORT_TITLE: &str = "EventSphere Analytics Report";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportEvent {
    pub title: String,
    pub when: String,
    pub location: String,
}

/// Analytics report page; askama escapes every interpolated value
#[derive(Debug, Template)]
#[template(path = "report.html")]
pub struct AnalyticsReport {
    pub title: String,
    pub generated_on: String,
    pub stats: Vec<ReportLine>,
    pub categories: Vec<ReportLine>,
    pub events: Vec<ReportEvent>,
}

impl AnalyticsReport {
    /// Assemble the report from the dashboard figures and the upcoming events
    pub fn build(
        stats: &DashboardStats,
        upcoming: &[CalendarEvent],
        all_events: &[CalendarEvent],
        today: NaiveDate,
    ) -> Self {
        let line = |label: &str, value: String| ReportLine {
            label: label.to_string(),
            value,
        };

        Self {
            title: REPORT_TITLE.to_string(),
            generated_on: today.format("%d %B %Y").to_string(),
            stats: vec![
                line("Total Users", stats.total_users.to_string()),
                line("Total Events", stats.total_events.to_string()),
                line("Revenue", format_currency(stats.total_revenue)),
                line("Active Events", stats.active_events.to_string()),
                line("Pending Requests", stats.pending_requests.to_string()),
            ],
            categories: event_type_breakdown(all_events)
                .into_iter()
                .map(|(label, count)| ReportLine {
                    label,
                    value: count.to_string(),
                })
                .collect(),
            events: upcoming
                .iter()
                .map(|event| ReportEvent {
                    title: event.title.clone(),
                    when: event.occurs_at.format("%a %d %b %Y, %H:%M").to_string(),
                    location: event.location.clone().unwrap_or_else(|| "TBA".to_string()),
                })
                .collect(),
        }
    }
}
