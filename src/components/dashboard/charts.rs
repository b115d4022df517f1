use super::stats::DashboardStats;
use crate::components::calendar::CalendarEvent;
use chrono::Datelike;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Fixed category split used when no real breakdown is available
pub const CATEGORY_SPLIT: [(&str, f64); 5] = [
    ("Cultural", 0.35),
    ("Corporate", 0.25),
    ("Educational", 0.20),
    ("Weddings", 0.12),
    ("Festival", 0.08),
];

/// Placeholder totals for an empty backend
pub const REVENUE_PLACEHOLDER: f64 = 500_000.0;
pub const USERS_PLACEHOLDER: f64 = 500.0;
pub const EVENTS_PLACEHOLDER: u64 = 100;

const BRAND_COLOR: &str = "#ff4a17";
const CATEGORY_COLORS: [&str; 5] = ["#ff4a17", "#2a3042", "#ffb347", "#4caf50", "#6c63ff"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Doughnut,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    pub background_color: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Chart.js configuration object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
}

impl ChartConfig {
    fn single(
        kind: ChartKind,
        label: &str,
        labels: Vec<String>,
        data: Vec<f64>,
        colors: Vec<String>,
    ) -> Self {
        let border_color = (kind == ChartKind::Line).then(|| BRAND_COLOR.to_string());
        Self {
            kind,
            data: ChartData {
                labels,
                datasets: vec![Dataset {
                    label: label.to_string(),
                    data,
                    border_color,
                    background_color: colors,
                }],
            },
        }
    }
}

/// Split `total_events` (100 when zero) over the fixed categories
pub fn category_distribution(total_events: u64) -> Vec<(String, u64)> {
    let total = if total_events == 0 {
        EVENTS_PLACEHOLDER
    } else {
        total_events
    };

    CATEGORY_SPLIT
        .iter()
        .map(|(label, share)| (label.to_string(), (total as f64 * share).round() as u64))
        .collect()
}

/// Real counts per event type, most common first. Falls back to the fixed
/// distribution when no event carries a type.
pub fn event_type_breakdown(events: &[CalendarEvent]) -> Vec<(String, u64)> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for event_type in events.iter().filter_map(|e| e.event_type.as_deref()) {
        *counts.entry(event_type).or_default() += 1;
    }

    if counts.is_empty() {
        return category_distribution(events.len() as u64);
    }

    let mut breakdown: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    breakdown.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    breakdown
}

/// Twelve monthly values growing towards the end of the year whose sum is
/// `total` (the last month absorbs the remainder and never goes negative)
pub fn monthly_series(total: f64) -> Vec<f64> {
    let mut series: Vec<f64> = (0..11)
        .map(|i| (total / 20.0 * (0.5 + i as f64 / 10.0)).round())
        .collect();
    let running: f64 = series.iter().sum();
    series.push((total - running).max(0.0));
    series
}

/// Number of events in each month of `year`
pub fn events_per_month(events: &[CalendarEvent], year: i32) -> [u64; 12] {
    let mut months = [0u64; 12];
    for event in events.iter().filter(|e| e.date().year() == year) {
        months[event.date().month0() as usize] += 1;
    }
    months
}

pub fn revenue_chart(stats: &DashboardStats) -> ChartConfig {
    let total = if stats.total_revenue > 0.0 {
        stats.total_revenue
    } else {
        REVENUE_PLACEHOLDER
    };
    ChartConfig::single(
        ChartKind::Line,
        "Monthly Revenue",
        month_labels(),
        monthly_series(total),
        vec!["rgba(255, 74, 23, 0.1)".to_string()],
    )
}

pub fn user_growth_chart(stats: &DashboardStats) -> ChartConfig {
    let total = if stats.total_users > 0 {
        stats.total_users as f64
    } else {
        USERS_PLACEHOLDER
    };
    ChartConfig::single(
        ChartKind::Bar,
        "New Users",
        month_labels(),
        monthly_series(total),
        vec![BRAND_COLOR.to_string()],
    )
}

pub fn category_chart(categories: &[(String, u64)]) -> ChartConfig {
    let colors = (0..categories.len())
        .map(|i| CATEGORY_COLORS[i % CATEGORY_COLORS.len()].to_string())
        .collect();
    ChartConfig::single(
        ChartKind::Doughnut,
        "Event Categories",
        categories.iter().map(|(label, _)| label.clone()).collect(),
        categories.iter().map(|(_, count)| *count as f64).collect(),
        colors,
    )
}

pub fn events_per_month_chart(events: &[CalendarEvent], year: i32) -> ChartConfig {
    ChartConfig::single(
        ChartKind::Bar,
        &format!("Events in {}", year),
        month_labels(),
        events_per_month(events, year).iter().map(|n| *n as f64).collect(),
        vec![BRAND_COLOR.to_string()],
    )
}

fn month_labels() -> Vec<String> {
    MONTH_LABELS.iter().map(|m| m.to_string()).collect()
}

/// Holds at most one live chart. Installing a chart releases the previous
/// one first, and dropping the slot releases whatever it still holds.
#[derive(Debug, Default)]
pub struct ChartSlot {
    name: String,
    chart: Option<ChartConfig>,
    released: usize,
}

impl ChartSlot {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            chart: None,
            released: 0,
        }
    }

    pub fn install(&mut self, chart: ChartConfig) -> &ChartConfig {
        self.release();
        self.chart.insert(chart)
    }

    pub fn release(&mut self) -> Option<ChartConfig> {
        let previous = self.chart.take();
        if previous.is_some() {
            self.released += 1;
            debug!("Released chart in slot {}", self.name);
        }
        previous
    }

    pub fn current(&self) -> Option<&ChartConfig> {
        self.chart.as_ref()
    }

    /// How many charts this slot has released so far
    pub fn released_count(&self) -> usize {
        self.released
    }
}

impl Drop for ChartSlot {
    fn drop(&mut self) {
        self.release();
    }
}
