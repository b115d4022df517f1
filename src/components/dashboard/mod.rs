//! Admin dashboard figures and the Chart.js datasets built from them.

pub mod charts;
pub mod stats;

pub use charts::{
    category_chart, category_distribution, event_type_breakdown, events_per_month,
    events_per_month_chart, monthly_series, revenue_chart, user_growth_chart, ChartConfig,
    ChartKind, ChartSlot,
};
pub use stats::{fetch_dashboard, fetch_stats, DashboardData, DashboardStats};
