//! Analytics report: HTML rendered locally, converted to PDF by an external
//! service.

pub mod pdf;
pub mod template;

pub use pdf::{write_pdf, PdfRenderer};
pub use template::{AnalyticsReport, ReportEvent, ReportLine, REPORT_TITLE};

use crate::components::api::ApiClient;
use crate::components::calendar::{decode_events, upcoming_window};
use crate::components::dashboard::fetch_dashboard;
use crate::config::Config;
use crate::error::AppResult;
use crate::utils::time::today_in;
use askama::Template;
use std::path::Path;

/// Fetch the figures, render the report and write the PDF to `out`
pub async fn generate_report(client: &ApiClient, config: &Config, out: &Path) -> AppResult<()> {
    let renderer = PdfRenderer::from_config(config)?;
    let tz = config.timezone()?;

    let data = fetch_dashboard(client).await?;
    let stats = data.stats;
    let events = decode_events(&data.events, &tz).events;

    let today = today_in(&tz);
    let upcoming = upcoming_window(&events, today, config.upcoming_limit);
    let html = AnalyticsReport::build(&stats, &upcoming, &events, today).render()?;

    let bytes = renderer.render(&html, true).await?;
    write_pdf(out, &bytes).await
}
