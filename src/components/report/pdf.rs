use crate::config::Config;
use crate::error::{config_error, report_error, AppResult};
use reqwest::Client;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};
use url::Url;

/// Body accepted by the HTML-to-PDF service
#[derive(Debug, Serialize)]
struct PdfRequest<'a> {
    source: &'a str,
    landscape: bool,
}

/// Client for the external HTML-to-PDF service
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    client: Client,
    url: Url,
    api_key: String,
}

impl PdfRenderer {
    /// Both `PDF_API_URL` and `PDF_API_KEY` must be configured
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let url = config
            .pdf_api_url
            .as_deref()
            .ok_or_else(|| config_error("PDF_API_URL is not set"))?;
        let api_key = config
            .pdf_api_key
            .clone()
            .ok_or_else(|| config_error("PDF_API_KEY is not set"))?;

        Ok(Self {
            client: Client::new(),
            url: Url::parse(url)?,
            api_key,
        })
    }

    /// Convert an HTML document to PDF bytes
    pub async fn render(&self, html: &str, landscape: bool) -> AppResult<Vec<u8>> {
        debug!("Requesting PDF from {}", self.url);
        let response = self
            .client
            .post(self.url.clone())
            .basic_auth("api", Some(&self.api_key))
            .json(&PdfRequest {
                source: html,
                landscape,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(report_error(&format!(
                "PDF service returned {}: {}",
                status, error_text
            )));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(report_error("PDF service returned an empty document"));
        }
        Ok(bytes.to_vec())
    }
}

/// Write the document, creating parent directories as needed
pub async fn write_pdf(path: &Path, bytes: &[u8]) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    info!("Wrote report to {}", path.display());
    Ok(())
}
