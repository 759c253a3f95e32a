use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use indicatif::ProgressBar;
use tracing::info;
use url::Url;

use crate::capture::extract_captured_request;
use crate::confirmations::{fetch_confirmations, filter_relevant, RELEVANT_PLAN_TYPES};
use crate::downloader::{download_all, DownloadContext, DownloadReport};
use crate::error::Result;
use crate::payload::prepare_payload;
use crate::transport::{apply_header_rules, FileSink, HeaderRules, HttpTransport, OutboundRequest};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub output_dir: PathBuf,
    pub start_date: String,
    pub pdf_endpoint: Url,
    pub today: NaiveDate,
    pub header_rules: HeaderRules,
}

impl RunOptions {
    pub fn new(output_dir: PathBuf, start_date: String, pdf_endpoint: Url) -> Self {
        Self {
            output_dir,
            start_date,
            pdf_endpoint,
            today: Local::now().date_naive(),
            header_rules: HeaderRules::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub listed: usize,
    pub relevant: usize,
    pub downloads: DownloadReport,
}

impl RunSummary {
    pub fn attempted(&self) -> usize {
        self.downloads.attempted()
    }

    pub fn succeeded(&self) -> usize {
        self.downloads.succeeded()
    }
}

/// Capture → search → filter → download. Any error returned here is fatal;
/// per-document failures are reported inside the summary instead.
pub async fn run(
    input: &str,
    transport: &dyn HttpTransport,
    files: &dyn FileSink,
    options: &RunOptions,
    progress: &ProgressBar,
) -> Result<RunSummary> {
    let captured = extract_captured_request(input)?;
    info!("Successfully read cURL command");

    let payload = prepare_payload(&captured.body, &options.start_date, options.today)?;
    let headers = apply_header_rules(&captured.headers, &options.header_rules);

    let confirmations = fetch_confirmations(
        transport,
        OutboundRequest {
            method: captured.method.clone(),
            url: captured.url.clone(),
            headers: headers.clone(),
            body: Some(payload.body),
        },
    )
    .await?;
    let listed = confirmations.len();

    let relevant = filter_relevant(confirmations);
    if relevant.is_empty() {
        info!(
            listed,
            "No relevant confirmations found for {}",
            RELEVANT_PLAN_TYPES.join(" or ")
        );
        return Ok(RunSummary {
            listed,
            ..RunSummary::default()
        });
    }
    info!("Found {} relevant confirmations.", relevant.len());

    let downloads = download_all(
        transport,
        files,
        &relevant,
        &DownloadContext {
            employee_id: &payload.encrypted_employee_id,
            headers: &headers,
            output_dir: &options.output_dir,
            endpoint: &options.pdf_endpoint,
        },
        progress,
    )
    .await?;

    Ok(RunSummary {
        listed,
        relevant: relevant.len(),
        downloads,
    })
}
