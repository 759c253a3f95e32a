use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use tracing::{info, warn};
use url::Url;

use super::target::build_target;
use crate::confirmations::Confirmation;
use crate::error::{Error, Result};
use crate::transport::{FileSink, HttpTransport, OutboundRequest};

/// Everything the PDF requests share.
pub struct DownloadContext<'a> {
    pub employee_id: &'a str,
    pub headers: &'a [(String, String)],
    pub output_dir: &'a Path,
    pub endpoint: &'a Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved { bytes: usize },
    HttpStatus(u16),
    Transport(String),
    Write(String),
    /// Listed without a `confirmationId`; no request is sent.
    MissingId,
}

impl DownloadOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, DownloadOutcome::Saved { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ItemReport {
    pub confirmation_id: String,
    pub path: PathBuf,
    pub outcome: DownloadOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct DownloadReport {
    pub items: Vec<ItemReport>,
}

impl DownloadReport {
    pub fn attempted(&self) -> usize {
        self.items.len()
    }

    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|item| item.outcome.is_saved()).count()
    }
}

/// Fetch each confirmation PDF in order. A failed item is recorded and the
/// loop moves on; only an unusable output directory stops the run.
pub async fn download_all(
    transport: &dyn HttpTransport,
    files: &dyn FileSink,
    confirmations: &[Confirmation],
    context: &DownloadContext<'_>,
    progress: &ProgressBar,
) -> Result<DownloadReport> {
    files
        .create_dir_all(context.output_dir)
        .map_err(|source| Error::OutputDir {
            path: context.output_dir.display().to_string(),
            source,
        })?;

    let total = confirmations.len();
    progress.set_length(total as u64);
    let mut report = DownloadReport::default();

    for (index, confirmation) in confirmations.iter().enumerate() {
        let target = build_target(
            confirmation,
            context.employee_id,
            context.output_dir,
            context.endpoint,
        );
        let path_label = target.output_path.display().to_string();

        if !target.date_known {
            progress.suspend(|| {
                warn!(
                    confirmation = %confirmation.confirmation_id,
                    "Invalid date '{}'", confirmation.confirmation_date
                )
            });
        }

        progress.set_message(path_label.clone());
        progress.suspend(|| info!("Downloading PDF {}/{}: {}", index + 1, total, path_label));

        let outcome = if confirmation.confirmation_id.is_empty() {
            DownloadOutcome::MissingId
        } else {
            download_one(
                transport,
                files,
                OutboundRequest {
                    method: "GET".to_string(),
                    url: target.download_url.to_string(),
                    headers: context.headers.to_vec(),
                    body: None,
                },
                &target.output_path,
            )
            .await
        };

        progress.suspend(|| match &outcome {
            DownloadOutcome::Saved { bytes } => info!(bytes, "Downloaded {path_label}"),
            DownloadOutcome::HttpStatus(status) => {
                warn!("Failed to download {path_label} (Status: {status})")
            }
            DownloadOutcome::Transport(message) | DownloadOutcome::Write(message) => {
                warn!("Error downloading {path_label}: {message}")
            }
            DownloadOutcome::MissingId => {
                warn!("Skipping {path_label}: confirmation has no confirmationId")
            }
        });
        progress.inc(1);

        report.items.push(ItemReport {
            confirmation_id: confirmation.confirmation_id.clone(),
            path: target.output_path,
            outcome,
        });
    }

    progress.finish_and_clear();
    Ok(report)
}

async fn download_one(
    transport: &dyn HttpTransport,
    files: &dyn FileSink,
    request: OutboundRequest,
    path: &Path,
) -> DownloadOutcome {
    let response = match transport.send(request).await {
        Ok(response) => response,
        Err(err) => return DownloadOutcome::Transport(err.to_string()),
    };
    if !response.is_success() {
        return DownloadOutcome::HttpStatus(response.status);
    }
    match files.write_file(path, &response.body) {
        Ok(()) => DownloadOutcome::Saved {
            bytes: response.body.len(),
        },
        Err(err) => DownloadOutcome::Write(err.to_string()),
    }
}
