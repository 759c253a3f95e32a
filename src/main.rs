use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use etrade_download::config::{load_config, resolve_settings, Overrides};
use etrade_download::logging::init_logging;
use etrade_download::report::print_run_summary;
use etrade_download::transport::{LocalFiles, ReqwestTransport};
use etrade_download::{run, RunOptions};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::AsyncReadExt;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "etrade-download",
    version,
    about = "Download stock plan release confirmations using a copied cURL request",
    long_about = "Download stock plan release confirmations using a copied cURL request.\n\n\
        Copy the confirmations.json request from the browser's network tab as cURL \
        and pipe it in: etrade-download < request.txt\n\n\
        The captured command carries your session cookies; keep it private."
)]
struct Cli {
    /// Read the cURL command from a file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Directory to write PDFs into (default: docs)
    #[arg(long = "output", short = 'O', value_name = "DIR")]
    output: Option<PathBuf>,

    /// Directory or file containing etrade-download.json
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// First day of the confirmation search, MM/DD/YYYY
    #[arg(long, value_name = "DATE")]
    start_date: Option<String>,

    /// Override the PDF retrieval endpoint
    #[arg(long, value_name = "URL")]
    pdf_endpoint: Option<String>,

    /// Disable the download progress bar
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let config_target = match &cli.config {
        Some(path) => path.clone(),
        None => std::env::current_dir()?,
    };
    let config = load_config(&config_target).context("loading configuration")?;
    let settings = resolve_settings(
        config.as_ref(),
        Overrides {
            output_dir: cli.output.clone(),
            start_date: cli.start_date.clone(),
            pdf_endpoint: cli.pdf_endpoint.clone(),
        },
    )?;

    let input = read_input(cli.input.as_ref()).await?;

    let transport = ReqwestTransport::new(settings.timeout).context("building HTTP client")?;
    let mut options = RunOptions::new(
        settings.output_dir,
        settings.start_date,
        settings.pdf_endpoint,
    );
    options.header_rules = settings.header_rules;

    let summary = run(
        &input,
        &transport,
        &LocalFiles,
        &options,
        &progress_bar(cli.no_progress),
    )
    .await?;

    print_run_summary(&summary);
    Ok(())
}

async fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input {}", path.display())),
        None => {
            info!("Reading cURL command from stdin...");
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("Failed to read input")?;
            Ok(buffer)
        }
    }
}

fn progress_bar(disabled: bool) -> ProgressBar {
    if disabled {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    ProgressBar::new(0).with_style(style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::tempdir;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "etrade-download",
            "-O",
            "pdfs",
            "--start-date",
            "1/1/2020",
            "--pdf-endpoint",
            "http://localhost/pdf",
            "--no-progress",
        ]);
        assert_eq!(cli.output, Some(PathBuf::from("pdfs")));
        assert_eq!(cli.start_date.as_deref(), Some("1/1/2020"));
        assert_eq!(cli.pdf_endpoint.as_deref(), Some("http://localhost/pdf"));
        assert!(cli.no_progress);
        assert!(cli.input.is_none());
    }

    #[tokio::test]
    async fn read_input_from_file() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("request.txt");
        std::fs::write(&path, "curl https://x --data-raw '{}'")?;
        let input = read_input(Some(&path)).await?;
        assert!(input.starts_with("curl"));
        Ok(())
    }

    #[tokio::test]
    async fn read_input_reports_missing_file() {
        let err = read_input(Some(&PathBuf::from("missing-request.txt")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("missing-request.txt"));
    }
}
