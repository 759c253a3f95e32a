use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use url::Url;

use super::loader::LoadedConfig;
use crate::downloader::DEFAULT_PDF_ENDPOINT;
use crate::payload::DEFAULT_START_DATE;
use crate::transport::HeaderRules;

pub const DEFAULT_OUTPUT_DIR: &str = "docs";

/// Values given on the command line; these beat the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output_dir: Option<PathBuf>,
    pub start_date: Option<String>,
    pub pdf_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub output_dir: PathBuf,
    pub start_date: String,
    pub pdf_endpoint: Url,
    pub timeout: Option<Duration>,
    pub header_rules: HeaderRules,
}

pub fn resolve_settings(config: Option<&LoadedConfig>, overrides: Overrides) -> Result<Settings> {
    let file = config.map(|loaded| &loaded.config);

    let output_dir = overrides
        .output_dir
        .or_else(|| {
            let loaded = config?;
            let dir = loaded.config.output_dir.as_deref()?;
            Some(resolve_relative(&loaded.dir, dir))
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let start_date = overrides
        .start_date
        .or_else(|| file.and_then(|c| c.start_date.clone()))
        .unwrap_or_else(|| DEFAULT_START_DATE.to_string());

    let endpoint = overrides
        .pdf_endpoint
        .or_else(|| file.and_then(|c| c.pdf_endpoint.clone()))
        .unwrap_or_else(|| DEFAULT_PDF_ENDPOINT.to_string());
    let pdf_endpoint =
        Url::parse(&endpoint).with_context(|| format!("invalid PDF endpoint {endpoint}"))?;

    let header_rules = file
        .map(|c| HeaderRules {
            exclude: c.exclude_headers.clone(),
            append: c.append_headers.clone(),
        })
        .unwrap_or_default();

    Ok(Settings {
        output_dir,
        start_date,
        pdf_endpoint,
        timeout: file.and_then(|c| c.timeout_secs).map(Duration::from_secs),
        header_rules,
    })
}

fn resolve_relative(base: &Path, value: &str) -> PathBuf {
    let candidate = Path::new(value);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        base.join(candidate)
    }
}
