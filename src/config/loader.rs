use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "etrade-download.json";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DownloadConfig {
    #[serde(rename = "outputDir")]
    pub output_dir: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "pdfEndpoint")]
    pub pdf_endpoint: Option<String>,
    #[serde(rename = "timeoutSecs")]
    pub timeout_secs: Option<u64>,
    #[serde(rename = "excludeHeaders")]
    pub exclude_headers: Vec<String>,
    #[serde(rename = "appendHeaders")]
    pub append_headers: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: DownloadConfig,
    pub path: PathBuf,
    pub dir: PathBuf,
}

/// Load `etrade-download.json` from a directory, or the given file. A missing
/// file is not an error.
pub fn load_config(target: &Path) -> Result<Option<LoadedConfig>> {
    let resolved = if target.is_absolute() {
        target.to_path_buf()
    } else {
        std::env::current_dir()?.join(target)
    };

    let (file_path, dir) = if resolved.is_dir() {
        (resolved.join(CONFIG_FILE_NAME), resolved)
    } else {
        let dir = resolved
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| resolved.clone());
        (resolved, dir)
    };

    if !file_path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&file_path)
        .with_context(|| format!("reading config {}", file_path.display()))?;

    let config: DownloadConfig = serde_json::from_str(&contents)
        .with_context(|| format!("parsing config {}", file_path.display()))?;

    Ok(Some(LoadedConfig {
        config,
        path: file_path,
        dir,
    }))
}
