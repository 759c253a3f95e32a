pub mod capture;
pub mod config;
pub mod confirmations;
pub mod downloader;
pub mod error;
#[cfg(feature = "cli")]
pub mod logging;
pub mod payload;
pub mod pipeline;
#[cfg(feature = "cli")]
pub mod report;
pub mod transport;

pub use error::{Error, Result};
pub use pipeline::{run, RunOptions, RunSummary};
