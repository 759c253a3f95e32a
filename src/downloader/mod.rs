mod runner;
mod target;

pub use runner::{download_all, DownloadContext, DownloadOutcome, DownloadReport, ItemReport};
pub use target::{
    build_target, file_date, plan_type_slug, DownloadTarget, DEFAULT_PDF_ENDPOINT, UNKNOWN_DATE,
};
