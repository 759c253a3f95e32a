use thiserror::Error;

use crate::transport::TransportError;

/// Conditions that abort a run before or during the confirmation list fetch.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Empty cURL command")]
    EmptyInput,
    #[error("Failed to split cURL command: {0}")]
    Tokenize(String),
    #[error("Missing required field `{0}`")]
    MissingField(&'static str),
    #[error("Invalid JSON in request body: {0}")]
    InvalidPayload(String),
    #[error("Failed to fetch confirmations (Status: {status})")]
    NetworkError { status: u16 },
    #[error("Failed to fetch confirmations: {0}")]
    Transport(#[from] TransportError),
    #[error("Unexpected response format from confirmations list: {0}")]
    UnexpectedFormat(String),
    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
