mod model;
mod normalize;
mod tokens;

pub use model::CapturedRequest;

use shell_words::split;

use crate::error::{Error, Result};

use normalize::normalize_command;
use tokens::parse_tokens;

/// Turn pasted "Copy as cURL" text into the request it describes.
pub fn extract_captured_request(raw: &str) -> Result<CapturedRequest> {
    if raw.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    let command = normalize_command(raw);
    let tokens = split(&command).map_err(|err| Error::Tokenize(err.to_string()))?;
    parse_tokens(&tokens)
}
