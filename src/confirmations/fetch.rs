use tracing::{info, warn};

use super::model::{Confirmation, ListResponse};
use crate::error::{Error, Result};
use crate::transport::{HttpTransport, OutboundRequest};

/// Post the prepared search and return every confirmation it lists.
pub async fn fetch_confirmations(
    transport: &dyn HttpTransport,
    request: OutboundRequest,
) -> Result<Vec<Confirmation>> {
    info!(url = %request.url, "fetching confirmations list");
    let response = transport.send(request).await?;
    if !response.is_success() {
        return Err(Error::NetworkError {
            status: response.status,
        });
    }
    parse_confirmations(&response.body)
}

/// Pull `data.confirmation.confirmations` out of a list response body.
/// Entries that are not objects are dropped so one odd record cannot sink
/// the whole list.
pub fn parse_confirmations(body: &[u8]) -> Result<Vec<Confirmation>> {
    let parsed: ListResponse =
        serde_json::from_slice(body).map_err(|err| Error::UnexpectedFormat(err.to_string()))?;

    let confirmations = parsed
        .data
        .confirmation
        .confirmations
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(confirmation) => Some(confirmation),
            Err(err) => {
                warn!(index, "Skipping unreadable confirmation record: {err}");
                None
            }
        })
        .collect();
    Ok(confirmations)
}
