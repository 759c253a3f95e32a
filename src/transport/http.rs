use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use tracing::debug;

use super::{HttpTransport, OutboundRequest, TransportError, TransportResponse};

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| TransportError::InvalidMethod(request.method.clone()))?;
        let mut request_builder = self.client.request(method, &request.url);

        for (name, value) in &request.headers {
            request_builder = request_builder.header(name, value);
        }
        if let Some(body) = request.body {
            request_builder = request_builder.body(body);
        }

        debug!(method = %request.method, url = %request.url, "sending request");
        let response = request_builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        debug!(status, bytes = body.len(), "received response");

        Ok(TransportResponse { status, body })
    }
}
