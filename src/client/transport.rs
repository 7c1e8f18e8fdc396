use super::types::*;
use crate::{Error, Result, config::BackendConfig};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::debug;

/// Carries one generation request to the backend and hands back the raw
/// response. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &GenerationRequest) -> Result<RawResponse>;

    /// Port of the backend endpoint, used to word connection failures.
    fn endpoint_port(&self) -> Option<u16> {
        None
    }
}

pub struct ReqwestTransport {
    client: reqwest::Client,
    endpoint: reqwest::Url,
    send_accept_header: bool,
}

impl ReqwestTransport {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let endpoint = reqwest::Url::parse(&config.endpoint).map_err(|e| {
            Error::config(format!("Invalid backend endpoint '{}': {}", config.endpoint, e))
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Created HTTP transport for: {}", endpoint);

        Ok(Self {
            client,
            endpoint,
            send_accept_header: config.send_accept_header,
        })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &GenerationRequest) -> Result<RawResponse> {
        // json() also sets Content-Type: application/json
        let mut req_builder = self.client.post(self.endpoint.clone()).json(request);

        if self.send_accept_header {
            req_builder = req_builder.header(ACCEPT, "application/json");
        }

        let response = req_builder.send().await?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("").to_string();
        let body = response.text().await?;

        debug!(
            "Backend answered {} with {} bytes",
            status.as_u16(),
            body.len()
        );

        Ok(RawResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }

    fn endpoint_port(&self) -> Option<u16> {
        self.endpoint.port_or_known_default()
    }
}
