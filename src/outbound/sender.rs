//! Outbound callback delivery.
//!
//! # Responsibilities
//! - Issue the forwarding POST and escalation PUT calls
//! - Carry routing headers and trace context to the counterparty
//! - Classify delivery failures (network vs. non-success response)
//!
//! # Design Decisions
//! - Timeouts live in the HTTP client; the relay adds no extra timeout layer
//! - Non-2xx responses keep a bounded slice of the body for diagnostics

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
pub use reqwest::Method;
use std::time::Duration;

use crate::observability::span::Span;
use crate::relay::error::{RelayError, RelayResult};
use crate::relay::headers::RoutingHeaders;

/// Response bodies kept on non-success statuses are clipped to this length.
const MAX_CAPTURED_BODY_LEN: usize = 512;

/// Sends callbacks to participant endpoints.
#[async_trait]
pub trait RequestSender: Send + Sync {
    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: &RoutingHeaders,
        body: &serde_json::Value,
        span: Option<&Span>,
    ) -> RelayResult<()>;
}

/// Request sender backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpRequestSender {
    client: reqwest::Client,
}

impl HttpRequestSender {
    pub fn new(timeout: Duration) -> RelayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::Validation(format!("outbound client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RequestSender for HttpRequestSender {
    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: &RoutingHeaders,
        body: &serde_json::Value,
        span: Option<&Span>,
    ) -> RelayResult<()> {
        let mut header_map = HeaderMap::new();
        for (name, value) in headers.iter() {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                RelayError::Validation(format!("invalid header name '{name}': {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                RelayError::Validation(format!("invalid value for header '{name}': {e}"))
            })?;
            header_map.insert(name, value);
        }
        if let Some(span) = span {
            header_map.insert(
                HeaderName::from_static("traceparent"),
                HeaderValue::from_str(&span.traceparent())
                    .map_err(|e| RelayError::Validation(format!("traceparent header: {e}")))?,
            );
        }

        tracing::debug!(method = %method, url = %url, "sending callback");

        let response = self
            .client
            .request(method, url)
            .headers(header_map)
            .json(body)
            .send()
            .await
            .map_err(|e| RelayError::Transport {
                url: url.to_string(),
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = body.chars().take(MAX_CAPTURED_BODY_LEN).collect();
            return Err(RelayError::Response {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
