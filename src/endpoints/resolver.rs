//! Participant endpoint resolution against the endpoint directory.
//!
//! # Responsibilities
//! - Map a (participant, endpoint type) pair to a callback base URL
//! - Query the external endpoint-directory service over HTTP
//!
//! # Design Decisions
//! - Resolution is fetched fresh per call; this crate holds no endpoint cache
//! - Any failure talking to the directory is a resolution failure; callers do
//!   not distinguish "directory unreachable" from "not registered"

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use crate::relay::error::{RelayError, RelayResult};

/// Symbolic key naming which callback URL a participant exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointType {
    /// POST callback receiving forwarded authorization requests.
    AuthorizationsPost,
    /// PUT callback receiving escalated error reports.
    AuthorizationsPutError,
}

impl EndpointType {
    /// Directory key for this endpoint type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointType::AuthorizationsPost => "AUTHORIZATIONS_POST",
            EndpointType::AuthorizationsPutError => "AUTHORIZATIONS_PUT_ERROR",
        }
    }
}

impl fmt::Display for EndpointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved callback endpoint for one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub participant_id: String,
    pub endpoint_type: EndpointType,
    /// Base URL the callback path is appended to.
    pub base_url: String,
}

/// Resolves participant callback endpoints.
#[async_trait]
pub trait EndpointResolver: Send + Sync {
    async fn resolve(
        &self,
        participant_id: &str,
        endpoint_type: EndpointType,
    ) -> RelayResult<EndpointDescriptor>;
}

/// Wire shape of one directory entry.
#[derive(Debug, Deserialize)]
struct EndpointEntry {
    #[serde(rename = "type")]
    kind: String,
    value: String,
}

/// Endpoint resolver backed by the HTTP endpoint-directory service.
#[derive(Debug, Clone)]
pub struct HttpEndpointResolver {
    client: reqwest::Client,
    service_url: String,
}

impl HttpEndpointResolver {
    /// Create a resolver against the directory at `service_url`.
    pub fn new(service_url: impl Into<String>, timeout: Duration) -> RelayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::Validation(format!("endpoint directory client: {e}")))?;
        Ok(Self {
            client,
            service_url: service_url.into(),
        })
    }

    fn endpoints_url(&self, participant_id: &str) -> String {
        format!(
            "{}/participants/{}/endpoints",
            self.service_url.trim_end_matches('/'),
            participant_id
        )
    }
}

#[async_trait]
impl EndpointResolver for HttpEndpointResolver {
    async fn resolve(
        &self,
        participant_id: &str,
        endpoint_type: EndpointType,
    ) -> RelayResult<EndpointDescriptor> {
        let resolution_error = |detail: String| RelayError::Resolution {
            participant: participant_id.to_string(),
            detail,
        };

        if participant_id.is_empty() {
            return Err(resolution_error("participant identifier is empty".into()));
        }

        let url = self.endpoints_url(participant_id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| resolution_error(format!("endpoint directory unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(resolution_error(format!(
                "endpoint directory answered {status}"
            )));
        }

        let entries: Vec<EndpointEntry> = response
            .json()
            .await
            .map_err(|e| resolution_error(format!("malformed directory response: {e}")))?;

        entries
            .into_iter()
            .find(|e| e.kind == endpoint_type.as_str())
            .map(|e| EndpointDescriptor {
                participant_id: participant_id.to_string(),
                endpoint_type,
                base_url: e.value,
            })
            .ok_or_else(|| {
                resolution_error(format!("no {endpoint_type} endpoint registered"))
            })
    }
}
