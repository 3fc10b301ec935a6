//! Forwarding and error escalation between participants.
//!
//! # Responsibilities
//! - Forward validated authorization requests to the destination participant
//! - Escalate forwarding failures back to the source participant's
//!   error callback
//! - Keep the trace span for each hop open exactly as long as the hop runs
//!
//! # Design Decisions
//! - Resolution, rendering and sending happen strictly in that order; the
//!   escalation path needs the forwarding failure fully materialized first
//! - A forwarding failure is escalated exactly once, never retried; an
//!   escalation failure is raised but never escalated again, bounding the
//!   relay to two hops
//! - Validation failures are raised to the immediate caller without touching
//!   the network: no party has been contacted yet

use std::sync::Arc;

use crate::config::ErrorHandlingConfig;
use crate::endpoints::resolver::{EndpointResolver, EndpointType};
use crate::observability::span::Span;
use crate::outbound::sender::{Method, RequestSender};
use crate::relay::error::{ErrorInformation, RelayError, RelayResult};
use crate::relay::headers::RoutingHeaders;
use crate::relay::payload::AuthorizationPayload;
use crate::relay::template;

/// Callback path the forwarded authorization is POSTed to.
pub const AUTHORIZATIONS_CALLBACK_PATH: &str = "/authorizations/{ID}";

/// Callback path an escalated error is PUT to.
pub const AUTHORIZATIONS_ERROR_CALLBACK_PATH: &str = "/authorizations/{ID}/error";

/// One-way asynchronous request-forwarding relay.
///
/// Holds no cross-request state; endpoint resolution is fetched fresh per
/// call and the error-serialization policy is fixed at construction.
pub struct Relay {
    resolver: Arc<dyn EndpointResolver>,
    sender: Arc<dyn RequestSender>,
    switch_participant_id: String,
    error_handling: ErrorHandlingConfig,
}

impl Relay {
    pub fn new(
        resolver: Arc<dyn EndpointResolver>,
        sender: Arc<dyn RequestSender>,
        switch_participant_id: impl Into<String>,
        error_handling: ErrorHandlingConfig,
    ) -> Self {
        Self {
            resolver,
            sender,
            switch_participant_id: switch_participant_id.into(),
            error_handling,
        }
    }

    /// Error-serialization policy this relay was constructed with.
    pub fn error_handling(&self) -> &ErrorHandlingConfig {
        &self.error_handling
    }

    /// Forward an authorization request to the destination participant.
    ///
    /// On failure the normalized error is escalated once to the original
    /// source participant's error callback, then the original failure is
    /// returned. The child span derived from `parent_span` is finished on
    /// every exit path.
    pub async fn forward_authorization(
        &self,
        path: &str,
        headers: &RoutingHeaders,
        resource_id: &str,
        payload: &AuthorizationPayload,
        parent_span: Option<&Span>,
    ) -> RelayResult<()> {
        let mut child = match parent_span {
            Some(parent) => Some(parent.child("authorizations-forward")?),
            None => None,
        };

        let forward = self
            .attempt_callback(
                EndpointType::AuthorizationsPost,
                Method::POST,
                path,
                headers,
                resource_id,
                serde_json::to_value(payload),
                child.as_ref(),
            )
            .await;

        match forward {
            Ok(()) => {
                if let Some(span) = child.as_mut() {
                    span.finish();
                }
                tracing::info!(
                    resource_id = %resource_id,
                    destination = headers.destination().unwrap_or("<none>"),
                    "authorization forwarded"
                );
                Ok(())
            }
            Err(err) if err.is_escalatable() => {
                tracing::error!(
                    resource_id = %resource_id,
                    destination = headers.destination().unwrap_or("<none>"),
                    error = %err,
                    "authorization forwarding failed, escalating to source"
                );

                let error_info = ErrorInformation::from_relay_error(&err, &self.error_handling);
                let reversed = headers.reversed(&self.switch_participant_id);
                if let Err(escalation_err) = self
                    .forward_authorization_error(
                        AUTHORIZATIONS_ERROR_CALLBACK_PATH,
                        &reversed,
                        resource_id,
                        &error_info,
                        child.as_ref(),
                    )
                    .await
                {
                    // The escalation outcome never replaces the original
                    // failure; it is observable through logging only.
                    tracing::error!(
                        resource_id = %resource_id,
                        error = %escalation_err,
                        "error escalation failed"
                    );
                }

                if let Some(span) = child.as_mut() {
                    span.finish_with_error(&err);
                }
                Err(err)
            }
            Err(err) => {
                // Validation failure: no party was contacted, nothing to
                // escalate.
                if let Some(span) = child.as_mut() {
                    span.finish_with_error(&err);
                }
                Err(err)
            }
        }
    }

    /// Relay a normalized error to a participant's error callback.
    ///
    /// `headers` are assumed already reversed by the caller. A failure here
    /// is returned but never escalated further: there is no error-of-an-error
    /// hop.
    pub async fn forward_authorization_error(
        &self,
        path: &str,
        headers: &RoutingHeaders,
        resource_id: &str,
        error: &ErrorInformation,
        parent_span: Option<&Span>,
    ) -> RelayResult<()> {
        let mut child = match parent_span {
            Some(parent) => Some(parent.child("authorizations-error")?),
            None => None,
        };

        let result = self
            .attempt_callback(
                EndpointType::AuthorizationsPutError,
                Method::PUT,
                path,
                headers,
                resource_id,
                serde_json::to_value(error.clone().into_object()),
                child.as_ref(),
            )
            .await;

        match result {
            Ok(()) => {
                if let Some(span) = child.as_mut() {
                    span.finish();
                }
                tracing::info!(
                    resource_id = %resource_id,
                    destination = headers.destination().unwrap_or("<none>"),
                    error_code = %error.error_code,
                    "error relayed to source participant"
                );
                Ok(())
            }
            Err(err) => {
                if let Some(span) = child.as_mut() {
                    span.finish_with_error(&err);
                }
                Err(err)
            }
        }
    }

    /// One resolve → render → send attempt, shared by both hops.
    #[allow(clippy::too_many_arguments)]
    async fn attempt_callback(
        &self,
        endpoint_type: EndpointType,
        method: Method,
        path: &str,
        headers: &RoutingHeaders,
        resource_id: &str,
        body: Result<serde_json::Value, serde_json::Error>,
        span: Option<&Span>,
    ) -> RelayResult<()> {
        let body =
            body.map_err(|e| RelayError::Validation(format!("payload serialization: {e}")))?;

        let destination = headers.destination().ok_or_else(|| RelayError::Resolution {
            participant: "<none>".to_string(),
            detail: "routing headers carry no destination participant".to_string(),
        })?;

        let endpoint = self.resolver.resolve(destination, endpoint_type).await?;
        let template = format!("{}{}", endpoint.base_url.trim_end_matches('/'), path);
        let url = template::render(&template, &[("ID", resource_id)])?;

        self.sender.send(method, &url, headers, &body, span).await
    }
}
