//! HTTP server setup and inbound handlers.
//!
//! # Responsibilities
//! - Create the Axum router with the authorization and health handlers
//! - Wire up middleware (tracing, request timeout)
//! - Validate routing headers before the relay is invoked
//! - Acknowledge inbound requests and run the relay asynchronously
//!
//! # Design Decisions
//! - The inbound call is acknowledged with 202 Accepted; the forwarding
//!   outcome travels back to participants over their callbacks, not over
//!   this connection
//! - Header validation failures are rejected synchronously with an
//!   `errorInformation` body

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RelayConfig;
use crate::observability::span::Span;
use crate::relay::error::{ErrorInformation, RelayError};
use crate::relay::forwarder::{Relay, AUTHORIZATIONS_CALLBACK_PATH};
use crate::relay::headers::RoutingHeaders;
use crate::relay::payload::AuthorizationPayload;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
}

/// HTTP server for the authorization relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig, relay: Arc<Relay>) -> Self {
        let state = AppState { relay };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        Router::new()
            .route("/authorizations/{id}", post(authorizations_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Inbound authorization handler.
///
/// Validates the routing headers, acknowledges the request, and runs the
/// relay in a detached task owning the root span.
async fn authorizations_handler(
    State(state): State<AppState>,
    Path(resource_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<AuthorizationPayload>,
) -> Response {
    let routing = routing_headers(&headers);

    if routing.source().is_none() {
        let err = RelayError::Validation(
            "routing headers carry no source participant".to_string(),
        );
        tracing::warn!(resource_id = %resource_id, error = %err, "rejecting inbound request");
        let body = ErrorInformation::from_relay_error(&err, state.relay.error_handling());
        return (StatusCode::BAD_REQUEST, Json(body.into_object())).into_response();
    }

    tracing::debug!(
        resource_id = %resource_id,
        source = routing.source().unwrap_or("<none>"),
        destination = routing.destination().unwrap_or("<none>"),
        "accepted authorization request"
    );

    tokio::spawn(async move {
        let mut root = Span::root("inbound-authorizations");
        let result = state
            .relay
            .forward_authorization(
                AUTHORIZATIONS_CALLBACK_PATH,
                &routing,
                &resource_id,
                &payload,
                Some(&root),
            )
            .await;
        match result {
            Ok(()) => root.finish(),
            Err(err) => {
                tracing::error!(
                    resource_id = %resource_id,
                    error = %err,
                    "relay invocation failed"
                );
                root.finish_with_error(&err);
            }
        }
    });

    StatusCode::ACCEPTED.into_response()
}

/// Liveness probe.
async fn health_handler() -> Response {
    Json(serde_json::json!({ "status": "OK" })).into_response()
}

/// Headers tied to this connection or body; never relayed. The forwarded
/// request gets its own framing from the outbound client.
const HOP_BY_HOP_HEADERS: [&str; 5] = [
    "host",
    "content-length",
    "connection",
    "transfer-encoding",
    "expect",
];

/// Copy relayable headers into the relay's routing header map.
fn routing_headers(headers: &HeaderMap) -> RoutingHeaders {
    let mut routing = RoutingHeaders::new();
    for (name, value) in headers.iter() {
        if HOP_BY_HOP_HEADERS.contains(&name.as_str()) {
            continue;
        }
        if let Ok(value) = value.to_str() {
            routing.insert(name.as_str(), value);
        }
    }
    routing
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_headers_copied_case_insensitively() {
        let mut headers = HeaderMap::new();
        headers.insert("FSPIOP-Source", "dfspa".parse().unwrap());
        headers.insert("FSPIOP-Destination", "dfspb".parse().unwrap());

        let routing = routing_headers(&headers);
        assert_eq!(routing.source(), Some("dfspa"));
        assert_eq!(routing.destination(), Some("dfspb"));
    }

    #[test]
    fn test_hop_by_hop_headers_not_relayed() {
        let mut headers = HeaderMap::new();
        headers.insert("Host", "relay.internal".parse().unwrap());
        headers.insert("Content-Length", "42".parse().unwrap());
        headers.insert("Content-Type", "application/json".parse().unwrap());

        let routing = routing_headers(&headers);
        assert_eq!(routing.get("host"), None);
        assert_eq!(routing.get("content-length"), None);
        assert_eq!(routing.get("content-type"), Some("application/json"));
    }
}
