//! Authorization relay for a financial-interoperability switch.
//!
//! Accepts inbound authorization requests, resolves the destination
//! participant's callback endpoint, forwards the payload, and escalates any
//! forwarding failure back to the source participant's error callback.

pub mod config;
pub mod endpoints;
pub mod http;
pub mod observability;
pub mod outbound;
pub mod relay;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use relay::{AuthorizationPayload, Relay, RelayError, RoutingHeaders};
