//! Relay subsystem: the two-hop forward/escalate flow.
//!
//! # Data Flow
//! ```text
//! inbound authorization (headers, resource id, payload, span)
//!     → forwarder.rs (resolve destination → render URL → POST)
//!     → on failure: error.rs (normalize)
//!         → forwarder.rs escalation hop (reversed headers → PUT)
//!     → original outcome returned to the caller
//! ```
//!
//! # Design Decisions
//! - The relay holds no cross-request state; each invocation is independent
//! - Escalation is attempted exactly once per failure and never retried
//! - An escalation failure is never escalated again (two hops maximum)

pub mod error;
pub mod forwarder;
pub mod headers;
pub mod payload;
pub mod template;

pub use error::{ErrorInformation, ErrorInformationObject, RelayError, RelayResult};
pub use forwarder::{
    Relay, AUTHORIZATIONS_CALLBACK_PATH, AUTHORIZATIONS_ERROR_CALLBACK_PATH,
};
pub use headers::{RoutingHeaders, FSPIOP_DESTINATION, FSPIOP_SOURCE};
pub use payload::{AuthorizationPayload, AuthorizationStatus};
