//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → span.rs (relay hop spans, W3C trace context)
//!
//! Consumers:
//!     → Log aggregation (stdout, file, remote)
//!     → Distributed tracing via propagated traceparent headers
//! ```

pub mod logging;
pub mod span;

pub use span::Span;
