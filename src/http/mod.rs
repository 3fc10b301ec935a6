//! Inbound HTTP surface.
//!
//! # Data Flow
//! ```text
//! POST /authorizations/{ID}
//!     → server.rs (validate routing headers, acknowledge 202)
//!     → relay subsystem (forward, escalate on failure)
//! ```

pub mod server;

pub use server::{AppState, HttpServer};
