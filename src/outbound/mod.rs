//! Outbound callback delivery.

pub mod sender;

pub use sender::{HttpRequestSender, Method, RequestSender};
