//! Participant endpoint directory access.

pub mod resolver;

pub use resolver::{EndpointDescriptor, EndpointResolver, EndpointType, HttpEndpointResolver};
