//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay
//! service. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};

/// Root configuration for the authorization relay service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Inbound listener configuration.
    pub listener: ListenerConfig,

    /// Identity of the switch itself.
    pub switch: SwitchConfig,

    /// Endpoint-directory service settings.
    pub endpoint_service: EndpointServiceConfig,

    /// Outbound callback delivery settings.
    pub outbound: OutboundConfig,

    /// Error serialization policy.
    pub error_handling: ErrorHandlingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:4004").
    pub bind_address: String,

    /// Inbound request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:4004".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Identity the switch uses when it originates callbacks.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SwitchConfig {
    /// Participant identifier placed in `fspiop-source` on escalated errors.
    pub participant_id: String,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            participant_id: "switch".to_string(),
        }
    }
}

/// Endpoint-directory service settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointServiceConfig {
    /// Base URL of the endpoint-directory service.
    pub url: String,

    /// Directory lookup timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for EndpointServiceConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3001".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Outbound callback delivery settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutboundConfig {
    /// Total time allowed for one callback delivery, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for OutboundConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 15,
        }
    }
}

/// Error serialization policy for escalated errors.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ErrorHandlingConfig {
    /// Attach the internal cause chain as a `cause` extension.
    pub include_cause_extension: bool,

    /// Clamp extension keys/values to the interoperability limits.
    pub truncate_extensions: bool,
}

impl Default for ErrorHandlingConfig {
    fn default() -> Self {
        Self {
            include_cause_extension: false,
            truncate_extensions: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.switch.participant_id, "switch");
        assert!(!config.error_handling.include_cause_extension);
        assert!(config.error_handling.truncate_extensions);
        assert_eq!(config.outbound.request_timeout_secs, 15);
    }

    #[test]
    fn test_minimal_toml_fills_defaults() {
        let config: RelayConfig = toml::from_str(
            r#"
            [endpoint_service]
            url = "http://directory.internal:3001"

            [error_handling]
            include_cause_extension = true
            "#,
        )
        .unwrap();
        assert_eq!(config.endpoint_service.url, "http://directory.internal:3001");
        assert!(config.error_handling.include_cause_extension);
        assert_eq!(config.listener.bind_address, "0.0.0.0:4004");
    }
}
