//! Configuration validation.
//!
//! Semantic checks on top of what serde already guarantees syntactically.
//! Returns all validation errors, not just the first, so an operator can fix
//! a config file in one pass.

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::RelayConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!("'{}' is not a valid socket address", config.listener.bind_address),
        });
    }

    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "listener.request_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.switch.participant_id.is_empty() {
        errors.push(ValidationError {
            field: "switch.participant_id",
            message: "must not be empty".to_string(),
        });
    }

    if let Err(e) = url::Url::parse(&config.endpoint_service.url) {
        errors.push(ValidationError {
            field: "endpoint_service.url",
            message: format!("'{}' is not a valid URL: {e}", config.endpoint_service.url),
        });
    }

    if config.endpoint_service.timeout_secs == 0 {
        errors.push(ValidationError {
            field: "endpoint_service.timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.outbound.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "outbound.request_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RelayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RelayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.switch.participant_id = String::new();
        config.endpoint_service.url = "::bad::".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"listener.bind_address"));
        assert!(fields.contains(&"switch.participant_id"));
        assert!(fields.contains(&"endpoint_service.url"));
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        let mut config = RelayConfig::default();
        config.outbound.request_timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "outbound.request_timeout_secs");
    }
}
