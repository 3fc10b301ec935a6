//! Relay error taxonomy and error normalization.
//!
//! # Responsibilities
//! - Classify every relay failure (resolution, render, transport, response, validation)
//! - Map failures to interoperability error codes
//! - Build the `errorInformation` wire object sent to error callbacks
//!
//! # Design Decisions
//! - Validation errors are never escalated; the type makes the split explicit
//! - Normalization is idempotent: re-applying the serialization policy to an
//!   already-normalized error is a no-op
//! - Cause detail and extension truncation are policy flags injected via config

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ErrorHandlingConfig;

/// Extension keys longer than this are clamped when truncation is enabled.
pub const MAX_EXTENSION_KEY_LEN: usize = 32;

/// Extension values longer than this are clamped when truncation is enabled.
pub const MAX_EXTENSION_VALUE_LEN: usize = 128;

/// Extension key carrying the internal cause chain.
const CAUSE_EXTENSION_KEY: &str = "cause";

/// Errors that can occur while relaying a callback between participants.
#[derive(Debug, Error)]
pub enum RelayError {
    /// No callback endpoint could be resolved for the destination participant.
    #[error("endpoint resolution failed for participant '{participant}': {detail}")]
    Resolution { participant: String, detail: String },

    /// The callback URL template could not be rendered.
    #[error("URL template error: {0}")]
    Render(String),

    /// Network-level failure while sending the callback.
    #[error("transport error sending to {url}: {detail}")]
    Transport { url: String, detail: String },

    /// The counterparty answered with a non-success HTTP status.
    #[error("callback to {url} answered {status}")]
    Response { url: String, status: u16, body: String },

    /// Malformed input detected before any network call. Raised directly to
    /// the caller; never escalated to the error callback.
    #[error("validation error: {0}")]
    Validation(String),
}

impl RelayError {
    /// Interoperability error code for this failure class.
    pub fn error_code(&self) -> &'static str {
        match self {
            RelayError::Resolution { .. } => "3200",
            RelayError::Render(_) => "2001",
            RelayError::Transport { .. } => "2003",
            RelayError::Response { .. } => "3201",
            RelayError::Validation(_) => "3100",
        }
    }

    /// Whether this failure is reported to the source participant's error
    /// callback. Validation failures are raised to the immediate caller only.
    pub fn is_escalatable(&self) -> bool {
        !matches!(self, RelayError::Validation(_))
    }
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

/// Standardized error body relayed back to the source participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInformation {
    /// Machine-readable interoperability error code.
    pub error_code: String,

    /// Human-readable description of the failure.
    pub error_description: String,

    /// Optional extension list carrying additional detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_list: Option<ExtensionList>,
}

/// Wrapper matching the wire shape `{"errorInformation": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInformationObject {
    pub error_information: ErrorInformation,
}

/// Extension list as carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionList {
    pub extension: Vec<Extension>,
}

/// Single key/value extension entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    pub key: String,
    pub value: String,
}

impl ErrorInformation {
    /// Normalize a relay failure into the standardized error body.
    ///
    /// Created exactly once per failure, at the point of first catch. The
    /// configuration flags are read per call, not cached.
    pub fn from_relay_error(err: &RelayError, config: &ErrorHandlingConfig) -> Self {
        let info = ErrorInformation {
            error_code: err.error_code().to_string(),
            error_description: err.to_string(),
            extension_list: None,
        };
        info.normalized(config)
    }

    /// Apply the serialization policy (cause extension, truncation).
    ///
    /// Idempotent: applying the policy to an already-normalized value returns
    /// an equal value. The cause extension is attached at most once, and
    /// truncation is a clamp.
    pub fn normalized(mut self, config: &ErrorHandlingConfig) -> Self {
        if config.include_cause_extension && !self.has_extension(CAUSE_EXTENSION_KEY) {
            let cause = self.error_description.clone();
            self.extension_list
                .get_or_insert_with(|| ExtensionList { extension: Vec::new() })
                .extension
                .push(Extension {
                    key: CAUSE_EXTENSION_KEY.to_string(),
                    value: cause,
                });
        }

        if config.truncate_extensions {
            if let Some(list) = self.extension_list.as_mut() {
                for ext in list.extension.iter_mut() {
                    ext.key = clamp(&ext.key, MAX_EXTENSION_KEY_LEN);
                    ext.value = clamp(&ext.value, MAX_EXTENSION_VALUE_LEN);
                }
            }
        }

        self
    }

    /// Wrap into the wire object.
    pub fn into_object(self) -> ErrorInformationObject {
        ErrorInformationObject {
            error_information: self,
        }
    }

    fn has_extension(&self, key: &str) -> bool {
        self.extension_list
            .as_ref()
            .map(|l| l.extension.iter().any(|e| e.key == key))
            .unwrap_or(false)
    }
}

/// Truncate to at most `max` characters, respecting UTF-8 boundaries.
fn clamp(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(include_cause: bool, truncate: bool) -> ErrorHandlingConfig {
        ErrorHandlingConfig {
            include_cause_extension: include_cause,
            truncate_extensions: truncate,
        }
    }

    #[test]
    fn test_error_codes_by_class() {
        let err = RelayError::Resolution {
            participant: "dfspb".into(),
            detail: "no endpoint registered".into(),
        };
        assert_eq!(err.error_code(), "3200");
        assert!(err.is_escalatable());

        let err = RelayError::Validation("span already finished".into());
        assert_eq!(err.error_code(), "3100");
        assert!(!err.is_escalatable());
    }

    #[test]
    fn test_cause_extension_attached_once() {
        let err = RelayError::Transport {
            url: "http://dfspb.example/authorizations/1".into(),
            detail: "connection refused".into(),
        };
        let info = ErrorInformation::from_relay_error(&err, &policy(true, false));

        let list = info.extension_list.as_ref().unwrap();
        assert_eq!(list.extension.len(), 1);
        assert_eq!(list.extension[0].key, "cause");
        assert!(list.extension[0].value.contains("connection refused"));

        // Re-normalizing must not attach a second cause entry.
        let again = info.clone().normalized(&policy(true, false));
        assert_eq!(again, info);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let err = RelayError::Response {
            url: "http://dfspb.example/authorizations/1".into(),
            status: 503,
            body: "x".repeat(500),
        };
        let config = policy(true, true);

        let once = ErrorInformation::from_relay_error(&err, &config);
        let twice = once.clone().normalized(&config);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_extensions_truncated() {
        let info = ErrorInformation {
            error_code: "2001".into(),
            error_description: "boom".into(),
            extension_list: Some(ExtensionList {
                extension: vec![Extension {
                    key: "k".repeat(100),
                    value: "v".repeat(1000),
                }],
            }),
        };
        let info = info.normalized(&policy(false, true));

        let ext = &info.extension_list.as_ref().unwrap().extension[0];
        assert_eq!(ext.key.len(), MAX_EXTENSION_KEY_LEN);
        assert_eq!(ext.value.len(), MAX_EXTENSION_VALUE_LEN);
    }

    #[test]
    fn test_flags_disabled_leaves_error_bare() {
        let err = RelayError::Render("missing {ID} placeholder".into());
        let info = ErrorInformation::from_relay_error(&err, &policy(false, false));
        assert!(info.extension_list.is_none());
        assert_eq!(info.error_code, "2001");
    }

    #[test]
    fn test_wire_shape() {
        let err = RelayError::Resolution {
            participant: "dfspb".into(),
            detail: "not registered".into(),
        };
        let obj = ErrorInformation::from_relay_error(&err, &policy(false, false)).into_object();
        let json = serde_json::to_value(&obj).unwrap();
        assert_eq!(json["errorInformation"]["errorCode"], "3200");
        assert!(json["errorInformation"]["errorDescription"]
            .as_str()
            .unwrap()
            .contains("dfspb"));
    }
}
