//! Wire payload for authorization callbacks.

use serde::{Deserialize, Serialize};

/// Authorization request relayed to the destination participant.
///
/// Immutable once constructed; passed through to the forwarding call
/// unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationPayload {
    /// Challenge the destination participant must respond to.
    pub challenge: String,

    /// Response value to the challenge.
    pub value: String,

    /// Consent this authorization executes under.
    pub consent_id: String,

    /// Account the authorization draws on.
    pub source_account_id: String,

    /// Authorization status; always `PENDING` at creation time.
    pub status: AuthorizationStatus,
}

/// Status of a relayed authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorizationStatus {
    #[serde(rename = "PENDING")]
    Pending,
}

impl AuthorizationPayload {
    /// Construct a pending authorization payload.
    pub fn new(
        challenge: impl Into<String>,
        value: impl Into<String>,
        consent_id: impl Into<String>,
        source_account_id: impl Into<String>,
    ) -> Self {
        Self {
            challenge: challenge.into(),
            value: value.into(),
            consent_id: consent_id.into(),
            source_account_id: source_account_id.into(),
            status: AuthorizationStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_fixes_pending_status() {
        let payload = AuthorizationPayload::new("c1", "v1", "cs1", "acc1");
        assert_eq!(payload.status, AuthorizationStatus::Pending);
    }

    #[test]
    fn test_serializes_camel_case() {
        let payload = AuthorizationPayload::new("c1", "v1", "cs1", "acc1");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["consentId"], "cs1");
        assert_eq!(json["sourceAccountId"], "acc1");
        assert_eq!(json["status"], "PENDING");
    }

    #[test]
    fn test_rejects_unknown_status() {
        let result: Result<AuthorizationPayload, _> = serde_json::from_value(serde_json::json!({
            "challenge": "c1",
            "value": "v1",
            "consentId": "cs1",
            "sourceAccountId": "acc1",
            "status": "ACCEPTED"
        }));
        assert!(result.is_err());
    }
}
