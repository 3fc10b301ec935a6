//! Routing headers carried between participants.
//!
//! # Responsibilities
//! - Hold the header map relayed with each callback
//! - Expose the source/destination participant identifiers
//! - Build the reversed header set used for error escalation
//!
//! # Design Decisions
//! - Header names are case-insensitive; stored lowercased
//! - Reversal swaps routing only: source becomes the switch, destination
//!   becomes the original source, all other headers pass through unchanged

use std::collections::BTreeMap;

/// Header naming the participant a callback originates from.
pub const FSPIOP_SOURCE: &str = "fspiop-source";

/// Header naming the participant a callback is destined for.
pub const FSPIOP_DESTINATION: &str = "fspiop-destination";

/// Routing headers relayed with a callback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingHeaders {
    map: BTreeMap<String, String>,
}

impl RoutingHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from name/value pairs, lowercasing names.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let map = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into()))
            .collect();
        Self { map }
    }

    /// Insert a header, lowercasing the name.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.map.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Look up a header by case-insensitive name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Source participant identifier, if present and non-empty.
    pub fn source(&self) -> Option<&str> {
        self.get(FSPIOP_SOURCE).filter(|v| !v.is_empty())
    }

    /// Destination participant identifier, if present and non-empty.
    pub fn destination(&self) -> Option<&str> {
        self.get(FSPIOP_DESTINATION).filter(|v| !v.is_empty())
    }

    /// Headers for the error-escalation hop: the switch becomes the source
    /// and the original source becomes the destination. Everything else is
    /// carried through unchanged.
    pub fn reversed(&self, switch_participant_id: &str) -> RoutingHeaders {
        let mut reversed = self.clone();
        let original_source = self.source().unwrap_or_default().to_string();
        reversed.insert(FSPIOP_SOURCE, switch_participant_id);
        reversed.insert(FSPIOP_DESTINATION, original_source);
        reversed
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RoutingHeaders {
        RoutingHeaders::from_pairs([
            ("FSPIOP-Source", "dfspa"),
            ("FSPIOP-Destination", "dfspb"),
            ("content-type", "application/json"),
        ])
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let headers = sample();
        assert_eq!(headers.source(), Some("dfspa"));
        assert_eq!(headers.destination(), Some("dfspb"));
        assert_eq!(headers.get("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_empty_identifier_reads_as_absent() {
        let headers = RoutingHeaders::from_pairs([("fspiop-source", ""), ("fspiop-destination", "dfspb")]);
        assert_eq!(headers.source(), None);
        assert_eq!(headers.destination(), Some("dfspb"));
    }

    #[test]
    fn test_reversed_swaps_routing_only() {
        let reversed = sample().reversed("switch");
        assert_eq!(reversed.source(), Some("switch"));
        assert_eq!(reversed.destination(), Some("dfspa"));
        assert_eq!(reversed.get("content-type"), Some("application/json"));
    }

    #[test]
    fn test_reversed_with_missing_source() {
        let headers = RoutingHeaders::from_pairs([("fspiop-destination", "dfspb")]);
        let reversed = headers.reversed("switch");
        assert_eq!(reversed.source(), Some("switch"));
        // No original source to route back to; destination reads as absent.
        assert_eq!(reversed.destination(), None);
    }
}
