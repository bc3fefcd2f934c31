//! Core data model
//!
//! Value types passed between the resolver, the geolocation lookup and
//! the registry update protocol.

use serde::Serialize;
use std::fmt;

/// A node as enumerated from the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeIdentity {
    /// Cluster-assigned node name
    pub name: String,
    /// Advertised hostname label, if the node carries one
    pub hostname: Option<String>,
}

/// Geographic attributes for one resolved address
#[derive(Debug, Clone, PartialEq)]
pub struct GeoRecord {
    pub latitude: f64,
    pub longitude: f64,
    /// English display name, possibly empty
    pub city_name: String,
    /// Two-letter country code, absent for unlocated addresses
    pub country_iso: Option<String>,
    /// Continent code, absent for unlocated addresses
    pub continent_code: Option<String>,
}

/// Per-node result of one labeling pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason")]
pub enum UpdateOutcome {
    /// Labels merged onto the node
    Applied,
    /// Hostname missing or not resolvable to an address
    ResolutionFailed(String),
    /// Address not found in the geolocation database
    LookupFailed(String),
    /// Registry rejected the label merge
    PatchFailed(String),
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateOutcome::Applied => write!(f, "applied"),
            UpdateOutcome::ResolutionFailed(reason) => write!(f, "resolution failed: {}", reason),
            UpdateOutcome::LookupFailed(reason) => write!(f, "lookup failed: {}", reason),
            UpdateOutcome::PatchFailed(reason) => write!(f, "patch failed: {}", reason),
        }
    }
}

/// Outcome for one named node
#[derive(Debug, Clone, Serialize)]
pub struct NodeOutcome {
    pub node: String,
    #[serde(flatten)]
    pub outcome: UpdateOutcome,
}

/// Aggregate result of a full labeling pass
#[derive(Debug, Default, Serialize)]
pub struct PassSummary {
    pub applied: usize,
    pub resolution_failed: usize,
    pub lookup_failed: usize,
    pub patch_failed: usize,
    /// Per-node outcomes in enumeration order
    pub outcomes: Vec<NodeOutcome>,
}

impl PassSummary {
    /// Record one node's outcome
    pub fn record(&mut self, node: &str, outcome: UpdateOutcome) {
        match outcome {
            UpdateOutcome::Applied => self.applied += 1,
            UpdateOutcome::ResolutionFailed(_) => self.resolution_failed += 1,
            UpdateOutcome::LookupFailed(_) => self.lookup_failed += 1,
            UpdateOutcome::PatchFailed(_) => self.patch_failed += 1,
        }
        self.outcomes.push(NodeOutcome {
            node: node.to_string(),
            outcome,
        });
    }

    /// Number of nodes attempted
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// True iff every attempted node reached `Applied`
    pub fn succeeded(&self) -> bool {
        self.resolution_failed == 0 && self.lookup_failed == 0 && self.patch_failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_per_outcome() {
        let mut summary = PassSummary::default();
        summary.record("node-a", UpdateOutcome::Applied);
        summary.record("node-b", UpdateOutcome::ResolutionFailed("no such host".into()));
        summary.record("node-c", UpdateOutcome::LookupFailed("not in database".into()));
        summary.record("node-d", UpdateOutcome::PatchFailed("conflict".into()));

        assert_eq!(summary.total(), 4);
        assert_eq!(summary.applied, 1);
        assert_eq!(summary.resolution_failed, 1);
        assert_eq!(summary.lookup_failed, 1);
        assert_eq!(summary.patch_failed, 1);
        assert!(!summary.succeeded());
    }

    #[test]
    fn summary_succeeds_when_all_applied() {
        let mut summary = PassSummary::default();
        summary.record("node-a", UpdateOutcome::Applied);
        summary.record("node-b", UpdateOutcome::Applied);
        assert!(summary.succeeded());
    }

    #[test]
    fn empty_pass_succeeds() {
        let summary = PassSummary::default();
        assert_eq!(summary.total(), 0);
        assert!(summary.succeeded());
    }

    #[test]
    fn outcome_display_carries_reason() {
        let outcome = UpdateOutcome::ResolutionFailed("missing hostname label".into());
        assert_eq!(outcome.to_string(), "resolution failed: missing hostname label");
        assert_eq!(UpdateOutcome::Applied.to_string(), "applied");
    }
}
