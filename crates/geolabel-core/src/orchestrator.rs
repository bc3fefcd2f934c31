//! Labeling pass orchestration
//!
//! Drives one pass over the registry: enumerate, then per node
//! resolve, look up, encode and patch. A failure on one node never
//! aborts the pass; each node ends in an [`UpdateOutcome`] aggregated
//! into the [`PassSummary`]. Only enumeration itself is fatal.

use crate::geodb::GeoLookup;
use crate::labels;
use crate::registry::{NodeRegistry, RegistryError};
use crate::resolve::AddressResolver;
use crate::types::{NodeIdentity, PassSummary, UpdateOutcome};
use std::sync::Arc;

/// One-shot labeling pass over all registered nodes
pub struct Orchestrator {
    resolver: Arc<dyn AddressResolver>,
    geodb: Arc<dyn GeoLookup>,
    registry: Arc<dyn NodeRegistry>,
}

impl Orchestrator {
    pub fn new(
        resolver: Arc<dyn AddressResolver>,
        geodb: Arc<dyn GeoLookup>,
        registry: Arc<dyn NodeRegistry>,
    ) -> Self {
        Self {
            resolver,
            geodb,
            registry,
        }
    }

    /// Run the full pass. Nodes are processed sequentially in
    /// enumeration order; re-running against unchanged inputs produces
    /// identical label sets and no-op patches.
    pub async fn run(&self) -> Result<PassSummary, RegistryError> {
        let nodes = self.registry.enumerate().await?;
        tracing::info!("labeling pass over {} nodes", nodes.len());

        let mut summary = PassSummary::default();
        for node in &nodes {
            let outcome = self.label_node(node).await;
            if outcome != UpdateOutcome::Applied {
                tracing::warn!("skipping {}: {}", node.name, outcome);
            }
            summary.record(&node.name, outcome);
        }
        Ok(summary)
    }

    async fn label_node(&self, node: &NodeIdentity) -> UpdateOutcome {
        let Some(hostname) = node.hostname.as_deref() else {
            return UpdateOutcome::ResolutionFailed("missing hostname label".into());
        };

        let addr = match self.resolver.resolve(hostname).await {
            Ok(addr) => addr,
            Err(e) => return UpdateOutcome::ResolutionFailed(e.to_string()),
        };
        tracing::info!("processing {} at {}", node.name, addr);

        let record = match self.geodb.lookup(addr).await {
            Ok(record) => record,
            Err(e) => return UpdateOutcome::LookupFailed(e.to_string()),
        };

        let labels = labels::encode(&record);
        tracing::info!("geo for {} is {:?}", addr, labels);

        // Space replacement is the only sanitization the encoder does;
        // anything still outside the registry's value syntax gets
        // surfaced here instead of failing silently downstream.
        for (key, value) in &labels {
            if !labels::is_valid_value(value) {
                tracing::warn!(
                    "label {}={} for {} violates registry value syntax",
                    key,
                    value,
                    node.name
                );
            }
        }

        if let Err(e) = self.registry.patch_labels(&node.name, &labels).await {
            return UpdateOutcome::PatchFailed(e.to_string());
        }
        UpdateOutcome::Applied
    }
}
