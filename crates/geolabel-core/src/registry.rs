//! Node registry access
//!
//! External store of node objects. Enumeration is consumed once per
//! pass; label patches merge the given keys into a node's existing
//! labels and never remove unrelated ones, so re-applying an identical
//! label set is a no-op.

use crate::labels::LabelSet;
use crate::types::NodeIdentity;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Registry failures
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("registry unavailable: {0}")]
    Unavailable(String),
    #[error("node {0} not found")]
    NodeNotFound(String),
    #[error("patch rejected for {node}: {detail}")]
    PatchRejected { node: String, detail: String },
}

/// Node enumeration and label merge operations
#[async_trait]
pub trait NodeRegistry: Send + Sync {
    /// List all nodes. Single bounded response, read once per pass.
    async fn enumerate(&self) -> Result<Vec<NodeIdentity>, RegistryError>;

    /// Merge the given labels into the node's label set. Keys already
    /// present are overwritten; unrelated labels stay untouched.
    async fn patch_labels(&self, name: &str, labels: &LabelSet) -> Result<(), RegistryError>;
}

#[derive(Debug, Clone)]
struct StoredNode {
    hostname: Option<String>,
    labels: LabelSet,
}

/// In-memory registry for testing and development.
///
/// Records every patch call so tests can assert on merge semantics and
/// call counts.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    nodes: RwLock<BTreeMap<String, StoredNode>>,
    patches: RwLock<Vec<(String, LabelSet)>>,
    denied: RwLock<HashSet<String>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node with its advertised hostname and existing labels
    pub fn add_node(&self, name: &str, hostname: Option<&str>, labels: LabelSet) {
        self.nodes.write().insert(
            name.to_string(),
            StoredNode {
                hostname: hostname.map(String::from),
                labels,
            },
        );
    }

    /// Make future patches against this node fail
    pub fn deny_patch(&self, name: &str) {
        self.denied.write().insert(name.to_string());
    }

    /// Current labels of a node
    pub fn labels_of(&self, name: &str) -> Option<LabelSet> {
        self.nodes.read().get(name).map(|n| n.labels.clone())
    }

    /// Number of patch calls accepted or rejected so far
    pub fn patch_count(&self) -> usize {
        self.patches.read().len()
    }
}

#[async_trait]
impl NodeRegistry for InMemoryRegistry {
    async fn enumerate(&self) -> Result<Vec<NodeIdentity>, RegistryError> {
        Ok(self
            .nodes
            .read()
            .iter()
            .map(|(name, node)| NodeIdentity {
                name: name.clone(),
                hostname: node.hostname.clone(),
            })
            .collect())
    }

    async fn patch_labels(&self, name: &str, labels: &LabelSet) -> Result<(), RegistryError> {
        self.patches
            .write()
            .push((name.to_string(), labels.clone()));
        if self.denied.read().contains(name) {
            return Err(RegistryError::PatchRejected {
                node: name.to_string(),
                detail: "denied by test fixture".into(),
            });
        }
        let mut nodes = self.nodes.write();
        let node = nodes
            .get_mut(name)
            .ok_or_else(|| RegistryError::NodeNotFound(name.to_string()))?;
        for (key, value) in labels {
            node.labels.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> LabelSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn patch_merges_without_removing_unrelated_labels() {
        let registry = InMemoryRegistry::new();
        registry.add_node("node-a", Some("node-a.example.com"), labels(&[("zone", "a")]));

        registry
            .patch_labels("node-a", &labels(&[("city", "Berlin"), ("lat", "n52.52")]))
            .await
            .unwrap();

        let merged = registry.labels_of("node-a").unwrap();
        assert_eq!(merged["zone"], "a");
        assert_eq!(merged["city"], "Berlin");
        assert_eq!(merged["lat"], "n52.52");
    }

    #[tokio::test]
    async fn patch_overwrites_known_keys() {
        let registry = InMemoryRegistry::new();
        registry.add_node("node-a", None, labels(&[("city", "Old_Town")]));

        registry
            .patch_labels("node-a", &labels(&[("city", "Berlin")]))
            .await
            .unwrap();

        assert_eq!(registry.labels_of("node-a").unwrap()["city"], "Berlin");
    }

    #[tokio::test]
    async fn patch_of_unknown_node_fails() {
        let registry = InMemoryRegistry::new();
        let err = registry
            .patch_labels("ghost", &labels(&[("city", "Berlin")]))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::NodeNotFound(_)));
    }

    #[tokio::test]
    async fn enumerate_lists_registered_nodes() {
        let registry = InMemoryRegistry::new();
        registry.add_node("node-b", Some("b.example.com"), LabelSet::new());
        registry.add_node("node-a", None, LabelSet::new());

        let nodes = registry.enumerate().await.unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name, "node-a");
        assert_eq!(nodes[0].hostname, None);
        assert_eq!(nodes[1].hostname.as_deref(), Some("b.example.com"));
    }
}
