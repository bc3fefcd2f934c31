//! Kubernetes node registry adapter
//!
//! Speaks the core v1 nodes API directly over HTTP: `GET
//! /api/v1/nodes` for enumeration and a strategic merge patch against
//! `/api/v1/nodes/{name}` for label updates. Strategic merge leaves
//! labels not named in the patch untouched, which gives the merge
//! semantics the update protocol requires.

use async_trait::async_trait;
use geolabel_core::{LabelSet, NodeIdentity, NodeRegistry, RegistryError};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Node label carrying the advertised hostname
const HOSTNAME_LABEL: &str = "kubernetes.io/hostname";

pub struct KubeNodeRegistry {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct NodeList {
    items: Vec<Node>,
}

#[derive(Debug, Deserialize)]
struct Node {
    metadata: NodeMetadata,
}

#[derive(Debug, Deserialize)]
struct NodeMetadata {
    name: String,
    #[serde(default)]
    labels: BTreeMap<String, String>,
}

impl Node {
    fn into_identity(self) -> NodeIdentity {
        let hostname = self.metadata.labels.get(HOSTNAME_LABEL).cloned();
        NodeIdentity {
            name: self.metadata.name,
            hostname,
        }
    }
}

impl KubeNodeRegistry {
    pub fn new(base_url: &str, token: Option<&str>, insecure: bool) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(|e| RegistryError::Unavailable(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
            client,
        })
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.header("Authorization", format!("Bearer {}", token)),
            None => req,
        }
    }
}

#[async_trait]
impl NodeRegistry for KubeNodeRegistry {
    async fn enumerate(&self) -> Result<Vec<NodeIdentity>, RegistryError> {
        let url = format!("{}/api/v1/nodes", self.base_url);
        let resp = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| RegistryError::Unavailable(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(RegistryError::Unavailable(format!(
                "GET {} returned {}",
                url,
                resp.status()
            )));
        }
        let list: NodeList = resp
            .json()
            .await
            .map_err(|e| RegistryError::Unavailable(e.to_string()))?;
        Ok(list.items.into_iter().map(Node::into_identity).collect())
    }

    async fn patch_labels(&self, name: &str, labels: &LabelSet) -> Result<(), RegistryError> {
        let url = format!("{}/api/v1/nodes/{}", self.base_url, name);
        let body = serde_json::json!({ "metadata": { "labels": labels } });
        let payload = serde_json::to_vec(&body).map_err(|e| RegistryError::PatchRejected {
            node: name.to_string(),
            detail: e.to_string(),
        })?;

        let resp = self
            .authorize(self.client.patch(&url))
            .header("Content-Type", "application/strategic-merge-patch+json")
            .body(payload)
            .send()
            .await
            .map_err(|e| RegistryError::Unavailable(e.to_string()))?;

        match resp.status() {
            status if status.is_success() => Ok(()),
            reqwest::StatusCode::NOT_FOUND => Err(RegistryError::NodeNotFound(name.to_string())),
            status => Err(RegistryError::PatchRejected {
                node: name.to_string(),
                detail: status.to_string(),
            }),
        }
    }
}
