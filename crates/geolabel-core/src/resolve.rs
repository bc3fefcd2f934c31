//! Hostname resolution
//!
//! Boundary adapter around name lookup. Each node is resolved
//! independently within a pass; there is no cross-call caching.

use async_trait::async_trait;
use std::collections::HashMap;
use std::net::IpAddr;
use thiserror::Error;

/// Resolution failures
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    #[error("no address found for {0}")]
    NotFound(String),
    #[error("resolver failure for {host}: {detail}")]
    Resolver { host: String, detail: String },
}

/// Hostname to address resolution
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Resolve a hostname to a single address. When the resolver
    /// returns several addresses, the first one wins deterministically.
    async fn resolve(&self, hostname: &str) -> Result<IpAddr, ResolveError>;
}

/// Resolver backed by the operating system's name lookup
pub struct SystemResolver;

#[async_trait]
impl AddressResolver for SystemResolver {
    async fn resolve(&self, hostname: &str) -> Result<IpAddr, ResolveError> {
        // lookup_host wants a port; it is discarded from the result.
        let mut addrs = tokio::net::lookup_host((hostname, 0))
            .await
            .map_err(|e| ResolveError::Resolver {
                host: hostname.to_string(),
                detail: e.to_string(),
            })?;
        addrs
            .next()
            .map(|addr| addr.ip())
            .ok_or_else(|| ResolveError::NotFound(hostname.to_string()))
    }
}

/// Fixed-table resolver for testing and offline runs
#[derive(Debug, Default)]
pub struct StaticResolver {
    entries: HashMap<String, IpAddr>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hostname -> address entry
    pub fn with(mut self, hostname: &str, addr: IpAddr) -> Self {
        self.entries.insert(hostname.to_string(), addr);
        self
    }
}

#[async_trait]
impl AddressResolver for StaticResolver {
    async fn resolve(&self, hostname: &str) -> Result<IpAddr, ResolveError> {
        self.entries
            .get(hostname)
            .copied()
            .ok_or_else(|| ResolveError::NotFound(hostname.to_string()))
    }
}
