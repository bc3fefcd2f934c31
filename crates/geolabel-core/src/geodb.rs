//! Geolocation lookup
//!
//! Opaque keyed store mapping an address to its geographic record.
//! The database file format lives behind this trait; the orchestrator
//! treats every lookup failure as recoverable for that node.

use crate::types::GeoRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::net::IpAddr;
use thiserror::Error;

/// Lookup failures
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    #[error("address {0} not found in database")]
    NotFound(IpAddr),
    #[error("record for {0} has no coordinates")]
    NoCoordinates(IpAddr),
    #[error("geolocation database error: {0}")]
    Database(String),
}

/// Address to geolocation record lookup
#[async_trait]
pub trait GeoLookup: Send + Sync {
    async fn lookup(&self, addr: IpAddr) -> Result<GeoRecord, LookupError>;
}

/// In-memory lookup table for testing and development
#[derive(Debug, Default)]
pub struct StaticGeoDb {
    entries: HashMap<IpAddr, GeoRecord>,
}

impl StaticGeoDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an address -> record entry
    pub fn with(mut self, addr: IpAddr, record: GeoRecord) -> Self {
        self.entries.insert(addr, record);
        self
    }
}

#[async_trait]
impl GeoLookup for StaticGeoDb {
    async fn lookup(&self, addr: IpAddr) -> Result<GeoRecord, LookupError> {
        self.entries
            .get(&addr)
            .cloned()
            .ok_or(LookupError::NotFound(addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn berlin() -> GeoRecord {
        GeoRecord {
            latitude: 52.52,
            longitude: 13.405,
            city_name: "Berlin".into(),
            country_iso: Some("DE".into()),
            continent_code: Some("EU".into()),
        }
    }

    #[tokio::test]
    async fn static_db_returns_mapped_record() {
        let addr = IpAddr::V4(Ipv4Addr::new(203, 0, 113, 10));
        let db = StaticGeoDb::new().with(addr, berlin());
        assert_eq!(db.lookup(addr).await.unwrap(), berlin());
    }

    #[tokio::test]
    async fn static_db_misses_unknown_address() {
        let db = StaticGeoDb::new();
        let addr = IpAddr::V4(Ipv4Addr::new(203, 0, 113, 10));
        let err = db.lookup(addr).await.unwrap_err();
        assert!(matches!(err, LookupError::NotFound(_)));
    }
}
