//! MaxMind database adapter
//!
//! [`GeoLookup`] backed by a local GeoLite2/GeoIP2 City database. The
//! file is opened once before the pass and released on drop.

use async_trait::async_trait;
use geolabel_core::{GeoLookup, GeoRecord, LookupError};
use maxminddb::geoip2;
use std::net::IpAddr;
use std::path::Path;

#[derive(Debug)]
pub struct MaxMindGeoDb {
    reader: maxminddb::Reader<Vec<u8>>,
}

impl MaxMindGeoDb {
    pub fn open(path: &Path) -> Result<Self, LookupError> {
        let reader = maxminddb::Reader::open_readfile(path)
            .map_err(|e| LookupError::Database(e.to_string()))?;
        Ok(Self { reader })
    }
}

#[async_trait]
impl GeoLookup for MaxMindGeoDb {
    async fn lookup(&self, addr: IpAddr) -> Result<GeoRecord, LookupError> {
        let city: geoip2::City = self.reader.lookup(addr).map_err(|e| match e {
            maxminddb::MaxMindDBError::AddressNotFoundError(_) => LookupError::NotFound(addr),
            other => LookupError::Database(other.to_string()),
        })?;

        let location = city.location.as_ref();
        let latitude = location
            .and_then(|l| l.latitude)
            .ok_or(LookupError::NoCoordinates(addr))?;
        let longitude = location
            .and_then(|l| l.longitude)
            .ok_or(LookupError::NoCoordinates(addr))?;

        Ok(GeoRecord {
            latitude,
            longitude,
            city_name: city
                .city
                .as_ref()
                .and_then(|c| c.names.as_ref())
                .and_then(|names| names.get("en"))
                .map(|name| name.to_string())
                .unwrap_or_default(),
            country_iso: city
                .country
                .as_ref()
                .and_then(|c| c.iso_code)
                .map(String::from),
            continent_code: city
                .continent
                .as_ref()
                .and_then(|c| c.code)
                .map(String::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_fails_cleanly_for_missing_file() {
        let err = MaxMindGeoDb::open(Path::new("/nonexistent/GeoLite2-City.mmdb")).unwrap_err();
        assert!(matches!(err, LookupError::Database(_)));
    }
}
