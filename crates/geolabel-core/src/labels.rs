//! Label encoding
//!
//! Pure transformation from a [`GeoRecord`] into the canonical label
//! set written onto nodes. The same record always yields the same
//! labels; downstream selectors depend on the exact formatting rules
//! here, so they must not drift.
//!
//! Coordinates are rendered with a hemisphere prefix and exactly two
//! digits after the decimal point, using the standard formatter's
//! two-decimal rounding (nearest, ties to even on the exact binary
//! value). Absent country/continent codes are encoded as the empty
//! string so the output always carries all five keys.

use crate::types::GeoRecord;
use std::collections::BTreeMap;

/// Ordered key/value label mapping, as merged into the registry
pub type LabelSet = BTreeMap<String, String>;

/// Latitude key, e.g. `n40.71`
pub const KEY_LAT: &str = "lat";
/// Longitude key, e.g. `w74.01`
pub const KEY_LON: &str = "lon";
/// City key, spaces replaced by underscores
pub const KEY_CITY: &str = "city";
/// Two-letter country code key
pub const KEY_COUNTRY_ISO: &str = "country_iso";
/// Continent code key
pub const KEY_CONTINENT: &str = "continent";

/// Maximum length the registry accepts for a label value
pub const MAX_VALUE_LEN: usize = 63;

/// Encode a geolocation record into the five canonical labels.
///
/// Total and deterministic: never fails, and the output always
/// contains exactly `lat`, `lon`, `city`, `country_iso` and
/// `continent`.
pub fn encode(record: &GeoRecord) -> LabelSet {
    let mut labels = LabelSet::new();
    labels.insert(
        KEY_LAT.into(),
        encode_coordinate(record.latitude, 'n', 's'),
    );
    labels.insert(
        KEY_LON.into(),
        encode_coordinate(record.longitude, 'e', 'w'),
    );
    // The city name might be empty; spaces become underscores so the
    // value carries no whitespace (e.g. "New_York").
    labels.insert(KEY_CITY.into(), record.city_name.replace(' ', "_"));
    labels.insert(
        KEY_COUNTRY_ISO.into(),
        record.country_iso.clone().unwrap_or_default(),
    );
    labels.insert(
        KEY_CONTINENT.into(),
        record.continent_code.clone().unwrap_or_default(),
    );
    labels
}

/// Hemisphere prefix plus two-decimal absolute value. Zero takes the
/// non-negative prefix.
fn encode_coordinate(value: f64, non_negative: char, negative: char) -> String {
    let prefix = if value >= 0.0 { non_negative } else { negative };
    format!("{}{:.2}", prefix, value.abs())
}

/// Check a value against the registry's label-value syntax:
/// `[A-Za-z0-9_.-]*`, at most [`MAX_VALUE_LEN`] characters.
///
/// Encoding does not sanitize beyond space replacement, so city names
/// with apostrophes or accented characters can still violate this;
/// callers are expected to surface such values rather than drop them.
pub fn is_valid_value(value: &str) -> bool {
    value.len() <= MAX_VALUE_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(latitude: f64, longitude: f64) -> GeoRecord {
        GeoRecord {
            latitude,
            longitude,
            city_name: String::new(),
            country_iso: None,
            continent_code: None,
        }
    }

    #[test]
    fn encodes_new_york() {
        let record = GeoRecord {
            latitude: 40.7128,
            longitude: -74.0060,
            city_name: "New York".into(),
            country_iso: Some("US".into()),
            continent_code: Some("NA".into()),
        };
        let labels = encode(&record);
        assert_eq!(labels[KEY_LAT], "n40.71");
        assert_eq!(labels[KEY_LON], "w74.01");
        assert_eq!(labels[KEY_CITY], "New_York");
        assert_eq!(labels[KEY_COUNTRY_ISO], "US");
        assert_eq!(labels[KEY_CONTINENT], "NA");
        assert_eq!(labels.len(), 5);
    }

    #[test]
    fn zero_takes_non_negative_prefix() {
        let labels = encode(&record(0.0, 0.0));
        assert_eq!(labels[KEY_LAT], "n0.00");
        assert_eq!(labels[KEY_LON], "e0.00");
    }

    #[test]
    fn hemisphere_prefix_follows_sign() {
        for lat in [-90.0, -45.5, -0.25, 0.0, 17.77, 90.0] {
            let labels = encode(&record(lat, 0.0));
            let value = &labels[KEY_LAT];
            if lat >= 0.0 {
                assert!(value.starts_with('n'), "{} -> {}", lat, value);
            } else {
                assert!(value.starts_with('s'), "{} -> {}", lat, value);
            }
        }
        for lon in [-180.0, -74.006, 0.0, 13.4, 179.999, 180.0] {
            let labels = encode(&record(0.0, lon));
            let value = &labels[KEY_LON];
            if lon >= 0.0 {
                assert!(value.starts_with('e'), "{} -> {}", lon, value);
            } else {
                assert!(value.starts_with('w'), "{} -> {}", lon, value);
            }
        }
    }

    #[test]
    fn coordinates_keep_two_decimals() {
        for (lat, lon) in [(-3.456, 179.999), (90.0, -180.0), (0.1, -0.1)] {
            let labels = encode(&record(lat, lon));
            for key in [KEY_LAT, KEY_LON] {
                let digits = labels[key].split('.').nth(1).unwrap();
                assert_eq!(digits.len(), 2, "{}", labels[key]);
            }
        }
        assert_eq!(encode(&record(-3.456, 179.999))[KEY_LAT], "s3.46");
        assert_eq!(encode(&record(-3.456, 179.999))[KEY_LON], "e180.00");
    }

    #[test]
    fn boundary_rounding_is_consistent() {
        // 0.005 sits just above the midpoint in binary and rounds up;
        // 0.125 is an exact tie and rounds to even.
        assert_eq!(encode(&record(0.005, -0.005))[KEY_LAT], "n0.01");
        assert_eq!(encode(&record(0.005, -0.005))[KEY_LON], "w0.01");
        assert_eq!(encode(&record(0.125, 0.0))[KEY_LAT], "n0.12");
        // Negative values that round to zero keep their sign prefix.
        assert_eq!(encode(&record(-0.004, 0.0))[KEY_LAT], "s0.00");
    }

    #[test]
    fn empty_city_and_absent_codes_encode_as_empty_strings() {
        let labels = encode(&record(1.0, 2.0));
        assert_eq!(labels[KEY_CITY], "");
        assert_eq!(labels[KEY_COUNTRY_ISO], "");
        assert_eq!(labels[KEY_CONTINENT], "");
        assert_eq!(labels.len(), 5);
    }

    #[test]
    fn encode_is_deterministic() {
        let record = GeoRecord {
            latitude: 52.52,
            longitude: 13.405,
            city_name: "Berlin".into(),
            country_iso: Some("DE".into()),
            continent_code: Some("EU".into()),
        };
        assert_eq!(encode(&record), encode(&record));
    }

    #[test]
    fn value_syntax_check() {
        assert!(is_valid_value(""));
        assert!(is_valid_value("New_York"));
        assert!(is_valid_value("n40.71"));
        assert!(is_valid_value("US"));
        assert!(!is_valid_value("St._John's"));
        assert!(!is_valid_value("São_Paulo"));
        assert!(!is_valid_value("has space"));
        assert!(!is_valid_value(&"x".repeat(64)));
    }
}
