//! Location domain types.
//!
//! Coordinates are stored as NUMERIC and handled as `rust_decimal::Decimal`
//! to avoid float drift between what was written and what is compared in
//! range queries. On the wire they are plain JSON numbers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use waypoint_core::{AddressId, LocationId};

/// A point of interest tied to an address.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Location {
    /// Unique location ID.
    pub id: LocationId,
    /// Owning address; deleting it deletes this row.
    pub address_id: AddressId,
    pub name: String,
    /// Latitude in degrees, if known. Validated to [-90, 90] at the API layer.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub latitude: Option<Decimal>,
    /// Longitude in degrees, if known. The store imposes no range on it.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub longitude: Option<Decimal>,
    pub description: Option<String>,
    /// Caller-managed visibility flag; inactive rows are excluded from
    /// spatial queries but still returned by the relationship lookups.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a location.
#[derive(Debug, Clone, Deserialize)]
pub struct NewLocation {
    pub address_id: AddressId,
    pub name: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub latitude: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub longitude: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to true when absent.
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Partial update for a location.
///
/// Presence drives the update, not truthiness: `"is_active": false` is a
/// provided value and gets written, while an absent field is left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationPatch {
    #[serde(default)]
    pub address_id: Option<AddressId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub latitude: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub longitude: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl LocationPatch {
    /// True when no field was provided at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.address_id.is_none()
            && self.name.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.description.is_none()
            && self.is_active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_location_defaults() {
        let payload: NewLocation =
            serde_json::from_str(r#"{"address_id":1,"name":"Willis Tower"}"#).expect("deserialize");
        assert_eq!(payload.address_id.as_i32(), 1);
        assert_eq!(payload.latitude, None);
        assert_eq!(payload.is_active, None);
    }

    #[test]
    fn test_new_location_coordinates_from_json_numbers() {
        let payload: NewLocation = serde_json::from_str(
            r#"{"address_id":1,"name":"Willis Tower","latitude":41.8789,"longitude":-87.6359}"#,
        )
        .expect("deserialize");
        let lat = payload.latitude.expect("latitude");
        assert!(lat > Decimal::from(41) && lat < Decimal::from(42));
    }

    #[test]
    fn test_patch_is_active_false_is_provided() {
        // A false flag is a real value and must survive into the patch;
        // treating it as "absent" would make deactivation impossible.
        let patch: LocationPatch =
            serde_json::from_str(r#"{"is_active":false}"#).expect("deserialize");
        assert_eq!(patch.is_active, Some(false));
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_empty_patch() {
        let patch: LocationPatch = serde_json::from_str("{}").expect("deserialize");
        assert!(patch.is_empty());
    }
}
