//! Request payload validation.
//!
//! First line of defense for the HTTP layer; the database's NOT NULL and
//! foreign-key constraints remain the backstop. Validators return the first
//! problem found as a client-facing message.

use rust_decimal::Decimal;

use crate::models::{LocationPatch, NewAddress, NewLocation};

/// Validate an address creation payload.
///
/// # Errors
///
/// Returns a client-facing message for the first missing or blank required
/// field.
pub fn validate_new_address(data: &NewAddress) -> Result<(), String> {
    if data.street.trim().is_empty() {
        return Err("Street is required and must be a non-empty string".to_owned());
    }
    if data.city.trim().is_empty() {
        return Err("City is required and must be a non-empty string".to_owned());
    }
    if data.state.trim().is_empty() {
        return Err("State is required and must be a non-empty string".to_owned());
    }
    if data.zip_code.trim().is_empty() {
        return Err("Zip code is required".to_owned());
    }
    Ok(())
}

/// Validate a location creation payload.
///
/// # Errors
///
/// Returns a client-facing message when `name` is blank or a coordinate is
/// out of range.
pub fn validate_new_location(data: &NewLocation) -> Result<(), String> {
    if data.name.trim().is_empty() {
        return Err("Name is required and must be a non-empty string".to_owned());
    }
    validate_coordinates(data.latitude, data.longitude)
}

/// Validate a location update payload.
///
/// # Errors
///
/// Returns a client-facing message when a provided coordinate is out of
/// range.
pub fn validate_location_patch(patch: &LocationPatch) -> Result<(), String> {
    if let Some(name) = &patch.name
        && name.trim().is_empty()
    {
        return Err("Name is required and must be a non-empty string".to_owned());
    }
    validate_coordinates(patch.latitude, patch.longitude)
}

/// Range-check coordinates when provided.
///
/// NOTE: longitude is checked against [-90, 90], not the geographically
/// correct [-180, 180]. This matches the bounds the API has always enforced
/// and is a known defect: valid far-east/far-west longitudes are rejected
/// here even though the store accepts any longitude. Do not tighten or
/// "correct" this silently; clients depend on the current rejection
/// behavior.
fn validate_coordinates(latitude: Option<Decimal>, longitude: Option<Decimal>) -> Result<(), String> {
    let ninety = Decimal::from(90);

    if let Some(lat) = latitude
        && (lat < -ninety || lat > ninety)
    {
        return Err("Latitude must be between -90 and 90".to_owned());
    }

    if let Some(lon) = longitude
        && (lon < -ninety || lon > ninety)
    {
        return Err("Longitude must be between -90 and 90".to_owned());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_address(street: &str, city: &str) -> NewAddress {
        NewAddress {
            street: street.to_owned(),
            city: city.to_owned(),
            state: "IL".to_owned(),
            zip_code: "62701".to_owned(),
            country: None,
        }
    }

    fn new_location(latitude: Option<f64>, longitude: Option<f64>) -> NewLocation {
        NewLocation {
            address_id: 1.into(),
            name: "Test Spot".to_owned(),
            latitude: latitude.and_then(Decimal::from_f64_retain),
            longitude: longitude.and_then(Decimal::from_f64_retain),
            description: None,
            is_active: None,
        }
    }

    #[test]
    fn test_address_requires_non_blank_street() {
        assert!(validate_new_address(&new_address("1 Main St", "Springfield")).is_ok());
        let err = validate_new_address(&new_address("   ", "Springfield")).unwrap_err();
        assert!(err.contains("Street"));
    }

    #[test]
    fn test_address_requires_non_blank_city() {
        let err = validate_new_address(&new_address("1 Main St", "")).unwrap_err();
        assert!(err.contains("City"));
    }

    #[test]
    fn test_latitude_bounds_inclusive() {
        assert!(validate_new_location(&new_location(Some(90.0), None)).is_ok());
        assert!(validate_new_location(&new_location(Some(-90.0), None)).is_ok());
        assert!(validate_new_location(&new_location(Some(90.1), None)).is_err());
        assert!(validate_new_location(&new_location(Some(-90.1), None)).is_err());
    }

    #[test]
    fn test_longitude_defect_rejects_valid_western_longitudes() {
        // -122.03 is a perfectly good longitude (Cupertino), but the
        // validator's [-90, 90] bound rejects it. Locked in on purpose.
        let err = validate_new_location(&new_location(None, Some(-122.03))).unwrap_err();
        assert!(err.contains("Longitude"));
        assert!(validate_new_location(&new_location(None, Some(-80.13))).is_ok());
    }

    #[test]
    fn test_missing_coordinates_pass() {
        assert!(validate_new_location(&new_location(None, None)).is_ok());
    }

    #[test]
    fn test_patch_checks_only_provided_fields() {
        let patch = LocationPatch {
            is_active: Some(false),
            ..LocationPatch::default()
        };
        assert!(validate_location_patch(&patch).is_ok());

        let patch = LocationPatch {
            latitude: Decimal::from_f64_retain(91.0),
            ..LocationPatch::default()
        };
        assert!(validate_location_patch(&patch).is_err());
    }
}
