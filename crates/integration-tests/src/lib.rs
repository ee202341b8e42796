//! Integration tests for Waypoint.
//!
//! The tests under `tests/` run repository operations against a real
//! `PostgreSQL` instance: each `#[sqlx::test]` case gets a fresh database
//! with the server's migrations applied.
//!
//! # Running Tests
//!
//! ```bash
//! # Point sqlx at a PostgreSQL superuser connection
//! export DATABASE_URL=postgres://postgres@localhost/postgres
//!
//! # The database-backed tests are ignored by default
//! cargo test -p waypoint-integration-tests -- --ignored
//! ```
//!
//! This crate body holds the shared fixtures.

use waypoint_core::AddressId;
use waypoint_server::models::{NewAddress, NewLocation};

/// A valid address creation payload with an explicit country.
#[must_use]
pub fn sample_address() -> NewAddress {
    NewAddress {
        street: "123 Main St".to_owned(),
        city: "Springfield".to_owned(),
        state: "IL".to_owned(),
        zip_code: "62701".to_owned(),
        country: Some("USA".to_owned()),
    }
}

/// An address payload with `country` omitted, for testing the default.
#[must_use]
pub fn sample_address_without_country() -> NewAddress {
    NewAddress {
        country: None,
        ..sample_address()
    }
}

/// A minimal location payload for the given address, no coordinates.
#[must_use]
pub fn sample_location(address_id: AddressId) -> NewLocation {
    NewLocation {
        address_id,
        name: "Test Spot".to_owned(),
        latitude: None,
        longitude: None,
        description: None,
        is_active: None,
    }
}

/// A location payload with coordinates, parsed from decimal literals.
///
/// # Panics
///
/// Panics if the literals are not valid decimals (test-fixture input).
#[must_use]
pub fn located(address_id: AddressId, name: &str, lat: &str, lon: &str) -> NewLocation {
    NewLocation {
        address_id,
        name: name.to_owned(),
        latitude: Some(lat.parse().expect("latitude literal")),
        longitude: Some(lon.parse().expect("longitude literal")),
        description: None,
        is_active: None,
    }
}
