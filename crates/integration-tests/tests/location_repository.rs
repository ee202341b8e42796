//! Integration tests for the location repository.
//!
//! Covers the address relationship, the cascade, and the bounding-box
//! query over the seeded landmark dataset. All tests are ignored by
//! default; run with a `DATABASE_URL` and `cargo test -- --ignored`.

use sqlx::PgPool;

use waypoint_core::{AddressId, LocationId};
use waypoint_integration_tests::{located, sample_address, sample_location};
use waypoint_server::db::{AddressRepository, LocationRepository, RepositoryError, seed};
use waypoint_server::models::LocationPatch;

#[sqlx::test(migrations = "../server/migrations")]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn create_defaults_is_active_to_true(pool: PgPool) {
    let addresses = AddressRepository::new(&pool);
    let locations = LocationRepository::new(&pool);

    let address = addresses.create(sample_address()).await.expect("address");
    let location = locations
        .create(sample_location(address.id))
        .await
        .expect("location");

    assert!(location.is_active);
    assert_eq!(location.address_id, address.id);
    assert_eq!(location.latitude, None);
}

#[sqlx::test(migrations = "../server/migrations")]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn create_rejects_unknown_address_id(pool: PgPool) {
    let locations = LocationRepository::new(&pool);

    let err = locations
        .create(sample_location(AddressId::new(99_999)))
        .await
        .expect_err("foreign key should reject");
    assert!(matches!(err, RepositoryError::Conflict(_)));
}

#[sqlx::test(migrations = "../server/migrations")]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn find_by_address_id_includes_inactive_rows(pool: PgPool) {
    let addresses = AddressRepository::new(&pool);
    let locations = LocationRepository::new(&pool);

    let address = addresses.create(sample_address()).await.expect("address");
    locations
        .create(sample_location(address.id))
        .await
        .expect("active location");
    let mut inactive = sample_location(address.id);
    inactive.name = "Closed Spot".to_owned();
    inactive.is_active = Some(false);
    locations.create(inactive).await.expect("inactive location");

    let found = locations
        .find_by_address_id(address.id)
        .await
        .expect("find_by_address_id");
    assert_eq!(found.len(), 2);

    let count = locations
        .count_by_address_id(address.id)
        .await
        .expect("count");
    assert_eq!(count, 2);
}

#[sqlx::test(migrations = "../server/migrations")]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn deleting_an_address_cascades_to_its_locations(pool: PgPool) {
    let addresses = AddressRepository::new(&pool);
    let locations = LocationRepository::new(&pool);

    let address = addresses.create(sample_address()).await.expect("address");
    let location = locations
        .create(sample_location(address.id))
        .await
        .expect("location");

    assert!(addresses.delete(address.id).await.expect("delete"));

    assert!(
        locations
            .find_by_id(location.id)
            .await
            .expect("find")
            .is_none()
    );
    let count = locations
        .count_by_address_id(address.id)
        .await
        .expect("count");
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../server/migrations")]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn bounding_box_returns_active_rows_within_inclusive_bounds(pool: PgPool) {
    let locations = LocationRepository::new(&pool);
    seed::seed(&pool).await.expect("seed");

    // Continental-US box: latitude [25, 40], longitude [-125, -70].
    let found = locations
        .find_in_bounding_box(
            25.into(),
            40.into(),
            (-125).into(),
            (-70).into(),
        )
        .await
        .expect("bbox");

    let names: Vec<&str> = found.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "The White House",
            "Googleplex",
            "Miami Beach Convention Center",
            "Texas State Capitol",
            "Denver Center for the Performing Arts",
            "LA City Hall",
        ]
    );

    // Apple Park sits inside the box but is inactive, so it must not
    // appear; Willis Tower (41.88) and the Empire State Building (40.75)
    // fall just north of it.
    assert!(!names.contains(&"Apple Park (Historic)"));
}

#[sqlx::test(migrations = "../server/migrations")]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn bounding_box_bounds_are_inclusive_and_nulls_excluded(pool: PgPool) {
    let addresses = AddressRepository::new(&pool);
    let locations = LocationRepository::new(&pool);
    let address = addresses.create(sample_address()).await.expect("address");

    // Exactly on every edge of the box below.
    locations
        .create(located(address.id, "On The Corner", "10.0", "-20.0"))
        .await
        .expect("corner");
    // No coordinates at all.
    locations
        .create(sample_location(address.id))
        .await
        .expect("null coords");

    let found = locations
        .find_in_bounding_box(10.into(), 10.into(), (-20).into(), (-20).into())
        .await
        .expect("bbox");

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "On The Corner");
}

#[sqlx::test(migrations = "../server/migrations")]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn update_applies_is_active_false(pool: PgPool) {
    let addresses = AddressRepository::new(&pool);
    let locations = LocationRepository::new(&pool);

    let address = addresses.create(sample_address()).await.expect("address");
    let location = locations
        .create(located(address.id, "Googleplex", "37.4220", "-122.0841"))
        .await
        .expect("location");
    assert!(location.is_active);

    let patch = LocationPatch {
        is_active: Some(false),
        ..LocationPatch::default()
    };
    let updated = locations
        .update(location.id, patch)
        .await
        .expect("update")
        .expect("row exists");

    // The flag flips; everything not provided stays put.
    assert!(!updated.is_active);
    assert_eq!(updated.name, location.name);
    assert_eq!(updated.latitude, location.latitude);
    assert_eq!(updated.longitude, location.longitude);
    assert!(updated.updated_at >= location.updated_at);
}

#[sqlx::test(migrations = "../server/migrations")]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn missing_ids_return_absent_not_errors(pool: PgPool) {
    let locations = LocationRepository::new(&pool);
    let missing = LocationId::new(99_999);

    assert!(locations.find_by_id(missing).await.expect("find").is_none());
    assert!(
        locations
            .update(missing, LocationPatch::default())
            .await
            .expect("update")
            .is_none()
    );
    assert!(!locations.delete(missing).await.expect("delete"));
}
