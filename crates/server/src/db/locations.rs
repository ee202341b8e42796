//! Location repository for database operations.
//!
//! CRUD plus the address-relationship queries and the bounding-box spatial
//! lookup over the `locations` table.

use rust_decimal::Decimal;
use sqlx::{PgPool, QueryBuilder};

use waypoint_core::{AddressId, LocationId};

use super::RepositoryError;
use crate::models::{Location, LocationPatch, NewLocation};

/// Columns fetched for every location query.
const LOCATION_COLUMNS: &str = "id, address_id, name, latitude, longitude, description, \
                                is_active, created_at, updated_at";

/// Repository for location database operations.
pub struct LocationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LocationRepository<'a> {
    /// Create a new location repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List locations in insertion order, `offset` rows in, at most `limit` rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Location>, RepositoryError> {
        let locations = sqlx::query_as::<_, Location>(&format!(
            "SELECT {LOCATION_COLUMNS} FROM locations ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(locations)
    }

    /// Get a location by ID, or `None` if no row matches.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: LocationId) -> Result<Option<Location>, RepositoryError> {
        let location = sqlx::query_as::<_, Location>(&format!(
            "SELECT {LOCATION_COLUMNS} FROM locations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(location)
    }

    /// All locations belonging to an address, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_address_id(
        &self,
        address_id: AddressId,
    ) -> Result<Vec<Location>, RepositoryError> {
        let locations = sqlx::query_as::<_, Location>(&format!(
            "SELECT {LOCATION_COLUMNS} FROM locations WHERE address_id = $1 ORDER BY id"
        ))
        .bind(address_id)
        .fetch_all(self.pool)
        .await?;

        Ok(locations)
    }

    /// Create a new location, returning the fully populated row.
    ///
    /// `is_active` falls back to true when the payload omits it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if `address_id` does not reference
    /// an existing address (foreign-key violation).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, data: NewLocation) -> Result<Location, RepositoryError> {
        let is_active = data.is_active.unwrap_or(true);

        let location = sqlx::query_as::<_, Location>(&format!(
            "INSERT INTO locations (address_id, name, latitude, longitude, description, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {LOCATION_COLUMNS}"
        ))
        .bind(data.address_id)
        .bind(data.name)
        .bind(data.latitude)
        .bind(data.longitude)
        .bind(data.description)
        .bind(is_active)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::Conflict("address does not exist".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(location)
    }

    /// Merge the provided fields into an existing location.
    ///
    /// Only fields present in the patch are written; `updated_at` is always
    /// refreshed. Returns the new row state, or `None` if the ID does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a provided `address_id` does
    /// not reference an existing address.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: LocationId,
        patch: LocationPatch,
    ) -> Result<Option<Location>, RepositoryError> {
        let mut query = QueryBuilder::new("UPDATE locations SET updated_at = now()");

        if let Some(address_id) = patch.address_id {
            query.push(", address_id = ").push_bind(address_id);
        }
        if let Some(name) = patch.name {
            query.push(", name = ").push_bind(name);
        }
        if let Some(latitude) = patch.latitude {
            query.push(", latitude = ").push_bind(latitude);
        }
        if let Some(longitude) = patch.longitude {
            query.push(", longitude = ").push_bind(longitude);
        }
        if let Some(description) = patch.description {
            query.push(", description = ").push_bind(description);
        }
        if let Some(is_active) = patch.is_active {
            query.push(", is_active = ").push_bind(is_active);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(&format!(" RETURNING {LOCATION_COLUMNS}"));

        let location = query
            .build_query_as::<Location>()
            .fetch_optional(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict("address does not exist".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        Ok(location)
    }

    /// Delete a location by ID.
    ///
    /// Returns `true` iff a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: LocationId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Find active locations within a bounding box, bounds inclusive.
    ///
    /// Rows with null coordinates never match. There is no wraparound
    /// handling at the ±180° longitude seam; callers near the antimeridian
    /// must split the box themselves.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_in_bounding_box(
        &self,
        min_lat: Decimal,
        max_lat: Decimal,
        min_lon: Decimal,
        max_lon: Decimal,
    ) -> Result<Vec<Location>, RepositoryError> {
        let locations = sqlx::query_as::<_, Location>(&format!(
            "SELECT {LOCATION_COLUMNS} FROM locations \
             WHERE is_active = TRUE \
               AND latitude BETWEEN $1 AND $2 \
               AND longitude BETWEEN $3 AND $4 \
             ORDER BY id"
        ))
        .bind(min_lat)
        .bind(max_lat)
        .bind(min_lon)
        .bind(max_lon)
        .fetch_all(self.pool)
        .await?;

        Ok(locations)
    }

    /// Count of locations for an address, 0 if none.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_address_id(
        &self,
        address_id: AddressId,
    ) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(id) FROM locations WHERE address_id = $1")
            .bind(address_id)
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
