//! Address repository for database operations.
//!
//! CRUD plus the two search queries, the analytics view counter, and the
//! transactional ownership transfer over the `addresses` table.

use sqlx::{PgPool, QueryBuilder};

use waypoint_core::AddressId;

use super::RepositoryError;
use crate::models::{Address, AddressPatch, NewAddress};

/// Columns fetched for every address query.
const ADDRESS_COLUMNS: &str =
    "id, street, city, state, zip_code, country, owner, view_count, created_at, updated_at";

/// Repository for address database operations.
pub struct AddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List addresses in insertion order, `offset` rows in, at most `limit` rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Address>, RepositoryError> {
        let addresses = sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(addresses)
    }

    /// Get an address by ID, or `None` if no row matches.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, RepositoryError> {
        let address = sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(address)
    }

    /// Create a new address, returning the fully populated row.
    ///
    /// `country` falls back to "USA" when the payload omits it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including the
    /// backend's NOT NULL defense against missing required columns).
    pub async fn create(&self, data: NewAddress) -> Result<Address, RepositoryError> {
        let country = data.country.unwrap_or_else(|| "USA".to_owned());

        let address = sqlx::query_as::<_, Address>(&format!(
            "INSERT INTO addresses (street, city, state, zip_code, country) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {ADDRESS_COLUMNS}"
        ))
        .bind(data.street)
        .bind(data.city)
        .bind(data.state)
        .bind(data.zip_code)
        .bind(country)
        .fetch_one(self.pool)
        .await?;

        Ok(address)
    }

    /// Merge the provided fields into an existing address.
    ///
    /// Only fields present in the patch are written; `updated_at` is always
    /// refreshed. Returns the new row state, or `None` if the ID does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: AddressId,
        patch: AddressPatch,
    ) -> Result<Option<Address>, RepositoryError> {
        let mut query = QueryBuilder::new("UPDATE addresses SET updated_at = now()");

        if let Some(street) = patch.street {
            query.push(", street = ").push_bind(street);
        }
        if let Some(city) = patch.city {
            query.push(", city = ").push_bind(city);
        }
        if let Some(state) = patch.state {
            query.push(", state = ").push_bind(state);
        }
        if let Some(zip_code) = patch.zip_code {
            query.push(", zip_code = ").push_bind(zip_code);
        }
        if let Some(country) = patch.country {
            query.push(", country = ").push_bind(country);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(&format!(" RETURNING {ADDRESS_COLUMNS}"));

        let address = query
            .build_query_as::<Address>()
            .fetch_optional(self.pool)
            .await?;

        Ok(address)
    }

    /// Delete an address by ID.
    ///
    /// Returns `true` iff a row was removed. Dependent locations go with it
    /// via the foreign key's `ON DELETE CASCADE`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: AddressId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Find addresses by exact, case-sensitive city match.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_city(&self, city: &str) -> Result<Vec<Address>, RepositoryError> {
        let addresses = sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE city = $1 ORDER BY id"
        ))
        .bind(city)
        .fetch_all(self.pool)
        .await?;

        Ok(addresses)
    }

    /// Search addresses by case-insensitive street substring.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search_by_street(&self, street_query: &str) -> Result<Vec<Address>, RepositoryError> {
        let pattern = format!("%{street_query}%");

        let addresses = sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE street ILIKE $1 ORDER BY id"
        ))
        .bind(pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(addresses)
    }

    /// Bump the view counter for an address (for analytics purposes).
    ///
    /// This is a deliberate read-modify-write across two independent round
    /// trips with no isolation between them. Concurrent callers on the same
    /// row can read the same value and both write `value + 1`, losing
    /// updates (last writer wins). The behavior is load-bearing for the
    /// race-demonstration tests; use [`Self::increment_view_count_atomic`]
    /// when a correct counter is wanted.
    ///
    /// Unknown IDs are a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either round trip fails.
    pub async fn increment_view_count(&self, id: AddressId) -> Result<(), RepositoryError> {
        // Read current value
        let current: Option<(i32,)> =
            sqlx::query_as("SELECT view_count FROM addresses WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        if let Some((count,)) = current {
            // Write back incremented value. Nothing stops a concurrent
            // caller from interleaving between the read above and this
            // write.
            sqlx::query("UPDATE addresses SET view_count = $1 WHERE id = $2")
                .bind(count + 1)
                .bind(id)
                .execute(self.pool)
                .await?;
        }

        Ok(())
    }

    /// Atomic alternative to [`Self::increment_view_count`].
    ///
    /// Performs the increment in a single statement, so concurrent callers
    /// are cumulative.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn increment_view_count_atomic(&self, id: AddressId) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE addresses SET view_count = view_count + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Transfer an address to a new owner, verifying the current one first.
    ///
    /// The read-verify-write sequence runs inside one transaction on one
    /// connection. Returns `true` and commits only when the stored owner
    /// matches `old_owner` exactly; a missing row or mismatched owner
    /// returns `false` with zero mutation (the transaction is dropped,
    /// which rolls it back).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction rolls back in full and no partial write is observable.
    pub async fn transfer_ownership(
        &self,
        address_id: AddressId,
        old_owner: &str,
        new_owner: &str,
    ) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Verify old owner
        let row: Option<(Option<String>,)> =
            sqlx::query_as("SELECT owner FROM addresses WHERE id = $1")
                .bind(address_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((owner,)) = row else {
            return Ok(false);
        };
        if owner.as_deref() != Some(old_owner) {
            return Ok(false);
        }

        // Update to new owner
        sqlx::query("UPDATE addresses SET owner = $1, updated_at = now() WHERE id = $2")
            .bind(new_owner)
            .bind(address_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(true)
    }
}
