//! Database operations for the Waypoint `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `addresses` - Postal addresses, the owning side of the relationship
//! - `locations` - Points of interest, foreign-keyed to `addresses` with
//!   `ON DELETE CASCADE`
//!
//! The repositories hold no state beyond a borrowed pool handle, so a single
//! instance can be shared freely across concurrent callers. No operation
//! retries internally; a failed backend call propagates to the caller.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p waypoint-cli -- migrate
//! ```

pub mod addresses;
pub mod locations;
pub mod seed;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use addresses::AddressRepository;
pub use locations::LocationRepository;

/// Errors that can occur during repository operations.
///
/// "Row not found" is not an error here: lookups return `Option`, deletes
/// return `bool`. These variants cover genuine failures only.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx (connectivity, constraint, driver).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Constraint violation (e.g., a location referencing a missing address).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
