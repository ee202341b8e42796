//! Database seeding command.
//!
//! Clears both tables and inserts the sample dataset from
//! `waypoint_server::db::seed`.

use secrecy::SecretString;

use waypoint_server::db;

/// Clear and repopulate both tables.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is missing or any statement fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| "DATABASE_URL not set")?;

    let pool = db::create_pool(&database_url).await?;
    tracing::info!("Connected to database");

    let inserted = db::seed::seed(&pool).await?;

    tracing::info!("Seeding complete!");
    tracing::info!("  Addresses inserted: {inserted}");
    tracing::info!("  Locations inserted: {inserted}");

    Ok(())
}
