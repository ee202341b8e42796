//! Sample dataset seeding for development and testing.
//!
//! Twelve well-known US addresses with one landmark location each. One
//! location (Apple Park Historic) is inactive so spatial-query filtering has
//! something to exclude. The CLI `seed` command and the integration tests
//! both go through [`seed`].

use rust_decimal::Decimal;
use sqlx::PgPool;

/// street, city, state, zip_code
pub const SAMPLE_ADDRESSES: &[(&str, &str, &str, &str)] = &[
    ("1600 Pennsylvania Avenue NW", "Washington", "DC", "20500"),
    ("350 Fifth Avenue", "New York", "NY", "10118"),
    ("1 Infinite Loop", "Cupertino", "CA", "95014"),
    ("1600 Amphitheatre Parkway", "Mountain View", "CA", "94043"),
    ("1901 Convention Center Drive", "Miami Beach", "FL", "33139"),
    ("233 S Wacker Drive", "Chicago", "IL", "60606"),
    ("1000 5th Avenue", "Seattle", "WA", "98104"),
    ("301 Congress Avenue", "Austin", "TX", "78701"),
    ("1 Faneuil Hall Marketplace", "Boston", "MA", "02109"),
    ("1670 Broadway", "Denver", "CO", "80202"),
    ("11 Wall Street", "New York", "NY", "10005"),
    ("100 S Figueroa Street", "Los Angeles", "CA", "90012"),
];

/// name, latitude, longitude, description, is_active
/// Indexed in step with [`SAMPLE_ADDRESSES`].
pub const SAMPLE_LOCATIONS: &[(&str, &str, &str, &str, bool)] = &[
    (
        "The White House",
        "38.8977",
        "-77.0365",
        "Official residence of the President of the United States",
        true,
    ),
    (
        "Empire State Building",
        "40.7484",
        "-73.9857",
        "Iconic 102-story Art Deco skyscraper",
        true,
    ),
    (
        "Apple Park (Historic)",
        "37.3318",
        "-122.0312",
        "Former Apple headquarters",
        false,
    ),
    (
        "Googleplex",
        "37.4220",
        "-122.0841",
        "Google headquarters complex",
        true,
    ),
    (
        "Miami Beach Convention Center",
        "25.7907",
        "-80.1300",
        "Major convention and exhibition center in South Florida",
        true,
    ),
    (
        "Willis Tower",
        "41.8789",
        "-87.6359",
        "110-story skyscraper, formerly known as Sears Tower",
        true,
    ),
    (
        "Seattle Public Library - Central Branch",
        "47.6062",
        "-122.3321",
        "Iconic modern library designed by Rem Koolhaas",
        true,
    ),
    (
        "Texas State Capitol",
        "30.2747",
        "-97.7404",
        "Historic state capitol building in downtown Austin",
        true,
    ),
    (
        "Faneuil Hall",
        "42.3601",
        "-71.0543",
        "Historic marketplace and meeting hall since 1743",
        true,
    ),
    (
        "Denver Center for the Performing Arts",
        "39.7447",
        "-104.9991",
        "Largest performing arts center in the Rocky Mountain region",
        true,
    ),
    (
        "New York Stock Exchange",
        "40.7074",
        "-74.0113",
        "World's largest stock exchange by market capitalization",
        true,
    ),
    (
        "LA City Hall",
        "34.0537",
        "-118.2427",
        "Historic city hall building completed in 1928",
        true,
    ),
];

/// Insert the sample dataset, replacing whatever is there.
///
/// Runs in one transaction; returns the number of (address, location) pairs
/// inserted.
///
/// # Errors
///
/// Returns `sqlx::Error` if any statement fails; the transaction rolls back.
pub async fn seed(pool: &PgPool) -> Result<usize, sqlx::Error> {
    let mut tx = pool.begin().await?;

    // Clear existing data; locations go first only for clarity, the cascade
    // would handle them anyway.
    sqlx::query("DELETE FROM locations").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM addresses").execute(&mut *tx).await?;

    for (i, (street, city, state, zip_code)) in SAMPLE_ADDRESSES.iter().enumerate() {
        let (address_id,): (i32,) = sqlx::query_as(
            "INSERT INTO addresses (street, city, state, zip_code, country) \
             VALUES ($1, $2, $3, $4, 'USA') RETURNING id",
        )
        .bind(street)
        .bind(city)
        .bind(state)
        .bind(zip_code)
        .fetch_one(&mut *tx)
        .await?;

        let (name, latitude, longitude, description, is_active) = SAMPLE_LOCATIONS[i];
        sqlx::query(
            "INSERT INTO locations (address_id, name, latitude, longitude, description, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(address_id)
        .bind(name)
        .bind(parse_coord(name, latitude))
        .bind(parse_coord(name, longitude))
        .bind(description)
        .bind(is_active)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(SAMPLE_ADDRESSES.len())
}

/// Parse a coordinate literal from the seed tables.
///
/// The literals are compile-time constants; a parse failure is a bug in this
/// file, not a runtime condition.
fn parse_coord(name: &str, raw: &str) -> Decimal {
    raw.parse()
        .unwrap_or_else(|_| panic!("invalid seed coordinate for {name}: {raw}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_tables_line_up() {
        assert_eq!(SAMPLE_ADDRESSES.len(), SAMPLE_LOCATIONS.len());
    }

    #[test]
    fn test_seed_coordinates_parse() {
        for (name, lat, lon, _, _) in SAMPLE_LOCATIONS {
            assert!(lat.parse::<Decimal>().is_ok(), "bad latitude for {name}");
            assert!(lon.parse::<Decimal>().is_ok(), "bad longitude for {name}");
        }
    }

    #[test]
    fn test_exactly_one_inactive_location() {
        let inactive = SAMPLE_LOCATIONS.iter().filter(|l| !l.4).count();
        assert_eq!(inactive, 1);
    }
}
