//! HTTP route handlers for the address/location API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (pings the database)
//!
//! # Addresses
//! GET    /api/addresses                 - List with pagination (?limit&offset)
//! GET    /api/addresses/search?q=       - Street substring search
//! GET    /api/addresses/city/{city}     - Exact city match
//! GET    /api/addresses/{id}            - Fetch one
//! POST   /api/addresses                 - Create
//! PUT    /api/addresses/{id}            - Partial update
//! DELETE /api/addresses/{id}            - Delete (cascades to locations)
//! POST   /api/addresses/{id}/view       - Bump the view counter
//! POST   /api/addresses/{id}/transfer   - Transfer ownership
//!
//! # Locations
//! GET    /api/locations                 - List with pagination
//! GET    /api/locations/bbox            - Bounding-box query (?minLat&maxLat&minLon&maxLon)
//! GET    /api/locations/address/{id}    - Locations for an address
//! GET    /api/locations/address/{id}/count - Count for an address
//! GET    /api/locations/{id}            - Fetch one
//! POST   /api/locations                 - Create
//! PUT    /api/locations/{id}            - Partial update
//! DELETE /api/locations/{id}            - Delete
//! ```

pub mod addresses;
pub mod locations;

use axum::Router;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

/// Build the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/addresses", addresses::routes())
        .nest("/api/locations", locations::routes())
}

/// Pagination query parameters, defaulting to the first 100 rows.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageQuery {
    /// Resolve defaults: limit 100, offset 0.
    #[must_use]
    pub fn resolve(&self) -> (i64, i64) {
        (self.limit.unwrap_or(100), self.offset.unwrap_or(0))
    }
}

/// Echo of the pagination window plus the returned row count.
#[derive(Debug, Serialize)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
    pub count: usize,
}

/// Envelope for paginated list endpoints.
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> PageResponse<T> {
    #[must_use]
    pub fn new(data: Vec<T>, limit: i64, offset: i64) -> Self {
        let count = data.len();
        Self {
            data,
            pagination: Pagination {
                limit,
                offset,
                count,
            },
        }
    }
}

/// Envelope for unpaginated list endpoints.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub count: usize,
}

impl<T> ListResponse<T> {
    #[must_use]
    pub fn new(data: Vec<T>) -> Self {
        let count = data.len();
        Self { data, count }
    }
}

/// Envelope for single-item endpoints.
#[derive(Debug, Serialize)]
pub struct ItemResponse<T> {
    pub data: T,
}

/// Reject non-positive path IDs before they reach the store.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for zero or negative IDs.
pub fn validated_id(id: i32) -> Result<i32, AppError> {
    if id <= 0 {
        return Err(AppError::BadRequest("Invalid ID parameter".to_owned()));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let query = PageQuery {
            limit: None,
            offset: None,
        };
        assert_eq!(query.resolve(), (100, 0));
    }

    #[test]
    fn test_page_query_explicit() {
        let query = PageQuery {
            limit: Some(5),
            offset: Some(20),
        };
        assert_eq!(query.resolve(), (5, 20));
    }

    #[test]
    fn test_page_response_envelope_shape() {
        let response = PageResponse::new(vec![1, 2, 3], 100, 0);
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["pagination"]["count"], 3);
        assert_eq!(json["pagination"]["limit"], 100);
    }

    #[test]
    fn test_validated_id_rejects_non_positive() {
        assert!(validated_id(1).is_ok());
        assert!(validated_id(0).is_err());
        assert!(validated_id(-4).is_err());
    }
}
