//! Location route handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use waypoint_core::{AddressId, LocationId};

use crate::db::LocationRepository;
use crate::error::{AppError, Result};
use crate::models::{Location, LocationPatch, NewLocation};
use crate::state::AppState;
use crate::validation::{validate_location_patch, validate_new_location};

use super::{ItemResponse, ListResponse, PageQuery, PageResponse, validated_id};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/bbox", get(in_bounding_box))
        .route("/address/{address_id}", get(by_address))
        .route("/address/{address_id}/count", get(count_by_address))
        .route("/{id}", get(fetch).put(update).delete(remove))
}

/// List locations with pagination.
#[instrument(skip(state))]
async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<PageResponse<Location>>> {
    let (limit, offset) = page.resolve();

    let locations = LocationRepository::new(state.pool())
        .find_all(limit, offset)
        .await?;

    Ok(Json(PageResponse::new(locations, limit, offset)))
}

/// Fetch a single location by ID.
#[instrument(skip(state))]
async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ItemResponse<Location>>> {
    let id = LocationId::new(validated_id(id)?);

    let location = LocationRepository::new(state.pool())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Location not found".to_owned()))?;

    Ok(Json(ItemResponse { data: location }))
}

/// All locations for an address, active or not.
#[instrument(skip(state))]
async fn by_address(
    State(state): State<AppState>,
    Path(address_id): Path<i32>,
) -> Result<Json<ListResponse<Location>>> {
    let address_id = AddressId::new(validated_id(address_id)?);

    let locations = LocationRepository::new(state.pool())
        .find_by_address_id(address_id)
        .await?;

    Ok(Json(ListResponse::new(locations)))
}

/// Location count for an address.
#[instrument(skip(state))]
async fn count_by_address(
    State(state): State<AppState>,
    Path(address_id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let address_id = AddressId::new(validated_id(address_id)?);

    let count = LocationRepository::new(state.pool())
        .count_by_address_id(address_id)
        .await?;

    Ok(Json(json!({ "count": count })))
}

/// Bounding-box query string. All four bounds are required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BboxQuery {
    min_lat: Option<Decimal>,
    max_lat: Option<Decimal>,
    min_lon: Option<Decimal>,
    max_lon: Option<Decimal>,
}

/// Active locations within a bounding box (bounds inclusive).
#[instrument(skip(state))]
async fn in_bounding_box(
    State(state): State<AppState>,
    Query(bbox): Query<BboxQuery>,
) -> Result<Json<ListResponse<Location>>> {
    let (Some(min_lat), Some(max_lat), Some(min_lon), Some(max_lon)) =
        (bbox.min_lat, bbox.max_lat, bbox.min_lon, bbox.max_lon)
    else {
        return Err(AppError::BadRequest(
            "Missing required parameters: minLat, maxLat, minLon, maxLon".to_owned(),
        ));
    };

    let locations = LocationRepository::new(state.pool())
        .find_in_bounding_box(min_lat, max_lat, min_lon, max_lon)
        .await?;

    Ok(Json(ListResponse::new(locations)))
}

/// Create a new location.
#[instrument(skip(state, payload))]
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewLocation>,
) -> Result<(StatusCode, Json<ItemResponse<Location>>)> {
    validate_new_location(&payload).map_err(AppError::BadRequest)?;

    let location = LocationRepository::new(state.pool()).create(payload).await?;
    tracing::info!(id = %location.id, "Created location");

    Ok((StatusCode::CREATED, Json(ItemResponse { data: location })))
}

/// Partially update a location.
#[instrument(skip(state, patch))]
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<LocationPatch>,
) -> Result<Json<ItemResponse<Location>>> {
    let id = LocationId::new(validated_id(id)?);
    validate_location_patch(&patch).map_err(AppError::BadRequest)?;

    let location = LocationRepository::new(state.pool())
        .update(id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Location not found".to_owned()))?;

    tracing::info!(%id, "Updated location");
    Ok(Json(ItemResponse { data: location }))
}

/// Delete a location.
#[instrument(skip(state))]
async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    let id = LocationId::new(validated_id(id)?);

    let deleted = LocationRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Location not found".to_owned()));
    }

    tracing::info!(%id, "Deleted location");
    Ok(StatusCode::NO_CONTENT)
}
