//! Address route handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use waypoint_core::AddressId;

use crate::db::AddressRepository;
use crate::error::{AppError, Result};
use crate::models::{Address, AddressPatch, NewAddress};
use crate::state::AppState;
use crate::validation::validate_new_address;

use super::{ItemResponse, ListResponse, PageQuery, PageResponse, validated_id};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/search", get(search))
        .route("/city/{city}", get(by_city))
        .route("/{id}", get(fetch).put(update).delete(remove))
        .route("/{id}/view", post(record_view))
        .route("/{id}/transfer", post(transfer))
}

/// List addresses with pagination.
#[instrument(skip(state))]
async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<PageResponse<Address>>> {
    let (limit, offset) = page.resolve();
    tracing::info!(limit, offset, "Fetching addresses");

    let addresses = AddressRepository::new(state.pool())
        .find_all(limit, offset)
        .await?;

    Ok(Json(PageResponse::new(addresses, limit, offset)))
}

/// Fetch a single address by ID.
#[instrument(skip(state))]
async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ItemResponse<Address>>> {
    let id = AddressId::new(validated_id(id)?);

    let address = AddressRepository::new(state.pool())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Address not found".to_owned()))?;

    Ok(Json(ItemResponse { data: address }))
}

/// Addresses in a city (exact, case-sensitive match).
#[instrument(skip(state))]
async fn by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<ListResponse<Address>>> {
    let addresses = AddressRepository::new(state.pool())
        .find_by_city(&city)
        .await?;

    Ok(Json(ListResponse::new(addresses)))
}

/// Street search query string.
#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

/// Search addresses by street substring.
#[instrument(skip(state))]
async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ListResponse<Address>>> {
    let Some(q) = query.q.filter(|q| !q.is_empty()) else {
        return Err(AppError::BadRequest("Search query is required".to_owned()));
    };

    let addresses = AddressRepository::new(state.pool())
        .search_by_street(&q)
        .await?;

    Ok(Json(ListResponse::new(addresses)))
}

/// Create a new address.
#[instrument(skip(state, payload))]
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewAddress>,
) -> Result<(StatusCode, Json<ItemResponse<Address>>)> {
    validate_new_address(&payload).map_err(AppError::BadRequest)?;

    let address = AddressRepository::new(state.pool()).create(payload).await?;
    tracing::info!(id = %address.id, "Created address");

    Ok((StatusCode::CREATED, Json(ItemResponse { data: address })))
}

/// Partially update an address.
#[instrument(skip(state, patch))]
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<AddressPatch>,
) -> Result<Json<ItemResponse<Address>>> {
    let id = AddressId::new(validated_id(id)?);

    let address = AddressRepository::new(state.pool())
        .update(id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Address not found".to_owned()))?;

    tracing::info!(%id, "Updated address");
    Ok(Json(ItemResponse { data: address }))
}

/// Delete an address (and, via cascade, its locations).
#[instrument(skip(state))]
async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<serde_json::Value>> {
    let id = AddressId::new(validated_id(id)?);

    let deleted = AddressRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Address not found".to_owned()));
    }

    tracing::info!(%id, "Deleted address");
    Ok(Json(json!({ "message": "Address deleted successfully" })))
}

/// Bump the address view counter.
#[instrument(skip(state))]
async fn record_view(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    let id = AddressId::new(validated_id(id)?);

    AddressRepository::new(state.pool())
        .increment_view_count(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Ownership transfer request body.
#[derive(Debug, Deserialize)]
struct TransferRequest {
    old_owner: String,
    new_owner: String,
}

/// Transfer an address to a new owner.
#[instrument(skip(state, payload))]
async fn transfer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<TransferRequest>,
) -> Result<Json<serde_json::Value>> {
    let id = AddressId::new(validated_id(id)?);

    let transferred = AddressRepository::new(state.pool())
        .transfer_ownership(id, &payload.old_owner, &payload.new_owner)
        .await?;

    if !transferred {
        return Err(AppError::Conflict(
            "Ownership transfer rejected: address missing or owner mismatch".to_owned(),
        ));
    }

    tracing::info!(%id, "Transferred address ownership");
    Ok(Json(json!({ "message": "Ownership transferred successfully" })))
}
