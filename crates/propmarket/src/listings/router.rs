use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::category::ListingCategory;
use super::domain::{ListingId, ListingUpdate, NewListing};
use super::filters::RawListingQuery;
use super::repository::{ListingStore, StoreError};
use super::service::{ListingService, ListingServiceError};

/// Router builder exposing the catalog endpoints.
pub fn listing_router<S>(service: Arc<ListingService<S>>) -> Router
where
    S: ListingStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/listings",
            get(search_handler::<S>).post(create_handler::<S>),
        )
        .route("/api/v1/listings/categories", get(categories_handler))
        .route("/api/v1/listings/owner/:owner", get(owned_handler::<S>))
        .route(
            "/api/v1/listings/:slug",
            get(detail_handler::<S>)
                .patch(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn search_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    Query(raw): Query<RawListingQuery>,
) -> Response
where
    S: ListingStore + 'static,
{
    match service.search(&raw) {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn categories_handler() -> Response {
    (
        StatusCode::OK,
        axum::Json(json!({ "categories": ListingCategory::selectable() })),
    )
        .into_response()
}

pub(crate) async fn detail_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    Path(slug): Path<String>,
) -> Response
where
    S: ListingStore + 'static,
{
    match service.get_by_slug(&slug) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(ListingServiceError::Store(StoreError::NotFound)) => not_found(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn owned_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    Path(owner): Path<String>,
) -> Response
where
    S: ListingStore + 'static,
{
    match service.owned_by(&owner) {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn create_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    axum::Json(submission): axum::Json<NewListing>,
) -> Response
where
    S: ListingStore + 'static,
{
    match service.create(submission) {
        Ok(listing) => (StatusCode::CREATED, axum::Json(listing)).into_response(),
        Err(ListingServiceError::Store(StoreError::Conflict)) => {
            let payload = json!({ "error": "listing already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn update_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    Path(id): Path<String>,
    axum::Json(update): axum::Json<ListingUpdate>,
) -> Response
where
    S: ListingStore + 'static,
{
    match service.update(&ListingId(id), update) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(ListingServiceError::Store(StoreError::NotFound)) => not_found(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn delete_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    Path(id): Path<String>,
) -> Response
where
    S: ListingStore + 'static,
{
    match service.delete(&ListingId(id)) {
        Ok(()) => (StatusCode::OK, axum::Json(json!({ "success": true }))).into_response(),
        Err(ListingServiceError::Store(StoreError::NotFound)) => not_found(),
        Err(error) => internal_error(error),
    }
}

fn not_found() -> Response {
    let payload = json!({ "error": "listing not found" });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn internal_error(error: ListingServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
