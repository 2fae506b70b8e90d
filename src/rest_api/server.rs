//! # REST API routes
//!
//! Axum routes for the records resource.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::store::RecordStore;

use super::errors::{ListingError, RestError};
use super::handler::RecordService;
use super::parser::ListQuery;
use super::response::{CreateResponse, ListResponse};

/// Build the `/records` router
pub fn record_routes<S: RecordStore>(service: RecordService<S>) -> Router {
    Router::new()
        .route("/records", get(list_handler::<S>).post(create_handler::<S>))
        .route("/records/:id", get(get_handler::<S>))
        .with_state(service)
}

/// List records handler
async fn list_handler<S: RecordStore>(
    State(service): State<RecordService<S>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ListResponse>, ListingError> {
    let query = ListQuery::parse(&params)?;
    let response = service.list(&query).await?;
    Ok(Json(response))
}

/// Get single record handler
async fn get_handler<S: RecordStore>(
    State(service): State<RecordService<S>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, RestError> {
    let item = service.get(&id).await?;
    Ok(Json(item))
}

/// Create record handler.
///
/// Takes the raw body so malformed JSON gets the same `{message}` error
/// shape as every other client error.
async fn create_handler<S: RecordStore>(
    State(service): State<RecordService<S>>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateResponse>), RestError> {
    let body: Value =
        serde_json::from_slice(&body).map_err(|e| RestError::InvalidBody(e.to_string()))?;

    let response = service.create(body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
