//! Server-rendered record pages
//!
//! - `GET /records-view` - links to the first active records
//! - `GET /records-view/:id` - detail page of one record
//!
//! Pages are cacheable for twelve hours.

mod render;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use crate::rest_api::RecordService;
use crate::store::RecordStore;

pub use render::{escape_html, render_detail, render_error, render_index, render_not_found};

/// Number of records listed on the index page
pub const INDEX_SIZE: usize = 10;

/// `Cache-Control` value sent with every page
pub const PAGE_CACHE_CONTROL: &str = "public, max-age=43200";

/// Build the `/records-view` router
pub fn page_routes<S: RecordStore>(service: RecordService<S>) -> Router {
    Router::new()
        .route("/records-view", get(index_page::<S>))
        .route("/records-view/:id", get(detail_page::<S>))
        .with_state(service)
}

fn page(status: StatusCode, html: String) -> Response {
    (
        status,
        [(header::CACHE_CONTROL, PAGE_CACHE_CONTROL)],
        Html(html),
    )
        .into_response()
}

async fn index_page<S: RecordStore>(State(service): State<RecordService<S>>) -> Response {
    match service.first_active(INDEX_SIZE).await {
        Ok(records) => page(StatusCode::OK, render_index(&records)),
        Err(_) => page(StatusCode::INTERNAL_SERVER_ERROR, render_error()),
    }
}

async fn detail_page<S: RecordStore>(
    State(service): State<RecordService<S>>,
    Path(id): Path<String>,
) -> Response {
    match service.find_valid(&id).await {
        Ok(Some(record)) => page(StatusCode::OK, render_detail(&record)),
        Ok(None) => page(StatusCode::NOT_FOUND, render_not_found()),
        Err(_) => page(StatusCode::INTERNAL_SERVER_ERROR, render_error()),
    }
}
